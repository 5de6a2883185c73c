//! Per-token renderers for the preview
//!
//! The converter hands code blocks, tables and list items to a
//! [`TokenRenderers`] table. [`PreviewRenderers`] styles them for the preview
//! pane: highlighted code, bordered tables and checkbox list items.

use super::escape_html;
use super::highlight::Highlighter;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Icon marker replacing an unchecked `[ ]` list item prefix.
const UNCHECKED_MARKER: &str =
    r#"<i class="fa fa-square-o" style="margin: 0 0.2em 0.25em -1.6em;"></i> "#;

/// Icon marker replacing a checked `[x]` list item prefix.
const CHECKED_MARKER: &str =
    r#"<i class="fa fa-check-square" style="margin: 0 0.2em 0.25em -1.6em;"></i> "#;

// ─────────────────────────────────────────────────────────────────────────────
// Trusted HTML
// ─────────────────────────────────────────────────────────────────────────────

/// HTML produced by the preview pipeline.
///
/// Presentation layers insert it without escaping. Only this crate can
/// construct one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub(crate) fn trust(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TrustedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token Renderers
// ─────────────────────────────────────────────────────────────────────────────

/// Renderers the converter delegates individual tokens to.
pub trait TokenRenderers {
    /// Render a fenced or indented code block. `code` is raw, unescaped text.
    fn code(&self, code: &str, language: Option<&str>) -> String;

    /// Render a table from its already rendered header and body rows.
    fn table(&self, header: &str, body: &str) -> String;

    /// Render a list item from its already rendered inner HTML.
    fn list_item(&self, text: &str) -> String;
}

/// Leading `[ ]` / `[x]` of a task list item; group 1 is the check state.
static TASK_MARKER: OnceLock<Regex> = OnceLock::new();

fn task_marker() -> &'static Regex {
    TASK_MARKER.get_or_init(|| {
        Regex::new(r"^\s*\[([x ])\]\s*").expect("task marker pattern is valid")
    })
}

/// The renderer table used for the editor preview.
pub struct PreviewRenderers {
    highlighter: Box<dyn Highlighter>,
}

impl PreviewRenderers {
    pub fn new(highlighter: Box<dyn Highlighter>) -> Self {
        Self { highlighter }
    }
}

impl TokenRenderers for PreviewRenderers {
    fn code(&self, code: &str, language: Option<&str>) -> String {
        let highlighted = match language {
            Some(lang) if self.highlighter.is_known(lang) => self.highlighter.highlight(lang, code),
            Some(_) => None,
            None => self.highlighter.highlight_auto(code),
        };
        let body = highlighted.unwrap_or_else(|| escape_html(code));

        let class = match language {
            Some(lang) => format!("hljs {}", escape_html(lang)),
            None => "hljs".to_string(),
        };

        format!(
            "<pre style=\"padding: 0; border-radius: 0;\"><code class=\"{}\">{}</code></pre>\n",
            class, body
        )
    }

    fn table(&self, header: &str, body: &str) -> String {
        format!(
            "<table class=\"table table-bordered\">\n<thead>\n{}</thead>\n<tbody>\n{}</tbody>\n</table>\n",
            header, body
        )
    }

    fn list_item(&self, text: &str) -> String {
        let Some(captures) = task_marker().captures(text) else {
            return format!("<li>{}</li>\n", text);
        };

        let marker = match &captures[1] {
            "x" => CHECKED_MARKER,
            _ => UNCHECKED_MARKER,
        };
        let rest = &text[captures[0].len()..];
        format!("<li style=\"list-style: none;\">{}{}</li>\n", marker, rest)
    }
}
