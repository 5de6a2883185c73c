//! Code highlighting for the preview
//!
//! [`SyntectHighlighter`] emits class-based HTML (`<span class="source rust">`)
//! so the host page styles it with a stylesheet, the same way highlight.js
//! output is styled.

use log::{debug, warn};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Classifies code by language and produces highlighted HTML.
pub trait Highlighter {
    /// Whether `language` names a known language.
    fn is_known(&self, language: &str) -> bool;

    /// Highlight `code` as `language`. The result is HTML with the code
    /// escaped. `None` if the language is unknown or highlighting failed.
    fn highlight(&self, language: &str, code: &str) -> Option<String>;

    /// Detect the language of `code` and highlight it. `None` if no
    /// language could be detected.
    fn highlight_auto(&self, code: &str) -> Option<String>;
}

/// Highlighter backed by syntect's bundled syntax definitions.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    /// Load the default syntax set.
    ///
    /// Loading is relatively expensive, so a highlighter should be created
    /// once and reused.
    pub fn new() -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        debug!("Loaded {} syntaxes", syntax_set.syntaxes().len());
        Self { syntax_set }
    }

    /// Find a syntax for a fence language tag.
    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }

        let lang_lower = language.to_lowercase();

        // Aliases syntect's tokens don't cover
        let token = match lang_lower.as_str() {
            "javascript" | "node" => "js",
            "typescript" => "ts",
            "c++" | "cxx" => "cpp",
            "c#" | "csharp" => "cs",
            "golang" => "go",
            "shell" | "bash" | "zsh" => "sh",
            "yml" => "yaml",
            "markdown" | "md" => "md",
            other => other,
        };

        self.syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_name(language))
    }

    fn highlight_with(&self, syntax: &SyntaxReference, code: &str) -> Option<String> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);

        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                warn!("Failed to highlight {} code: {}", syntax.name, e);
                return None;
            }
        }

        Some(generator.finalize())
    }
}

impl Highlighter for SyntectHighlighter {
    fn is_known(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }

    fn highlight(&self, language: &str, code: &str) -> Option<String> {
        let syntax = self.find_syntax(language)?;
        self.highlight_with(syntax, code)
    }

    fn highlight_auto(&self, code: &str) -> Option<String> {
        let first_line = code.lines().next()?;
        let syntax = self.syntax_set.find_syntax_by_first_line(first_line)?;
        debug!("Detected {} code block", syntax.name);
        self.highlight_with(syntax, code)
    }
}
