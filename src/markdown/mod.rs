//! Markdown preview rendering
//!
//! The preview pipeline has three collaborators, each behind a trait so the
//! control can be tested with fakes:
//!
//! - [`MarkdownConverter`] turns markdown into HTML, delegating code blocks,
//!   tables and list items to a [`TokenRenderers`] table
//! - [`TokenRenderers`] renders those three tokens; [`PreviewRenderers`] is
//!   the table the editor uses
//! - [`Highlighter`] classifies and highlights code for the code renderer
//!
//! The default implementations use comrak and syntect.
//!
//! # Example
//! ```ignore
//! use crate::markdown::{ComrakConverter, MarkdownConverter, PreviewRenderers, SyntectHighlighter};
//!
//! let renderers = PreviewRenderers::new(Box::new(SyntectHighlighter::new()));
//! let html = ComrakConverter.convert("- [x] done", &Default::default(), &renderers)?;
//! ```

mod converter;
mod highlight;
mod renderers;

pub use converter::{ComrakConverter, MarkdownConverter};
pub use highlight::{Highlighter, SyntectHighlighter};
pub use renderers::{PreviewRenderers, TokenRenderers, TrustedHtml};

/// Escape text for inclusion in HTML content or attribute values.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
