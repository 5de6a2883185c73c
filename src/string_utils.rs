//! UTF-8 safe index and line utilities
//!
//! Editor positions are expressed as (row, column) with columns counted in
//! characters, while Rust strings are indexed by byte. These helpers convert
//! between the two without ever slicing inside a multi-byte character.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::{char_index_to_byte_index, line_spans};
//!
//! let text = "Hei på deg\r\nline two";
//! let spans = line_spans(text);
//! assert_eq!(spans[0].content(text), "Hei på deg");
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Character Index Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index to a byte index.
///
/// Returns the string length if `char_index` is beyond the string.
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Convert a byte index to a character index.
///
/// If the byte index is in the middle of a character, it counts up to (but
/// not including) that character. Indices past the end count every character.
pub fn byte_index_to_char_index(s: &str, byte_index: usize) -> usize {
    s.char_indices()
        .take_while(|(i, _)| *i < byte_index)
        .count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Spans
// ─────────────────────────────────────────────────────────────────────────────

/// Byte span of one line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Byte offset of the first character of the line
    pub start: usize,
    /// Byte offset just past the line content (before `\r\n` or `\n`)
    pub content_end: usize,
}

impl LineSpan {
    /// Get the line content without its terminator.
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.content_end]
    }

    /// Number of characters in the line content.
    pub fn char_len(&self, text: &str) -> usize {
        self.content(text).chars().count()
    }
}

/// Split text into lines, treating both `\n` and `\r\n` as terminators.
///
/// Always returns at least one line; a trailing terminator produces a final
/// empty line, like a text editor shows it.
pub fn line_spans(text: &str) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut start = 0;

    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            let content_end = if i > start && text.as_bytes()[i - 1] == b'\r' {
                i - 1
            } else {
                i
            };
            spans.push(LineSpan { start, content_end });
            start = i + 1;
        }
    }

    spans.push(LineSpan {
        start,
        content_end: text.len(),
    });
    spans
}
