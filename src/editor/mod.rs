//! Editor module for mde
//!
//! This module defines the capability the control needs from an embedded
//! text editor ([`EditorWidget`]), the positions and ranges it speaks in, an
//! in-memory implementation ([`BufferEditor`]) and the markdown snippets the
//! toolbar inserts.

mod buffer;
mod insert;

pub use buffer::BufferEditor;
pub use insert::{InsertKind, Snippet};

// ─────────────────────────────────────────────────────────────────────────────
// Positions and Ranges
// ─────────────────────────────────────────────────────────────────────────────

/// A position in the editor: zero-based row and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// A selection range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width range (a caret).
    pub fn collapsed(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The same range with `start <= end`.
    pub fn ordered(&self) -> Self {
        if self.start <= self.end {
            *self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }
}

/// Where to leave the cursor after replacing the whole content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPlacement {
    Start,
    End,
}

/// Notifications an editor queues for its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Content changed (by the user or programmatically); carries the new text
    Changed(String),
    /// The editor gained focus
    Focus,
    /// The editor lost focus
    Blur,
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Capability
// ─────────────────────────────────────────────────────────────────────────────

/// What the control requires from an embedded text editor.
///
/// Implementations own the text and the selection. They queue
/// [`EditorEvent`]s instead of calling back into the control; the control
/// drains them with [`EditorWidget::take_events`].
pub trait EditorWidget {
    /// Current plain-text content.
    fn value(&self) -> String;

    /// Replace the whole content. Queues exactly one `Changed` event.
    fn set_value(&mut self, value: &str, cursor: CursorPlacement);

    /// Text covered by the current selection (empty when collapsed).
    fn selected_text(&self) -> String;

    /// Current selection range.
    fn selection_range(&self) -> Range;

    /// Move the selection. Positions outside the document are clamped.
    fn set_selection_range(&mut self, range: Range);

    /// Replace the text in `range` and return the end of the inserted text.
    fn replace(&mut self, range: Range, text: &str) -> Position;

    /// Drain queued events.
    fn take_events(&mut self) -> Vec<EditorEvent>;

    fn set_wrap_mode(&mut self, wrap: bool);

    /// Select the syntax mode, e.g. `"markdown"`.
    fn set_language_mode(&mut self, mode: &str);

    /// How far past the last line the editor may scroll, in viewport heights.
    fn set_scroll_past_end(&mut self, amount: f64);

    /// Recompute layout after the container changed size.
    fn resize(&mut self);

    fn focus(&mut self);

    /// Release the editor's resources. No other method is called afterwards.
    fn destroy(&mut self);
}
