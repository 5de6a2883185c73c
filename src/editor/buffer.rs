//! In-memory editor widget
//!
//! `BufferEditor` implements [`EditorWidget`] over a plain `String`. It has no
//! rendering of its own: headless hosts, the command line renderer and the
//! tests drive it directly, and GUI hosts can mirror it into their own text
//! widget.

use super::{CursorPlacement, EditorEvent, EditorWidget, Position, Range};
use crate::string_utils::{byte_index_to_char_index, char_index_to_byte_index, line_spans};
use log::debug;

/// A text buffer with a selection, editor settings and an event queue.
#[derive(Debug, Clone)]
pub struct BufferEditor {
    text: String,
    selection: Range,
    events: Vec<EditorEvent>,
    wrap_mode: bool,
    language_mode: String,
    scroll_past_end: f64,
    focused: bool,
    resize_count: usize,
    focus_count: usize,
    destroyed: bool,
}

impl Default for BufferEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            selection: Range::default(),
            events: Vec::new(),
            wrap_mode: false,
            language_mode: "text".to_string(),
            scroll_past_end: 0.0,
            focused: false,
            resize_count: 0,
            focus_count: 0,
            destroyed: false,
        }
    }

    /// Create an editor holding `text`, caret at the end, with no queued events.
    pub fn with_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.text = text.to_string();
        editor.selection = Range::collapsed(editor.position_of(editor.text.len()));
        editor
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User Input
    // ─────────────────────────────────────────────────────────────────────────

    /// Type text over the current selection, as a user would.
    pub fn type_text(&mut self, text: &str) {
        let range = self.selection;
        self.replace(range, text);
    }

    /// Select the given range, as a user would with mouse or keyboard.
    pub fn select(&mut self, range: Range) {
        self.set_selection_range(range);
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        let end = self.position_of(self.text.len());
        self.selection = Range::new(Position::default(), end);
    }

    /// Move focus away from the editor.
    pub fn blur(&mut self) {
        if self.focused {
            self.focused = false;
            self.events.push(EditorEvent::Blur);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn wrap_mode(&self) -> bool {
        self.wrap_mode
    }

    pub fn language_mode(&self) -> &str {
        &self.language_mode
    }

    pub fn scroll_past_end(&self) -> f64 {
        self.scroll_past_end
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Number of times `resize` was called.
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }

    /// Number of times `focus` was called.
    pub fn focus_count(&self) -> usize {
        self.focus_count
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Position Math
    // ─────────────────────────────────────────────────────────────────────────

    /// Clamp a position to an existing row and column.
    pub fn clip_position(&self, position: Position) -> Position {
        let spans = line_spans(&self.text);
        let row = position.row.min(spans.len() - 1);
        let column = position.column.min(spans[row].char_len(&self.text));
        Position { row, column }
    }

    /// Byte offset of a (clamped) position.
    fn offset_of(&self, position: Position) -> usize {
        let spans = line_spans(&self.text);
        let row = position.row.min(spans.len() - 1);
        let span = spans[row];
        span.start + char_index_to_byte_index(span.content(&self.text), position.column)
    }

    /// Position of a byte offset.
    fn position_of(&self, offset: usize) -> Position {
        let spans = line_spans(&self.text);
        let row = spans
            .iter()
            .rposition(|span| span.start <= offset)
            .unwrap_or(0);
        let span = spans[row];
        let within = offset.min(span.content_end) - span.start;
        Position {
            row,
            column: byte_index_to_char_index(span.content(&self.text), within),
        }
    }
}

impl EditorWidget for BufferEditor {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, value: &str, cursor: CursorPlacement) {
        self.text = value.to_string();
        let caret = match cursor {
            CursorPlacement::Start => Position::default(),
            CursorPlacement::End => self.position_of(self.text.len()),
        };
        self.selection = Range::collapsed(caret);
        self.events.push(EditorEvent::Changed(self.text.clone()));
    }

    fn selected_text(&self) -> String {
        let range = self.selection.ordered();
        let start = self.offset_of(range.start);
        let end = self.offset_of(range.end);
        self.text[start..end].to_string()
    }

    fn selection_range(&self) -> Range {
        self.selection
    }

    fn set_selection_range(&mut self, range: Range) {
        self.selection = Range::new(
            self.clip_position(range.start),
            self.clip_position(range.end),
        );
    }

    fn replace(&mut self, range: Range, text: &str) -> Position {
        let range = range.ordered();
        let start = self.offset_of(range.start);
        let end = self.offset_of(range.end);
        self.text.replace_range(start..end, text);

        let caret = self.position_of(start + text.len());
        self.selection = Range::collapsed(caret);
        self.events.push(EditorEvent::Changed(self.text.clone()));
        caret
    }

    fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_wrap_mode(&mut self, wrap: bool) {
        self.wrap_mode = wrap;
    }

    fn set_language_mode(&mut self, mode: &str) {
        self.language_mode = mode.to_string();
    }

    fn set_scroll_past_end(&mut self, amount: f64) {
        self.scroll_past_end = amount;
    }

    fn resize(&mut self) {
        self.resize_count += 1;
    }

    fn focus(&mut self) {
        self.focus_count += 1;
        if !self.focused {
            self.focused = true;
            self.events.push(EditorEvent::Focus);
        }
    }

    fn destroy(&mut self) {
        debug!("Destroying buffer editor ({} bytes)", self.text.len());
        self.destroyed = true;
        self.events.clear();
    }
}
