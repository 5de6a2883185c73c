//! The markdown editor control
//!
//! [`MarkdownEditorControl`] joins an embedded [`EditorWidget`] to a form
//! model and a live preview:
//!
//! - form writes are deferred to the next poll and pushed into the editor
//! - editor changes update the value and notify the form synchronously
//! - every value change restarts a 100 ms render debounce; when it fires the
//!   markdown is converted and stored as [`TrustedHtml`]
//! - toolbar actions insert snippets around the selection or toggle view state
//!
//! The control is single-threaded and poll-driven. Hosts call
//! [`MarkdownEditorControl::poll`] every frame (or whenever
//! [`MarkdownEditorControl::next_deadline`] passes).
//!
//! # Example
//! ```ignore
//! let mut control = MarkdownEditorControl::new(Constraints::default());
//! control.attach(BufferEditor::new());
//! control.write_value(Some("# Hello".to_string()));
//! loop {
//!     control.poll();
//!     if let Some(html) = control.preview_html() { /* draw */ }
//! }
//! ```

mod form;
mod host;
mod timer;

pub use form::{ChangeCallback, Constraints, FormControl, TouchedCallback, ValidationErrors};
pub use host::{DetachedHost, HostEnvironment};
pub use timer::{Clock, Debouncer, ManualClock, SystemClock};

use crate::config::{EditorMode, EditorOptions, HiddenIcons, ToolbarIcon};
use crate::editor::{CursorPlacement, EditorEvent, EditorWidget, InsertKind, Position, Range};
use crate::markdown::{
    ComrakConverter, Highlighter, MarkdownConverter, PreviewRenderers, SyntectHighlighter,
    TrustedHtml,
};
use log::{debug, warn};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Delay between the last value change and the preview render.
pub const RENDER_DEBOUNCE: Duration = Duration::from_millis(100);

/// Default delay before the editor is resized after a layout change.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Default control height.
pub const DEFAULT_HEIGHT: &str = "300px";

/// Language mode the embedded editor is switched to.
const EDITOR_LANGUAGE_MODE: &str = "markdown";

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Transform applied to the value before rendering. Returning `None` skips
/// the render for that change.
pub type PreRender = Box<dyn Fn(Option<&str>) -> Option<String>>;

/// Lifecycle of the embedded editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No editor attached yet
    Uninitialized,
    /// Editor attached and configured
    Ready,
    /// Torn down; the control ignores further input
    Destroyed,
}

/// Accent color of the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolbarColor {
    #[default]
    Default,
    /// Used while full-screen
    Primary,
}

/// Actions triggered from the toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Insert a markdown snippet at the selection
    Insert(InsertKind),
    TogglePreview,
    FullScreen,
}

/// A click inside the preview pane, as seen by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Snapshot of everything the presentation layer draws.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: EditorMode,
    pub height: String,
    pub hide_toolbar: bool,
    pub show_border: bool,
    pub resizable: bool,
    pub is_full_screen: bool,
    pub show_preview_panel: bool,
    pub toolbar_color: ToolbarColor,
    pub hidden_icons: HiddenIcons,
    pub preview_html: Option<TrustedHtml>,
}

impl ViewState {
    /// Toolbar buttons to draw, in order.
    ///
    /// Empty when the toolbar is hidden or the control only shows a preview.
    pub fn toolbar_icons(&self) -> Vec<ToolbarIcon> {
        if self.hide_toolbar || self.mode == EditorMode::Preview {
            return Vec::new();
        }
        self.hidden_icons.visible_icons()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Markdown Editor Control
// ─────────────────────────────────────────────────────────────────────────────

/// A markdown editor form control with toolbar actions and a live preview.
pub struct MarkdownEditorControl<E: EditorWidget> {
    // Inputs
    constraints: Constraints,
    options: EditorOptions,
    hidden_icons: HiddenIcons,
    mode: EditorMode,
    hide_toolbar: bool,
    height: String,
    pre_render: Option<PreRender>,

    // Content
    value: Option<String>,
    preview_html: Option<TrustedHtml>,

    // UI flags
    show_preview_panel: bool,
    is_full_screen: bool,
    toolbar_color: ToolbarColor,

    // Editor lifecycle and deferred work
    lifecycle: Lifecycle,
    editor: Option<E>,
    pending_writes: VecDeque<Option<String>>,
    /// `Changed` events still expected from values pushed into the editor
    pending_echoes: usize,
    render_timer: Debouncer,
    render_input: Option<String>,
    resize_timer: Debouncer,

    // Form callbacks
    on_change: Option<ChangeCallback>,
    on_touched: Option<TouchedCallback>,

    // Collaborators
    converter: Box<dyn MarkdownConverter>,
    renderers: PreviewRenderers,
    clock: Box<dyn Clock>,
    host: Box<dyn HostEnvironment>,
}

impl<E: EditorWidget> MarkdownEditorControl<E> {
    /// Create a control using comrak and syntect for the preview.
    pub fn new(constraints: Constraints) -> Self {
        Self::with_renderer(
            constraints,
            Box::new(ComrakConverter),
            Box::new(SyntectHighlighter::new()),
        )
    }

    /// Create a control with explicit preview collaborators.
    pub fn with_renderer(
        constraints: Constraints,
        converter: Box<dyn MarkdownConverter>,
        highlighter: Box<dyn Highlighter>,
    ) -> Self {
        let options = EditorOptions::default();
        let hidden_icons = options.hidden_icons();

        Self {
            constraints,
            options,
            hidden_icons,
            mode: EditorMode::Editor,
            hide_toolbar: false,
            height: DEFAULT_HEIGHT.to_string(),
            pre_render: None,
            value: None,
            preview_html: None,
            show_preview_panel: true,
            is_full_screen: false,
            toolbar_color: ToolbarColor::Default,
            lifecycle: Lifecycle::Uninitialized,
            editor: None,
            pending_writes: VecDeque::new(),
            pending_echoes: 0,
            render_timer: Debouncer::new(RENDER_DEBOUNCE),
            render_input: None,
            resize_timer: Debouncer::new(RESIZE_DEBOUNCE),
            on_change: None,
            on_touched: None,
            converter,
            renderers: PreviewRenderers::new(highlighter),
            clock: Box::new(SystemClock),
            host: Box::new(DetachedHost),
        }
    }

    /// Use a different clock for timers.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Use a host environment for page-level effects.
    pub fn with_host(mut self, host: impl HostEnvironment + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inputs
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the options and return the derived hidden-icon set.
    pub fn set_options(&mut self, options: EditorOptions) -> &HiddenIcons {
        self.hidden_icons = options.hidden_icons();
        if let Some(editor) = self.editor.as_mut() {
            editor.set_scroll_past_end(options.scroll_past_end);
        }
        self.options = options;
        &self.hidden_icons
    }

    /// Set the display mode by name; unknown names select the editor.
    pub fn set_mode(&mut self, mode: &str) -> EditorMode {
        self.mode = EditorMode::parse(mode);
        self.mode
    }

    pub fn set_hide_toolbar(&mut self, hide: bool) {
        self.hide_toolbar = hide;
    }

    pub fn set_height(&mut self, height: impl Into<String>) {
        self.height = height.into();
    }

    pub fn set_pre_render(&mut self, pre_render: Option<PreRender>) {
        self.pre_render = pre_render;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Current value, `""` when absent.
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Current value, distinguishing the absent value.
    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn preview_html(&self) -> Option<&TrustedHtml> {
        self.preview_html.as_ref()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn hidden_icons(&self) -> &HiddenIcons {
        &self.hidden_icons
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn editor(&self) -> Option<&E> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut E> {
        self.editor.as_mut()
    }

    pub fn is_full_screen(&self) -> bool {
        self.is_full_screen
    }

    pub fn show_preview_panel(&self) -> bool {
        self.show_preview_panel
    }

    pub fn toolbar_color(&self) -> ToolbarColor {
        self.toolbar_color
    }

    pub fn is_render_pending(&self) -> bool {
        self.render_timer.is_pending()
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize_timer.is_pending()
    }

    /// Earliest instant at which `poll` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.pending_writes.is_empty() {
            return Some(self.clock.now());
        }
        match (self.render_timer.deadline(), self.resize_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Snapshot for the presentation layer.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            mode: self.mode,
            height: self.height.clone(),
            hide_toolbar: self.hide_toolbar,
            show_border: self.options.show_border,
            resizable: self.options.resizable,
            is_full_screen: self.is_full_screen,
            show_preview_panel: self.show_preview_panel,
            toolbar_color: self.toolbar_color,
            hidden_icons: self.hidden_icons.clone(),
            preview_html: self.preview_html.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach and configure the embedded editor.
    ///
    /// Returns `false` (dropping `editor`) if an editor was already attached
    /// or the control was destroyed.
    pub fn attach(&mut self, mut editor: E) -> bool {
        if self.lifecycle != Lifecycle::Uninitialized {
            warn!("Ignoring editor attach while {:?}", self.lifecycle);
            return false;
        }

        editor.set_wrap_mode(true);
        editor.set_language_mode(EDITOR_LANGUAGE_MODE);
        editor.set_value(self.value(), CursorPlacement::End);
        editor.set_scroll_past_end(self.options.scroll_past_end);
        // Echo of our own value
        editor.take_events();

        self.editor = Some(editor);
        self.lifecycle = Lifecycle::Ready;
        debug!("Editor attached");
        true
    }

    /// Tear the control down: cancel timers and queued writes, destroy the
    /// editor and release the page scroll lock.
    ///
    /// Returns the destroyed editor, if one was attached.
    pub fn destroy(&mut self) -> Option<E> {
        if self.lifecycle == Lifecycle::Destroyed {
            return None;
        }

        self.render_timer.cancel();
        self.render_input = None;
        self.resize_timer.cancel();
        self.pending_writes.clear();
        self.pending_echoes = 0;

        if self.is_full_screen {
            self.host.set_page_scroll_locked(false);
        }

        let editor = self.editor.take().map(|mut editor| {
            editor.destroy();
            editor
        });
        self.lifecycle = Lifecycle::Destroyed;
        debug!("Markdown editor control destroyed");
        editor
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Polling
    // ─────────────────────────────────────────────────────────────────────────

    /// Run deferred work. Returns `true` if the preview was re-rendered.
    pub fn poll(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Destroyed {
            return false;
        }

        self.apply_pending_writes();
        self.sync_from_editor();

        let now = self.clock.now();
        let rendered = self.render_timer.fire_if_due(now) && self.render_preview();

        if self.resize_timer.fire_if_due(now) {
            if let Some(editor) = self.editor.as_mut() {
                editor.resize();
                editor.focus();
            }
        }

        rendered
    }

    /// Drain editor events, mirroring content changes into the value.
    ///
    /// `poll` calls this; hosts that get change notifications from their
    /// editor may call it directly.
    pub fn sync_from_editor(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        for event in editor.take_events() {
            match event {
                EditorEvent::Changed(_) if self.pending_echoes > 0 => {
                    self.pending_echoes -= 1;
                }
                EditorEvent::Changed(text) => self.set_markdown_value(Some(text)),
                EditorEvent::Blur => self.mark_touched(),
                EditorEvent::Focus => {}
            }
        }
    }

    /// Report that the user has interacted with the control.
    pub fn mark_touched(&mut self) {
        if let Some(callback) = self.on_touched.as_mut() {
            callback();
        }
    }

    fn apply_pending_writes(&mut self) {
        while let Some(value) = self.pending_writes.pop_front() {
            // User edits queued before the write come first
            self.sync_from_editor();
            if let Some(editor) = self.editor.as_mut() {
                editor.set_value(value.as_deref().unwrap_or(""), CursorPlacement::End);
                self.pending_echoes += 1;
            }
            self.set_markdown_value(value);
        }
    }

    /// The single funnel for value mutations.
    fn set_markdown_value(&mut self, value: Option<String>) {
        self.value = value;

        if let Some(callback) = self.on_change.as_mut() {
            callback(self.value.as_deref());
        }

        let input = match &self.pre_render {
            Some(transform) => transform(self.value.as_deref()),
            None => self.value.clone(),
        };
        if let Some(input) = input {
            self.render_input = Some(input);
            self.render_timer.schedule(self.clock.now());
        }
    }

    fn render_preview(&mut self) -> bool {
        let Some(markdown) = self.render_input.take() else {
            return false;
        };

        match self
            .converter
            .convert(&markdown, &self.options.renderer, &self.renderers)
        {
            Ok(html) => {
                self.preview_html = Some(TrustedHtml::trust(html));
                true
            }
            Err(e) => {
                warn!("Preview not updated: {}", e);
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toolbar
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a markdown snippet around the editor's selection.
    pub fn insert_content(&mut self, kind: InsertKind) {
        let Some(editor) = self.editor.as_mut() else {
            debug!("No editor attached, ignoring {:?} insertion", kind);
            return;
        };

        let selected = editor.selected_text();
        let range = editor.selection_range().ordered();
        let snippet = kind.snippet(&selected);

        editor.replace(range, &snippet.text);

        // Select the placeholder so it can be typed over
        if selected.is_empty() {
            if let Some(offset) = snippet.caret_offset {
                let start = Position::new(range.start.row, range.start.column + offset);
                let end = Position::new(
                    start.row,
                    start.column + snippet.placeholder.chars().count(),
                );
                editor.set_selection_range(Range::new(start, end));
            }
        }
        editor.focus();

        self.sync_from_editor();
    }

    /// Show or hide the preview pane.
    pub fn toggle_preview(&mut self) {
        self.show_preview_panel = !self.show_preview_panel;
        self.editor_resize(RESIZE_DEBOUNCE);
    }

    /// Enter or leave full-screen mode.
    pub fn full_screen(&mut self) {
        self.is_full_screen = !self.is_full_screen;
        self.host.set_page_scroll_locked(self.is_full_screen);
        self.toolbar_color = if self.is_full_screen {
            ToolbarColor::Primary
        } else {
            ToolbarColor::Default
        };
        self.editor_resize(RESIZE_DEBOUNCE);
    }

    /// Schedule an editor resize, replacing any pending one.
    pub fn editor_resize(&mut self, timeout: Duration) {
        if self.editor.is_none() {
            return;
        }
        self.resize_timer.schedule_after(self.clock.now(), timeout);
    }

    /// The editor/preview split was dragged.
    pub fn split_resized(&mut self) {
        if self.options.resizable {
            self.editor_resize(RESIZE_DEBOUNCE);
        }
    }

    /// Swallow clicks in the preview unless preview content is clickable.
    pub fn preview_click(&self, event: &mut ClickEvent) {
        if !self.options.enable_preview_content_click {
            event.prevent_default();
            event.stop_immediate_propagation();
        }
    }

    /// Dispatch an action returned by the toolbar.
    pub fn apply_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Insert(kind) => self.insert_content(kind),
            ToolbarAction::TogglePreview => self.toggle_preview(),
            ToolbarAction::FullScreen => self.full_screen(),
        }
    }
}

impl<E: EditorWidget> FormControl for MarkdownEditorControl<E> {
    fn write_value(&mut self, value: Option<String>) {
        if self.lifecycle == Lifecycle::Destroyed {
            debug!("Ignoring write to destroyed control");
            return;
        }
        self.pending_writes.push_back(value);
    }

    fn register_on_change(&mut self, callback: ChangeCallback) {
        self.on_change = Some(callback);
    }

    fn register_on_touched(&mut self, callback: TouchedCallback) {
        self.on_touched = Some(callback);
    }

    fn validate(&self) -> Option<ValidationErrors> {
        self.constraints.check(self.value())
    }
}

impl<E: EditorWidget> Drop for MarkdownEditorControl<E> {
    fn drop(&mut self) {
        self.destroy();
    }
}
