//! mde - a markdown editor form control
//!
//! Wraps an embedded text editor as a form control with a markdown toolbar,
//! a debounced live preview and `required`/`maxlength` validation.
//!
//! - [`control`] - the [`MarkdownEditorControl`] orchestrator and form contract
//! - [`editor`] - the embedded editor capability and toolbar snippets
//! - [`markdown`] - markdown to HTML conversion with custom token renderers
//! - [`config`] - editor options and loading them from disk
//! - [`ui`] - egui toolbar

pub mod config;
pub mod control;
pub mod editor;
pub mod error;
pub mod markdown;
pub mod string_utils;
pub mod ui;

pub use config::{EditorMode, EditorOptions, HiddenIcons, RendererOptions, ToolbarIcon};
pub use control::{
    Constraints, FormControl, Lifecycle, MarkdownEditorControl, ToolbarAction, ValidationErrors,
    ViewState,
};
pub use editor::{BufferEditor, EditorWidget, InsertKind};
pub use error::{Error, Result};
pub use markdown::TrustedHtml;
