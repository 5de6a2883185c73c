//! Editor options and the values derived from them
//!
//! This module defines the `EditorOptions` struct that configures one editor
//! control, with serde support so hosts can pass options as JSON, YAML or
//! TOML using the same camelCase keys the toolbar templates use.

use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ─────────────────────────────────────────────────────────────────────────────
// Editor Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Display mode of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Editor and (optionally) preview side by side
    #[default]
    Editor,
    /// Rendered preview only
    Preview,
}

impl EditorMode {
    /// Parse a mode name, case-insensitively.
    ///
    /// Anything other than `editor` or `preview` falls back to `Editor`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "preview" => EditorMode::Preview,
            "editor" => EditorMode::Editor,
            other => {
                debug!("Unknown editor mode '{}', using editor", other);
                EditorMode::Editor
            }
        }
    }

    /// Get the canonical name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Editor => "editor",
            EditorMode::Preview => "preview",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Toolbar Icons
// ─────────────────────────────────────────────────────────────────────────────

/// Toolbar buttons that can be suppressed through `hideIcons`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarIcon {
    Bold,
    Italic,
    Heading,
    /// Blockquote button. The identifier keeps the historical spelling
    /// hosts already use in their `hideIcons` lists.
    Refrence,
    Link,
    Image,
    Ul,
    Ol,
    Code,
    TogglePreview,
    FullScreen,
}

impl ToolbarIcon {
    /// Get all icons in toolbar order.
    pub fn all() -> &'static [ToolbarIcon] {
        &[
            ToolbarIcon::Bold,
            ToolbarIcon::Italic,
            ToolbarIcon::Heading,
            ToolbarIcon::Refrence,
            ToolbarIcon::Link,
            ToolbarIcon::Image,
            ToolbarIcon::Ul,
            ToolbarIcon::Ol,
            ToolbarIcon::Code,
            ToolbarIcon::TogglePreview,
            ToolbarIcon::FullScreen,
        ]
    }

    /// Identifier used in `hideIcons`.
    pub fn name(&self) -> &'static str {
        match self {
            ToolbarIcon::Bold => "Bold",
            ToolbarIcon::Italic => "Italic",
            ToolbarIcon::Heading => "Heading",
            ToolbarIcon::Refrence => "Refrence",
            ToolbarIcon::Link => "Link",
            ToolbarIcon::Image => "Image",
            ToolbarIcon::Ul => "Ul",
            ToolbarIcon::Ol => "Ol",
            ToolbarIcon::Code => "Code",
            ToolbarIcon::TogglePreview => "TogglePreview",
            ToolbarIcon::FullScreen => "FullScreen",
        }
    }

    /// Look up an icon by its `hideIcons` identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|icon| icon.name() == name)
    }

    /// Short label drawn on the button.
    pub fn label(&self) -> &'static str {
        match self {
            ToolbarIcon::Bold => "B",
            ToolbarIcon::Italic => "I",
            ToolbarIcon::Heading => "H",
            ToolbarIcon::Refrence => "\u{275D}", // ❝
            ToolbarIcon::Link => "🔗",
            ToolbarIcon::Image => "🖼",
            ToolbarIcon::Ul => "\u{2022}", // •
            ToolbarIcon::Ol => "1.",
            ToolbarIcon::Code => "{ }",
            ToolbarIcon::TogglePreview => "👁",
            ToolbarIcon::FullScreen => "⛶",
        }
    }

    /// Hover text for the button.
    pub fn tooltip(&self) -> &'static str {
        match self {
            ToolbarIcon::Bold => "Bold",
            ToolbarIcon::Italic => "Italic",
            ToolbarIcon::Heading => "Heading",
            ToolbarIcon::Refrence => "Reference",
            ToolbarIcon::Link => "Link",
            ToolbarIcon::Image => "Image",
            ToolbarIcon::Ul => "Unordered List",
            ToolbarIcon::Ol => "Ordered List",
            ToolbarIcon::Code => "Code Block",
            ToolbarIcon::TogglePreview => "Toggle Preview",
            ToolbarIcon::FullScreen => "Full Screen",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hidden Icons
// ─────────────────────────────────────────────────────────────────────────────

/// Set of toolbar icon names to suppress, derived from `hideIcons`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenIcons {
    names: BTreeSet<String>,
}

impl HiddenIcons {
    /// Build the set from a list of icon identifiers.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let names: BTreeSet<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
        for name in &names {
            if ToolbarIcon::from_name(name).is_none() {
                debug!("hideIcons entry '{}' does not name a toolbar icon", name);
            }
        }
        Self { names }
    }

    /// Check whether a raw identifier is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Check whether a toolbar icon is suppressed.
    pub fn is_hidden(&self, icon: ToolbarIcon) -> bool {
        self.contains(icon.name())
    }

    /// Toolbar icons that remain visible, in toolbar order.
    pub fn visible_icons(&self) -> Vec<ToolbarIcon> {
        ToolbarIcon::all()
            .iter()
            .copied()
            .filter(|icon| !self.is_hidden(*icon))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer Options
// ─────────────────────────────────────────────────────────────────────────────

/// Pass-through configuration for the markdown converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererOptions {
    /// GitHub Flavored Markdown extensions (tables, strikethrough, autolinks)
    pub gfm: bool,
    /// Render single newlines as `<br>`
    pub breaks: bool,
    /// Escape raw HTML found in the markdown instead of passing it through
    pub sanitize: bool,
    /// Smart punctuation (curly quotes, dashes, ellipses)
    pub smartypants: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: false,
            sanitize: false,
            smartypants: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Options
// ─────────────────────────────────────────────────────────────────────────────

/// Options recognized by the editor control.
///
/// Deserialization merges shallowly over [`EditorOptions::default`]: absent
/// keys keep their default and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorOptions {
    /// Draw a border around the control
    pub show_border: bool,
    /// Toolbar icon identifiers to suppress
    pub hide_icons: Vec<String>,
    /// Overscroll amount passed to the embedded editor
    pub scroll_past_end: f64,
    /// Whether links and buttons inside the preview react to clicks
    pub enable_preview_content_click: bool,
    /// Whether the editor/preview split can be dragged
    pub resizable: bool,
    /// Markdown converter configuration
    #[serde(rename = "markedjsOpt")]
    pub renderer: RendererOptions,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            show_border: true,
            hide_icons: Vec::new(),
            scroll_past_end: 0.0,
            enable_preview_content_click: false,
            resizable: true,
            renderer: RendererOptions::default(),
        }
    }
}

impl EditorOptions {
    /// Parse options from JSON, merging over the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Derive the hidden-icon set.
    pub fn hidden_icons(&self) -> HiddenIcons {
        HiddenIcons::from_names(&self.hide_icons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(EditorMode::parse("editor"), EditorMode::Editor);
        assert_eq!(EditorMode::parse("Preview"), EditorMode::Preview);
        assert_eq!(EditorMode::parse("PREVIEW"), EditorMode::Preview);
        assert_eq!(EditorMode::parse("split"), EditorMode::Editor);
        assert_eq!(EditorMode::parse(""), EditorMode::Editor);
    }

    #[test]
    fn test_default_options() {
        let options = EditorOptions::default();
        assert!(options.show_border);
        assert!(options.hide_icons.is_empty());
        assert_eq!(options.scroll_past_end, 0.0);
        assert!(!options.enable_preview_content_click);
        assert!(options.resizable);
        assert!(options.renderer.gfm);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = EditorOptions::from_json(r#"{"showBorder": false, "scrollPastEnd": 0.5}"#)
            .unwrap();
        assert!(!options.show_border);
        assert_eq!(options.scroll_past_end, 0.5);
        assert!(options.resizable);
        assert!(!options.enable_preview_content_click);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options =
            EditorOptions::from_json(r#"{"resizable": false, "fancyMode": 3}"#).unwrap();
        assert!(!options.resizable);
    }

    #[test]
    fn test_renderer_options_pass_through() {
        let options =
            EditorOptions::from_json(r#"{"markedjsOpt": {"breaks": true, "sanitize": true}}"#)
                .unwrap();
        assert!(options.renderer.breaks);
        assert!(options.renderer.sanitize);
        assert!(options.renderer.gfm);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(EditorOptions::from_json("{not json").is_err());
    }

    #[test]
    fn test_hidden_icons() {
        let options = EditorOptions::from_json(r#"{"hideIcons": ["Bold", "Code", "Sparkles"]}"#)
            .unwrap();
        let hidden = options.hidden_icons();
        assert_eq!(hidden.len(), 3);
        assert!(hidden.is_hidden(ToolbarIcon::Bold));
        assert!(hidden.is_hidden(ToolbarIcon::Code));
        assert!(!hidden.is_hidden(ToolbarIcon::Italic));
        assert!(hidden.contains("Sparkles"));

        let visible = hidden.visible_icons();
        assert_eq!(visible.len(), ToolbarIcon::all().len() - 2);
        assert_eq!(visible[0], ToolbarIcon::Italic);
    }

    #[test]
    fn test_toolbar_icon_names_round_trip() {
        for icon in ToolbarIcon::all() {
            assert_eq!(ToolbarIcon::from_name(icon.name()), Some(*icon));
        }
        assert_eq!(ToolbarIcon::from_name("bold"), None);
    }
}
