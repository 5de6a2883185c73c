//! Toolbar for the markdown editor control
//!
//! Draws one icon button per visible [`ToolbarIcon`] and reports the clicked
//! button as a [`ToolbarAction`]. The caller hands the action to
//! [`MarkdownEditorControl::apply_toolbar_action`](crate::control::MarkdownEditorControl::apply_toolbar_action).

use crate::config::ToolbarIcon;
use crate::control::{ToolbarAction, ToolbarColor, ViewState};
use crate::editor::InsertKind;
use egui::{Color32, Response, RichText, Ui, Vec2};

/// Height of the toolbar row.
const TOOLBAR_HEIGHT: f32 = 30.0;

/// Size of icon buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(28.0, 24.0);

/// Map a toolbar button to the action it triggers.
pub fn toolbar_action(icon: ToolbarIcon) -> ToolbarAction {
    match icon {
        ToolbarIcon::Bold => ToolbarAction::Insert(InsertKind::Bold),
        ToolbarIcon::Italic => ToolbarAction::Insert(InsertKind::Italic),
        ToolbarIcon::Heading => ToolbarAction::Insert(InsertKind::Heading),
        ToolbarIcon::Refrence => ToolbarAction::Insert(InsertKind::Reference),
        ToolbarIcon::Link => ToolbarAction::Insert(InsertKind::Link),
        ToolbarIcon::Image => ToolbarAction::Insert(InsertKind::Image),
        ToolbarIcon::Ul => ToolbarAction::Insert(InsertKind::UnorderedList),
        ToolbarIcon::Ol => ToolbarAction::Insert(InsertKind::OrderedList),
        ToolbarIcon::Code => ToolbarAction::Insert(InsertKind::Code),
        ToolbarIcon::TogglePreview => ToolbarAction::TogglePreview,
        ToolbarIcon::FullScreen => ToolbarAction::FullScreen,
    }
}

/// Toolbar rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toolbar;

impl Toolbar {
    pub fn new() -> Self {
        Self
    }

    /// Render the toolbar and return any triggered action.
    ///
    /// Nothing is drawn when the view state has no toolbar icons (toolbar
    /// hidden, or preview-only mode).
    pub fn show(&self, ui: &mut Ui, state: &ViewState) -> Option<ToolbarAction> {
        let icons = state.toolbar_icons();
        if icons.is_empty() {
            return None;
        }

        let is_dark = ui.visuals().dark_mode;
        let background = match (state.toolbar_color, is_dark) {
            (ToolbarColor::Primary, true) => Color32::from_rgb(40, 60, 90),
            (ToolbarColor::Primary, false) => Color32::from_rgb(210, 225, 245),
            (ToolbarColor::Default, true) => Color32::from_rgb(40, 40, 40),
            (ToolbarColor::Default, false) => Color32::from_rgb(248, 248, 248),
        };
        let separator_color = if is_dark {
            Color32::from_rgb(70, 70, 70)
        } else {
            Color32::from_rgb(210, 210, 210)
        };

        ui.painter()
            .rect_filled(ui.available_rect_before_wrap(), 0.0, background);

        let mut action = None;
        ui.horizontal(|ui| {
            ui.set_height(TOOLBAR_HEIGHT);
            ui.spacing_mut().item_spacing.x = 2.0;

            let mut previous_was_insert = false;
            for icon in icons {
                let is_insert = !matches!(
                    icon,
                    ToolbarIcon::TogglePreview | ToolbarIcon::FullScreen
                );
                if previous_was_insert && !is_insert {
                    vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 8.0);
                }
                previous_was_insert = is_insert;

                let active = match icon {
                    ToolbarIcon::TogglePreview => state.show_preview_panel,
                    ToolbarIcon::FullScreen => state.is_full_screen,
                    _ => false,
                };
                if icon_button(ui, icon, active, is_dark).clicked() {
                    action = Some(toolbar_action(icon));
                }
            }
        });

        action
    }
}

fn icon_button(ui: &mut Ui, icon: ToolbarIcon, active: bool, is_dark: bool) -> Response {
    let text_color = if is_dark {
        Color32::from_rgb(220, 220, 220)
    } else {
        Color32::from_rgb(50, 50, 50)
    };

    let mut text = RichText::new(icon.label()).size(14.0).color(text_color);
    if matches!(icon, ToolbarIcon::Bold | ToolbarIcon::Heading) {
        text = text.strong();
    } else if icon == ToolbarIcon::Italic {
        text = text.italics();
    }

    ui.add(
        egui::Button::new(text)
            .frame(false)
            .selected(active)
            .min_size(ICON_BUTTON_SIZE),
    )
    .on_hover_text(icon.tooltip())
}

fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter().line_segment(
        [rect.center_top(), rect.center_bottom()],
        egui::Stroke::new(1.0, color),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EditorMode, HiddenIcons};

    fn state() -> ViewState {
        ViewState {
            mode: EditorMode::Editor,
            height: "300px".to_string(),
            hide_toolbar: false,
            show_border: true,
            resizable: true,
            is_full_screen: false,
            show_preview_panel: true,
            toolbar_color: ToolbarColor::Default,
            hidden_icons: HiddenIcons::default(),
            preview_html: None,
        }
    }

    fn run(state: &ViewState) -> Option<ToolbarAction> {
        let ctx = egui::Context::default();
        let mut action = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = Toolbar::new().show(ui, state);
            });
        });
        action
    }

    #[test]
    fn test_toolbar_action_mapping() {
        assert_eq!(
            toolbar_action(ToolbarIcon::Refrence),
            ToolbarAction::Insert(InsertKind::Reference)
        );
        assert_eq!(
            toolbar_action(ToolbarIcon::Ul),
            ToolbarAction::Insert(InsertKind::UnorderedList)
        );
        assert_eq!(
            toolbar_action(ToolbarIcon::FullScreen),
            ToolbarAction::FullScreen
        );
    }

    #[test]
    fn test_every_icon_has_an_action() {
        for &icon in ToolbarIcon::all() {
            let _ = toolbar_action(icon);
        }
    }

    #[test]
    fn test_show_without_input_has_no_action() {
        assert_eq!(run(&state()), None);

        let mut full_screen = state();
        full_screen.is_full_screen = true;
        full_screen.toolbar_color = ToolbarColor::Primary;
        assert_eq!(run(&full_screen), None);
    }

    #[test]
    fn test_hidden_toolbar_draws_nothing() {
        let mut hidden = state();
        hidden.hide_toolbar = true;
        assert!(hidden.toolbar_icons().is_empty());
        assert_eq!(run(&hidden), None);

        let mut preview = state();
        preview.mode = EditorMode::Preview;
        assert!(preview.toolbar_icons().is_empty());
    }

    #[test]
    fn test_hidden_icons_are_skipped() {
        let mut partial = state();
        partial.hidden_icons = HiddenIcons::from_names(&["Bold", "Image"]);
        let icons = partial.toolbar_icons();
        assert!(!icons.contains(&ToolbarIcon::Bold));
        assert!(!icons.contains(&ToolbarIcon::Image));
        assert_eq!(icons.len(), ToolbarIcon::all().len() - 2);
    }
}
