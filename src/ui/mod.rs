//! UI components for the markdown editor control
//!
//! This module contains the egui widgets drawn around the editor.

mod toolbar;

pub use toolbar::{toolbar_action, Toolbar};
