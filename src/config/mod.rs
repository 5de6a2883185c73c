//! Configuration module for mde
//!
//! This module holds the editor options, the values derived from them
//! (hidden toolbar icons, display mode) and loading options from files.

mod options;
mod persistence;

pub use options::*;
pub use persistence::*;
