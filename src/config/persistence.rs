//! Loading editor options from files
//!
//! Hosts that keep their editor configuration on disk can load it as JSON,
//! YAML or TOML. The format is picked from the file extension; anything
//! unrecognized is treated as JSON.

use crate::config::EditorOptions;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Serialization format of an options file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    Json,
    Yaml,
    Toml,
}

impl OptionsFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => OptionsFormat::Yaml,
            Some("toml") => OptionsFormat::Toml,
            _ => OptionsFormat::Json,
        }
    }

    /// Parse options content in this format.
    pub fn parse(&self, contents: &str) -> Result<EditorOptions> {
        // Empty documents mean "all defaults" in every format
        if contents.trim().is_empty() {
            return Ok(EditorOptions::default());
        }

        let options = match self {
            OptionsFormat::Json => serde_json::from_str(contents)?,
            OptionsFormat::Yaml => serde_yaml::from_str(contents)?,
            OptionsFormat::Toml => toml::from_str(contents)?,
        };
        Ok(options)
    }
}

/// Load editor options from a file.
///
/// # Errors
///
/// Returns `Error::ConfigLoad` if the file cannot be read and
/// `Error::ConfigParse` if its contents are invalid.
pub fn load_options(path: &Path) -> Result<EditorOptions> {
    debug!("Loading editor options from: {}", path.display());

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let options = OptionsFormat::from_path(path).parse(&contents)?;
    info!("Loaded editor options from {}", path.display());
    Ok(options)
}

/// Load editor options, falling back to defaults on any error.
pub fn load_options_or_default(path: &Path) -> EditorOptions {
    load_options(path).unwrap_or_warn_default(EditorOptions::default(), "Failed to load editor options")
}
