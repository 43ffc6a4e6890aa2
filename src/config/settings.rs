//! Report settings loading from mill_recap.toml
//!
//! This module loads the small amount of tunable configuration the tracker
//! has: where generated report PDFs are written. The settings file is
//! optional; defaults apply when it is absent.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default settings file location, relative to the working directory
pub const SETTINGS_FILE: &str = "mill_recap.toml";

/// Application settings parsed from the settings file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory report PDFs are written into
    pub report_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("."),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {SETTINGS_FILE}: {e}"),
    })
}

/// Loads settings from the default location, falling back to defaults when
/// the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    if Path::new(SETTINGS_FILE).exists() {
        load_settings(SETTINGS_FILE)
    } else {
        Ok(Settings::default())
    }
}
