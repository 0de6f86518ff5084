//! Settings handling for craft.
//! Loads the optional `craft.json` / `craft.yml` / `craft.yaml` file from the working directory
//! and merges it with command-line overrides.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User settings. Every field is optional; a missing file yields the defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Host directory to read templates from instead of the embedded ones
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,

    /// Upper bound on how long a generator script may run
    #[serde(default)]
    pub generator_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn generator_timeout(&self) -> Option<Duration> {
        self.generator_timeout_secs.map(Duration::from_secs)
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        templates_dir: Option<PathBuf>,
        generator_timeout_secs: Option<u64>,
    ) -> Self {
        if templates_dir.is_some() {
            self.templates_dir = templates_dir;
        }
        if generator_timeout_secs.is_some() {
            self.generator_timeout_secs = generator_timeout_secs;
        }
        self
    }
}

/// Parses settings content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigFileError` if the content is neither valid JSON nor valid YAML settings
pub fn parse_settings(content: &str, origin: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content).map_err(|e| Error::ConfigFileError {
            path: origin.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Loads settings from the first settings file found in `dir`.
///
/// Returns the defaults when none of [`CONFIG_FILES`] exists.
pub fn load_settings<P: AsRef<Path>>(dir: P) -> Result<Settings> {
    for file in CONFIG_FILES {
        let path = dir.as_ref().join(file);
        if path.is_file() {
            debug!("Loading settings from {}", path.display());
            let content = std::fs::read_to_string(&path).map_err(Error::IoError)?;
            return parse_settings(&content, &path);
        }
    }

    debug!(
        "No settings file found (tried: {})",
        CONFIG_FILES.join(", ")
    );
    Ok(Settings::default())
}
