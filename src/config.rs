//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/menutree/menutree.toml`
//! 3. Local config: `<config_dir>/.menutree.toml`
//! 4. Environment variables: `MENUTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, InputFormat};

/// Unified configuration for menutree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Key wrapping the menu document (default: "data")
    pub envelope_key: String,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Input format when none is given on the command line
    pub input_format: InputFormat,
    /// Field delimiter for CSV input
    pub csv_delimiter: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            envelope_key: "data".into(),
            pretty: false,
            input_format: InputFormat::Auto,
            csv_delimiter: ',',
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub envelope_key: Option<String>,
    pub pretty: Option<bool>,
    pub input_format: Option<InputFormat>,
    pub csv_delimiter: Option<char>,
}

/// Get the XDG config directory for menutree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "menutree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("menutree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".menutree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self: specified values win, others are kept.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            envelope_key: overlay
                .envelope_key
                .clone()
                .unwrap_or_else(|| self.envelope_key.clone()),
            pretty: overlay.pretty.unwrap_or(self.pretty),
            input_format: overlay.input_format.unwrap_or(self.input_format),
            csv_delimiter: overlay.csv_delimiter.unwrap_or(self.csv_delimiter),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.menutree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply MENUTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MENUTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;
        Ok(settings.merge_with(&Self::raw_overrides(&config)?))
    }

    /// Collect the recognized keys of an override source; malformed values are errors.
    fn raw_overrides(config: &Config) -> Result<RawSettings, ApplicationError> {
        let mut raw = RawSettings::default();
        if let Ok(val) = config.get_string("envelope_key") {
            raw.envelope_key = Some(val);
        }
        if let Ok(val) = config.get_string("pretty") {
            raw.pretty = Some(parse_flag("pretty", &val)?);
        }
        if let Ok(val) = config.get_string("input_format") {
            raw.input_format = Some(parse_input_format(&val)?);
        }
        if let Ok(val) = config.get_string("csv_delimiter") {
            raw.csv_delimiter = Some(parse_delimiter(&val)?);
        }
        Ok(raw)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.envelope_key.is_empty() {
            return Err(ApplicationError::Config {
                message: "envelope_key must not be empty".into(),
            });
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(ApplicationError::Config {
                message: format!("csv_delimiter must be ASCII, got {:?}", self.csv_delimiter),
            });
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn parse_input_format(value: &str) -> Result<InputFormat, ApplicationError> {
    use clap::ValueEnum;
    InputFormat::from_str(value, true).map_err(|e| ApplicationError::Config {
        message: format!("input_format: {}", e),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ApplicationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ApplicationError::Config {
            message: format!("{} must be a boolean, got {:?}", key, value),
        }),
    }
}

fn parse_delimiter(value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("csv_delimiter must be a single character, got {:?}", value),
        }),
    }
}
