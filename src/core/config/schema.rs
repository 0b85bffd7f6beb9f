//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$NATORDER_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/natorder/config.toml`
//! 3. `~/.natorder/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! Located at `.natorder.toml` in the working directory (canonical).
//!
//! # Validation
//!
//! Unknown fields are rejected at parse time. Value ranges are checked by
//! `validate()` after parsing.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::compare::CaseFolding;
use crate::host::metadata::MetadataFormat;

/// Keys accepted by `natorder config get/set`.
pub const CONFIG_KEYS: &[&str] = &[
    "fold",
    "reverse",
    "unique",
    "login_dialog.width",
    "login_dialog.height",
    "login_dialog.poll_interval_ms",
    "login_dialog.max_attempts",
    "page_metadata.format",
];

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// fold = "ascii"
/// reverse = false
/// unique = false
///
/// [login_dialog]
/// width = 480
/// height = 640
/// poll_interval_ms = 100
/// max_attempts = 50
///
/// [page_metadata]
/// format = "markdown"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Case folding applied before comparison
    pub fold: Option<CaseFolding>,

    /// Reverse sort output by default
    pub reverse: Option<bool>,

    /// Drop duplicate labels by default
    pub unique: Option<bool>,

    /// Login dialog patch settings
    pub login_dialog: Option<LoginDialogConfig>,

    /// Page metadata copy settings
    pub page_metadata: Option<PageMetadataConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dialog) = &self.login_dialog {
            dialog.validate()?;
        }
        Ok(())
    }

    /// Read a value by dotted key, rendered as a string.
    ///
    /// Returns `Ok(None)` for a known key that is not set.
    pub fn get_key(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let dialog = self.login_dialog.as_ref();
        let value = match key {
            "fold" => self.fold.map(|f| f.to_string()),
            "reverse" => self.reverse.map(|b| b.to_string()),
            "unique" => self.unique.map(|b| b.to_string()),
            "login_dialog.width" => dialog.and_then(|d| d.width).map(|v| v.to_string()),
            "login_dialog.height" => dialog.and_then(|d| d.height).map(|v| v.to_string()),
            "login_dialog.poll_interval_ms" => {
                dialog.and_then(|d| d.poll_interval_ms).map(|v| v.to_string())
            }
            "login_dialog.max_attempts" => {
                dialog.and_then(|d| d.max_attempts).map(|v| v.to_string())
            }
            "page_metadata.format" => self
                .page_metadata
                .as_ref()
                .and_then(|m| m.format)
                .map(|f| f.to_string()),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a value by dotted key, parsing it from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unknown keys or values that
    /// do not parse or fail validation.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "fold" => self.fold = Some(value.parse().map_err(ConfigError::InvalidValue)?),
            "reverse" => self.reverse = Some(parse_bool(key, value)?),
            "unique" => self.unique = Some(parse_bool(key, value)?),
            "login_dialog.width" => {
                self.login_dialog_mut().width = Some(parse_number(key, value)?)
            }
            "login_dialog.height" => {
                self.login_dialog_mut().height = Some(parse_number(key, value)?)
            }
            "login_dialog.poll_interval_ms" => {
                self.login_dialog_mut().poll_interval_ms = Some(parse_number(key, value)?)
            }
            "login_dialog.max_attempts" => {
                self.login_dialog_mut().max_attempts = Some(parse_number(key, value)?)
            }
            "page_metadata.format" => {
                self.page_metadata
                    .get_or_insert_with(Default::default)
                    .format = Some(value.parse().map_err(ConfigError::InvalidValue)?)
            }
            _ => return Err(unknown_key(key)),
        }
        self.validate()
    }

    fn login_dialog_mut(&mut self) -> &mut LoginDialogConfig {
        self.login_dialog.get_or_insert_with(Default::default)
    }
}

/// Project configuration.
///
/// Only sort behavior can be overridden per project.
///
/// # Example
///
/// ```toml
/// fold = "unicode"
/// reverse = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Case folding applied before comparison
    pub fold: Option<CaseFolding>,

    /// Reverse sort output
    pub reverse: Option<bool>,

    /// Drop duplicate labels
    pub unique: Option<bool>,
}

/// Login dialog patch settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoginDialogConfig {
    /// Target dialog width in pixels
    pub width: Option<u32>,

    /// Target dialog height in pixels
    pub height: Option<u32>,

    /// Delay between polls for the dialog
    pub poll_interval_ms: Option<u64>,

    /// Number of polls before giving up
    pub max_attempts: Option<u32>,
}

impl LoginDialogConfig {
    /// Validate the dialog settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == Some(0) || self.height == Some(0) {
            return Err(ConfigError::InvalidValue(
                "login_dialog width and height must be greater than 0".to_string(),
            ));
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::InvalidValue(
                "login_dialog.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Page metadata copy settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PageMetadataConfig {
    /// Clipboard text format
    pub format: Option<MetadataFormat>,
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::InvalidValue(format!(
        "unknown configuration key '{}', must be one of: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::InvalidValue(format!("{} must be true or false, got '{}'", key, value))
    })
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::InvalidValue(format!(
            "{} must be a non-negative integer, got '{}'",
            key, value
        ))
    })
}
