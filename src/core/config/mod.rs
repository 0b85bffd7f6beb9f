//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! natorder has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Per-directory overrides of sort behavior
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$NATORDER_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/natorder/config.toml`
//! 3. `~/.natorder/config.toml` (canonical write location)
//!
//! # Project Config Locations
//!
//! Searched in order:
//! 1. `.natorder.toml` (canonical)
//! 2. `.natorder/config.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use natorder::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Folding: {}", config.fold());
//! println!("Reverse: {}", config.reverse());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, LoginDialogConfig, PageMetadataConfig, ProjectConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::core::compare::CaseFolding;
use crate::host::login_dialog::LoginDialogPatch;
use crate::host::metadata::MetadataFormat;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "NATORDER_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules. Project config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if found)
    pub project: Option<ProjectConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads project config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        Self::load_from(global_path.as_deref(), project_dir)
    }

    /// Load configuration from an explicit global file and project directory.
    ///
    /// A `global_path` that does not exist yields defaults.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_loaded) = match global_path {
            Some(path) if path.exists() => {
                (read_toml::<GlobalConfig>(path)?, Some(path.to_path_buf()))
            }
            _ => (GlobalConfig::default(), None),
        };

        let (project, project_loaded) = match project_dir {
            Some(dir) => Self::load_project(dir, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path: global_loaded,
                project_path: project_loaded,
            },
            warnings,
        })
    }

    /// Locate the global config file, if any exists.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $NATORDER_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/natorder/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("natorder/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.natorder/config.toml
        dirs::home_dir()
            .map(|home| home.join(".natorder/config.toml"))
            .filter(|path| path.exists())
    }

    /// Load project configuration from standard locations.
    fn load_project(
        dir: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<ProjectConfig>, Option<PathBuf>), ConfigError> {
        let canonical = Self::project_config_path(dir);
        if canonical.exists() {
            let config = read_toml(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        let compat = dir.join(".natorder/config.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            let config = read_toml(&compat)?;
            return Ok((Some(config), Some(compat)));
        }

        Ok((None, None))
    }

    /// Get the path `config set` writes to.
    ///
    /// Honors `$NATORDER_CONFIG`, otherwise `~/.natorder/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".natorder/config.toml"))
    }

    /// Get the canonical project config path for `dir`.
    pub fn project_config_path(dir: &Path) -> PathBuf {
        dir.join(".natorder.toml")
    }

    /// Write global config atomically to `path`.
    ///
    /// Creates parent directories if needed. Writes to a temp file and
    /// renames it into place.
    pub fn write_global(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;
        write_config_atomic(path, config)
    }

    /// Write project config atomically.
    pub fn write_project(dir: &Path, config: &ProjectConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::project_config_path(dir);
        write_config_atomic(&path, config)?;
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Case folding for comparisons.
    ///
    /// Defaults to ASCII if not configured.
    pub fn fold(&self) -> CaseFolding {
        self.project
            .as_ref()
            .and_then(|p| p.fold)
            .or(self.global.fold)
            .unwrap_or_default()
    }

    /// Whether sort output is reversed.
    ///
    /// Defaults to `false` if not configured.
    pub fn reverse(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.reverse)
            .or(self.global.reverse)
            .unwrap_or(false)
    }

    /// Whether duplicate labels are dropped.
    ///
    /// Defaults to `false` if not configured.
    pub fn unique(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.unique)
            .or(self.global.unique)
            .unwrap_or(false)
    }

    /// Login dialog patch with configured settings applied over defaults.
    pub fn login_dialog(&self) -> LoginDialogPatch {
        let mut patch = LoginDialogPatch::default();
        if let Some(dialog) = &self.global.login_dialog {
            if let Some(width) = dialog.width {
                patch.size.width = width;
            }
            if let Some(height) = dialog.height {
                patch.size.height = height;
            }
            if let Some(ms) = dialog.poll_interval_ms {
                patch.poll_interval = Duration::from_millis(ms);
            }
            if let Some(attempts) = dialog.max_attempts {
                patch.max_attempts = attempts;
            }
        }
        patch
    }

    /// Clipboard format for page metadata.
    ///
    /// Defaults to markdown if not configured.
    pub fn metadata_format(&self) -> MetadataFormat {
        self.global
            .page_metadata
            .as_ref()
            .and_then(|m| m.format)
            .unwrap_or_default()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}

/// Read and parse a TOML config file.
fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a config file atomically.
fn write_config_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_empty_defaults() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("none.toml");

        let result = Config::load_from(Some(&missing), Some(temp.path())).unwrap();
        let config = result.config;

        assert_eq!(config.fold(), CaseFolding::Ascii);
        assert!(!config.reverse());
        assert!(!config.unique());
        assert_eq!(config.metadata_format(), MetadataFormat::Markdown);
        assert!(config.global_config_loaded_from().is_none());
        assert!(config.project_config_loaded_from().is_none());
    }

    #[test]
    fn load_global_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");

        fs::write(
            &config_path,
            r#"
            fold = "unicode"
            reverse = true

            [login_dialog]
            width = 800
            poll_interval_ms = 25
            "#,
        )
        .unwrap();

        let result = Config::load_from(Some(&config_path), None).unwrap();
        let config = result.config;

        assert_eq!(config.fold(), CaseFolding::Unicode);
        assert!(config.reverse());
        let patch = config.login_dialog();
        assert_eq!(patch.size.width, 800);
        assert_eq!(patch.size.height, LoginDialogPatch::default().size.height);
        assert_eq!(patch.poll_interval, Duration::from_millis(25));
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn load_global_from_env() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "unique = true").unwrap();

        std::env::set_var(CONFIG_ENV, config_path.to_str().unwrap());
        let result = Config::load(None);
        std::env::remove_var(CONFIG_ENV);

        assert!(result.unwrap().config.unique());
    }

    #[test]
    fn project_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global_path = temp.path().join("global.toml");
        fs::write(&global_path, "fold = \"unicode\"\nreverse = true").unwrap();
        fs::write(temp.path().join(".natorder.toml"), "reverse = false").unwrap();

        let result = Config::load_from(Some(&global_path), Some(temp.path())).unwrap();
        let config = result.config;

        assert!(!config.reverse());
        // Not overridden by the project file
        assert_eq!(config.fold(), CaseFolding::Unicode);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn load_project_compat_warns() {
        let temp = TempDir::new().unwrap();
        let compat_dir = temp.path().join(".natorder");
        fs::create_dir_all(&compat_dir).unwrap();
        fs::write(compat_dir.join("config.toml"), "unique = true").unwrap();

        let result = Config::load_from(None, Some(temp.path())).unwrap();

        assert!(result.config.unique());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("deprecated"));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".natorder.toml"), "colour = \"red\"").unwrap();

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_dialog_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[login_dialog]\nmax_attempts = 0").unwrap();

        let result = Config::load_from(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn write_global_atomic() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let config = GlobalConfig {
            fold: Some(CaseFolding::Unicode),
            ..Default::default()
        };
        Config::write_global(&path, &config).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(Some(&path), None).unwrap();
        assert_eq!(loaded.config.fold(), CaseFolding::Unicode);
    }

    #[test]
    fn write_project_roundtrip() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig {
            reverse: Some(true),
            ..Default::default()
        };

        let path = Config::write_project(temp.path(), &config).unwrap();
        assert_eq!(path, temp.path().join(".natorder.toml"));

        let loaded = Config::load_from(None, Some(temp.path())).unwrap();
        assert!(loaded.config.reverse());
    }
}
