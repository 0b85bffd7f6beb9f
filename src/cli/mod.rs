//! cli
//!
//! Command-line interface layer for natorder.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and merge it with flags
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Ordering logic lives in [`crate::core`]; host
//! interaction lives in [`crate::host`]. Handlers only read input, call
//! into those layers, and format results.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};

/// Execution context shared by all command handlers.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override
    pub cwd: Option<PathBuf>,
    /// Debug logging
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
}

impl Context {
    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The effective working directory.
    pub fn working_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.working_dir()?.join(path))
        }
    }

    /// Load configuration for the working directory, reporting warnings.
    pub fn load_config(&self) -> Result<Config> {
        let dir = self.working_dir()?;
        let result = Config::load(Some(&dir)).context("Failed to load config")?;
        let verbosity = self.verbosity();

        for warning in &result.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                verbosity,
            );
        }
        if let Some(path) = result.config.global_config_loaded_from() {
            output::debug(format!("global config: {}", path.display()), verbosity);
        }
        if let Some(path) = result.config.project_config_loaded_from() {
            output::debug(format!("project config: {}", path.display()), verbosity);
        }

        Ok(result.config)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_relative_against_cwd() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/work")),
            ..Default::default()
        };
        assert_eq!(
            ctx.resolve(Path::new("list.txt")).unwrap(),
            PathBuf::from("/work/list.txt")
        );
        assert_eq!(
            ctx.resolve(Path::new("/abs/list.txt")).unwrap(),
            PathBuf::from("/abs/list.txt")
        );
    }

    #[test]
    fn verbosity_from_context() {
        let ctx = Context {
            quiet: true,
            debug: true,
            ..Default::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);
    }
}
