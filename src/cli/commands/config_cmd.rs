//! config command - Get, set, or list configuration values
//!
//! `get` and `list` show the global config that was loaded. `set` edits the
//! file at the canonical global location and rewrites it atomically.

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::schema::CONFIG_KEYS;
use crate::core::config::Config;
use crate::ui::output;

/// Get a configuration value.
///
/// A known key with no value prints nothing.
pub fn get(ctx: &Context, key: &str) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    if let Some(value) = config.global.get_key(key)? {
        println!("{}", value);
    }
    Ok(ExitCode::SUCCESS)
}

/// Set a configuration value.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<ExitCode> {
    let path = Config::global_config_path()?;
    output::debug(format!("global config: {}", path.display()), ctx.verbosity());

    let mut global = Config::load_from(Some(&path), None)
        .context("Failed to load config")?
        .config
        .global;
    global.set_key(key, value)?;

    Config::write_global(&path, &global).context("Failed to write config")?;
    output::success(format!("Set {} = {}", key, value), ctx.verbosity());

    Ok(ExitCode::SUCCESS)
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<ExitCode> {
    let config = ctx.load_config()?;

    println!("# Global Configuration");
    for key in CONFIG_KEYS {
        match config.global.get_key(key)? {
            Some(value) => println!("{} = {}", key, value),
            None => println!("{} = (not set)", key),
        }
    }

    if let Some(path) = config.project_config_loaded_from() {
        println!();
        println!("# Effective values with {}", path.display());
        println!("fold = {}", config.fold());
        println!("reverse = {}", config.reverse());
        println!("unique = {}", config.unique());
    }

    Ok(ExitCode::SUCCESS)
}
