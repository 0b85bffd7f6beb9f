//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Merges flags with loaded configuration
//! 2. Calls into `core` or `host`
//! 3. Formats and displays output
//!
//! Handlers return the process exit code. `sort --check` and
//! `check-script` use exit status 1 for a negative answer, which is not an
//! error.
//!
//! # Async Commands
//!
//! `check-script` performs network I/O. Its handler builds a tokio runtime
//! and blocks on the async work so dispatch stays synchronous.

mod check_script;
mod chunks;
mod completion;
mod compare;
mod config_cmd;
mod sort;

// Re-export command functions for testing and direct invocation
pub use check_script::check_script;
pub use chunks::chunks;
pub use compare::compare;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use sort::{sort, SortOptions};

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Sort {
            files,
            reverse,
            unique,
            check,
            zero_terminated,
            output,
            fold,
            json,
            key,
        } => sort::sort(
            ctx,
            SortOptions {
                files,
                reverse,
                unique,
                check,
                zero_terminated,
                output,
                fold,
                json,
                key,
            },
        ),
        Command::Compare { left, right, fold } => compare::compare(ctx, &left, &right, fold),
        Command::Chunks { label, json } => chunks::chunks(&label, json),
        Command::CheckScript { url } => check_script::check_script(ctx, &url),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
