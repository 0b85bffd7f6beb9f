//! check-script command - Decide whether a URL serves installable script
//!
//! The fetch is async, so the handler builds a runtime and blocks on it.

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::host::http::ReqwestFetcher;
use crate::host::script_patch::ScriptPatchValidator;
use crate::ui::output;

/// Fetch `url` and print the verdict. Rejection exits 1.
pub fn check_script(ctx: &Context, url: &str) -> Result<ExitCode> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    rt.block_on(check_script_async(ctx, url))
}

async fn check_script_async(ctx: &Context, url: &str) -> Result<ExitCode> {
    let verbosity = ctx.verbosity();
    let fetcher = ReqwestFetcher::new()?;

    output::debug(format!("fetching {}", url), verbosity);
    let verdict = ScriptPatchValidator::new(&fetcher)
        .validate(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;
    output::debug(format!("verdict: {:?}", verdict), verbosity);

    println!("{}", verdict);
    if verdict.accepted {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
