//! chunks command - Show a label's chunk decomposition

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::chunk::decompose;
use crate::ui::output;

/// Print the chunks of `label`, as rows or JSON.
pub fn chunks(label: &str, json: bool) -> Result<ExitCode> {
    let chunks = decompose(label);

    if json {
        let rendered =
            serde_json::to_string_pretty(&chunks).context("Failed to serialize chunks")?;
        println!("{}", rendered);
    } else if !chunks.is_empty() {
        println!("{}", output::format_chunks(&chunks));
    }

    Ok(ExitCode::SUCCESS)
}
