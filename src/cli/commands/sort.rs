//! sort command - Natural-sort lines or a JSON array
//!
//! # Input
//!
//! Lines come from each file in turn, or stdin when no file (or `-`) is
//! given. With `--json` the concatenated input must be one JSON array.
//!
//! # Check mode
//!
//! `--check` reads a single source and reports the first label that is out
//! of order, exiting 1. Nothing is written to stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context as _, Result};
use serde_json::Value;

use crate::cli::args::FoldArg;
use crate::cli::Context;
use crate::core::compare::NaturalOrder;
use crate::core::sort::Arrangement;
use crate::core::types::{Label, LabelError};
use crate::ui::output::{self, Verbosity};

/// Options for the sort command.
#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    pub files: Vec<PathBuf>,
    pub reverse: bool,
    pub unique: bool,
    pub check: bool,
    pub zero_terminated: bool,
    pub output: Option<PathBuf>,
    pub fold: Option<FoldArg>,
    pub json: bool,
    pub key: Option<String>,
}

/// One input source with its contents.
struct Source {
    name: String,
    text: String,
}

/// Sort input in natural order.
pub fn sort(ctx: &Context, opts: SortOptions) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let verbosity = ctx.verbosity();

    let folding = opts.fold.map(Into::into).unwrap_or_else(|| config.fold());
    let order = NaturalOrder::new(folding);
    let arrangement = Arrangement {
        reverse: opts.reverse || config.reverse(),
        unique: opts.unique || config.unique(),
    };
    output::debug(format!("folding: {}", folding), verbosity);
    output::debug(format!("arrangement: {:?}", arrangement), verbosity);

    if opts.check && opts.files.len() > 1 {
        bail!("--check accepts at most one input file");
    }

    let sources = read_sources(ctx, &opts.files)?;
    let terminator = if opts.zero_terminated { '\0' } else { '\n' };

    if opts.json {
        let text: String = sources.iter().map(|s| s.text.as_str()).collect();
        let values = parse_array(&text)?;
        output::debug(format!("json elements: {}", values.len()), verbosity);

        let labelled = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let label = extract_label(index, &value, opts.key.as_deref())?;
                Ok((label, value))
            })
            .collect::<Result<Vec<(Label, Value)>, LabelError>>()?;

        if opts.check {
            let labels: Vec<&str> = labelled.iter().map(|(l, _)| l.as_str()).collect();
            let name = source_name(&sources);
            return Ok(report_disorder(&order, &labels, arrangement, &name, verbosity));
        }

        let arranged: Vec<Value> = order
            .arrange(labelled, |(label, _)| label.clone(), arrangement)
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        let mut rendered =
            serde_json::to_string_pretty(&arranged).context("Failed to serialize output")?;
        rendered.push('\n');
        write_output(ctx, opts.output.as_deref(), rendered.as_bytes())?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut lines: Vec<&str> = Vec::new();
    for source in &sources {
        let before = lines.len();
        lines.extend(split_lines(&source.text, terminator));
        output::debug(
            format!("{}: {} lines", source.name, lines.len() - before),
            verbosity,
        );
    }

    if opts.check {
        let name = source_name(&sources);
        return Ok(report_disorder(&order, &lines, arrangement, &name, verbosity));
    }

    let arranged = order.arrange(lines, |line| line.to_string(), arrangement);
    let mut rendered = String::new();
    for line in arranged {
        rendered.push_str(line);
        rendered.push(terminator);
    }
    write_output(ctx, opts.output.as_deref(), rendered.as_bytes())?;

    Ok(ExitCode::SUCCESS)
}

/// Read every input, substituting stdin for none or `-`.
fn read_sources(ctx: &Context, files: &[PathBuf]) -> Result<Vec<Source>> {
    if files.is_empty() {
        return Ok(vec![read_stdin()?]);
    }

    files
        .iter()
        .map(|file| {
            if file.as_os_str() == "-" {
                return read_stdin();
            }
            let path = ctx.resolve(file)?;
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Source {
                name: file.display().to_string(),
                text,
            })
        })
        .collect()
}

fn read_stdin() -> Result<Source> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(Source {
        name: "-".to_string(),
        text,
    })
}

fn source_name(sources: &[Source]) -> String {
    sources
        .first()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Split on `terminator`. A trailing terminator does not produce an empty
/// final line.
fn split_lines(text: &str, terminator: char) -> Vec<&str> {
    let trimmed = text.strip_suffix(terminator).unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }
    trimmed
        .split(terminator)
        .map(|line| {
            if terminator == '\n' {
                line.strip_suffix('\r').unwrap_or(line)
            } else {
                line
            }
        })
        .collect()
}

fn parse_array(text: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(text).context("Failed to parse JSON input")? {
        Value::Array(values) => Ok(values),
        other => bail!(
            "JSON input must be an array, found {}",
            crate::core::types::json_type_name(&other)
        ),
    }
}

fn extract_label(index: usize, value: &Value, key: Option<&str>) -> Result<Label, LabelError> {
    match key {
        Some(field) => Label::from_json_field(index, value, field),
        None => Label::from_json(index, value),
    }
}

/// Print the first disorder, if any, and pick the exit code.
fn report_disorder<S: AsRef<str>>(
    order: &NaturalOrder,
    labels: &[S],
    arrangement: Arrangement,
    source: &str,
    verbosity: Verbosity,
) -> ExitCode {
    match order.first_disorder(labels, arrangement) {
        Some(index) => {
            if verbosity != Verbosity::Quiet {
                eprintln!(
                    "natorder: {}:{}: disorder: {}",
                    source,
                    index + 1,
                    labels[index].as_ref()
                );
            }
            ExitCode::FAILURE
        }
        None => {
            output::debug(format!("{}: in order", source), verbosity);
            ExitCode::SUCCESS
        }
    }
}

fn write_output(ctx: &Context, path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            let path = ctx.resolve(path)?;
            fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write output")?;
            stdout.flush().context("Failed to write output")
        }
    }
}
