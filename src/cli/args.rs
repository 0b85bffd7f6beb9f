//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Resolve relative paths and project config from here
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::compare::CaseFolding;

/// natorder - Natural (alphanumeric) ordering for lines, JSON, and labels
#[derive(Parser, Debug)]
#[command(name = "natorder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if natorder was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sort lines (or a JSON array) in natural order
    #[command(
        name = "sort",
        long_about = "Sort lines in natural (alphanumeric) order.\n\n\
            Each line is split into runs of digits and everything else. Digit runs \
            compare by numeric value, so 'file2' sorts before 'file10'. Letters \
            compare case-insensitively. Lines that compare equal keep their input \
            order.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Sort a file list
    ls | natorder sort

    # Sort several files into one output file
    natorder sort a.txt b.txt -o sorted.txt

    # Verify a file is already sorted (exit 1 if not)
    natorder sort --check versions.txt

    # Sort a JSON array of objects by their \"name\" field
    natorder sort --json --key name users.json"
    )]
    Sort {
        /// Input files ('-' or none reads stdin)
        files: Vec<PathBuf>,

        /// Reverse the result
        #[arg(short, long)]
        reverse: bool,

        /// Keep only the first of labels that compare equal
        #[arg(short, long)]
        unique: bool,

        /// Check whether input is sorted; do not sort
        #[arg(short, long)]
        check: bool,

        /// Lines are terminated by NUL, not newline
        #[arg(short, long)]
        zero_terminated: bool,

        /// Write the result to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Case folding (overrides config)
        #[arg(long, value_enum)]
        fold: Option<FoldArg>,

        /// Treat input as a JSON array and write a JSON array
        #[arg(long)]
        json: bool,

        /// With --json, sort objects by this string field
        #[arg(long, requires = "json", value_name = "FIELD")]
        key: Option<String>,
    },

    /// Compare two labels and print less, equal, or greater
    #[command(name = "compare")]
    Compare {
        /// Left label
        left: String,

        /// Right label
        right: String,

        /// Case folding (overrides config)
        #[arg(long, value_enum)]
        fold: Option<FoldArg>,
    },

    /// Show how a label splits into numeric and text chunks
    #[command(name = "chunks")]
    Chunks {
        /// Label to decompose
        label: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a URL serves a script that can be installed as a patch
    #[command(
        name = "check-script",
        long_about = "Fetch a URL and decide whether it really serves JavaScript.\n\n\
            JavaScript content types are accepted. text/plain, \
            application/octet-stream, or a missing content type are accepted when \
            the URL path ends in .js or the body starts with a userscript header. \
            HTML and error statuses are rejected.",
        after_help = "\
EXIT STATUS:
    0    accepted
    1    rejected, or the fetch failed"
    )]
    CheckScript {
        /// URL of the script
        url: String,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        after_help = "\
KEYS:
    fold                            ascii | unicode
    reverse                         true | false
    unique                          true | false
    login_dialog.width              pixels
    login_dialog.height             pixels
    login_dialog.poll_interval_ms   milliseconds
    login_dialog.max_attempts       count (>= 1)
    page_metadata.format            markdown | plain

The login_dialog.* and page_metadata.* keys are library-only settings. The
natorder binary stores them; host integrations read them through
Config::login_dialog and Config::metadata_format."
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    natorder completion bash > ~/.local/share/bash-completion/completions/natorder

    # Zsh
    natorder completion zsh > ~/.zfunc/_natorder

    # Fish
    natorder completion fish > ~/.config/fish/completions/natorder.fish

    # PowerShell
    natorder completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Case folding choice on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldArg {
    Ascii,
    Unicode,
}

impl From<FoldArg> for CaseFolding {
    fn from(arg: FoldArg) -> Self {
        match arg {
            FoldArg::Ascii => CaseFolding::Ascii,
            FoldArg::Unicode => CaseFolding::Unicode,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sort_flags() {
        let cli = Cli::try_parse_from([
            "natorder", "sort", "-r", "-u", "--fold", "unicode", "a.txt", "b.txt",
        ])
        .unwrap();
        match cli.command {
            Command::Sort {
                files,
                reverse,
                unique,
                fold,
                ..
            } => {
                assert_eq!(files.len(), 2);
                assert!(reverse);
                assert!(unique);
                assert_eq!(fold, Some(FoldArg::Unicode));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn key_requires_json() {
        assert!(Cli::try_parse_from(["natorder", "sort", "--key", "name"]).is_err());
    }

    #[test]
    fn powershell_shell_name() {
        let cli = Cli::try_parse_from(["natorder", "completion", "powershell"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Completion {
                shell: Shell::PowerShell
            }
        ));
        assert!(Cli::try_parse_from(["natorder", "completion", "power-shell"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["natorder", "compare", "a", "b", "--debug"]).unwrap();
        assert!(cli.debug);
    }
}
