//! CLI argument definitions using clap
//!
//! This module defines all command-line arguments for curlgen.

use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use crate::codegen::TargetStyle;

/// curlgen - Convert curl commands into source code
#[derive(Parser, Debug, Clone)]
#[command(name = "curlgen", version, about, long_about = None, args_override_self = true)]
pub struct Args {
    // =========================================================================
    // INPUT
    // =========================================================================

    /// Files containing one curl command each. Reads stdin when no file and
    /// no --command is given
    #[arg(value_name = "FILE", conflicts_with = "command")]
    pub files: Vec<PathBuf>,

    /// Convert this curl command instead of reading files
    #[arg(short = 'c', long = "command", value_name = "COMMAND")]
    pub command: Option<String>,

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Target style for the generated code
    #[arg(short = 'l', long = "language", value_name = "STYLE", value_enum)]
    pub style: Option<TargetStyle>,

    /// Write output to PATH: a file for one input, a directory for several
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the packages the generated code depends on instead of the code
    #[arg(long = "deps", action = ArgAction::SetTrue)]
    pub deps: bool,

    /// List the supported target styles and exit
    #[arg(long = "list-styles", action = ArgAction::SetTrue)]
    pub list_styles: bool,

    // =========================================================================
    // LOGGING
    // =========================================================================

    /// Verbose output. Use -vv for even more verbose
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// Output format for log messages: json (JSON Lines) or text (default)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log format for diagnostics on stderr
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

impl Args {
    /// Log level implied by -v/-q
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
