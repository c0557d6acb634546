//! CLI argument definitions for `cmap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cmap_ingest::Delimiter;
use cmap_map::ConflictPolicy;

#[derive(Parser)]
#[command(
    name = "cmap",
    version,
    about = "Map CSV columns onto your own table captions",
    long_about = "Profile a delimited file, suggest which columns belong under which \
                  captions, and refine the mapping in a scripted chat."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the columns, inferred types and sample values of a file.
    Profile(ProfileArgs),

    /// Suggest and resolve column-to-caption mappings.
    Suggest(SuggestArgs),

    /// Map columns interactively through the assistant.
    Chat(ChatArgs),

    /// Run profile and suggest on a bundled dataset.
    Demo(DemoArgs),
}

/// Options for reading the input file.
#[derive(Args)]
pub struct InputArgs {
    /// Delimited text file (.csv, .tsv or .txt).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter (default from settings, else comma).
    #[arg(long = "delimiter", value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Treat the first row as data rather than column names.
    #[arg(long = "no-header")]
    pub no_header: bool,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// Where captions come from.
#[derive(Args)]
pub struct CaptionArgs {
    /// Target caption; repeat for several.
    #[arg(short = 'c', long = "caption", value_name = "CAPTION")]
    pub captions: Vec<String>,

    /// Use a caption preset (general, customers, products, sales, employees,
    /// or auto to pick one from the column names).
    #[arg(long = "preset", value_name = "NAME")]
    pub preset: Option<String>,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub captions: CaptionArgs,

    /// How to settle several columns wanting one caption.
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Suggestions must score above this (0-1).
    #[arg(long = "min-confidence", value_name = "F")]
    pub min_confidence: Option<f32>,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ChatArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub captions: CaptionArgs,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Dataset name (customers, products, sales, employees); all when omitted.
    #[arg(value_name = "DATASET")]
    pub dataset: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DelimiterArg {
    Comma,
    Tab,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Comma => Self::Comma,
            DelimiterArg::Tab => Self::Tab,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    HighestConfidence,
    FirstClaim,
}

impl From<PolicyArg> for ConflictPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::HighestConfidence => Self::HighestConfidence,
            PolicyArg::FirstClaim => Self::FirstClaim,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
