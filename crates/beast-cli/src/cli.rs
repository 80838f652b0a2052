//! Command line arguments.

use std::path::PathBuf;

use beast_cli::config::Overrides;
use beast_cli::logging::LogFormat;
use beast_codes::CodeField;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "beast-etl",
    version,
    about = "Build film and biography documents from The Beast source tables",
    long_about = "Build film and biography documents from The Beast source tables.\n\n\
                  Loads the relational export, expands coded values, aggregates one\n\
                  document per film and per person, links them to each other and\n\
                  writes JSON collections, interim CSV files and a run manifest."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the whole pipeline and write the collections.
    Run(RunArgs),

    /// Print the code table of one field.
    Codes(CodesArgs),

    /// Expand one code of one field.
    Expand(ExpandArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Configuration file (default: ./beast.toml when present).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the source tables.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the code tables (default: <DATA_DIR>/codes).
    #[arg(long = "codes-dir", value_name = "DIR")]
    pub codes_dir: Option<PathBuf>,

    /// Root of the interim/ and final/ output directories.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Fail when rows of one document disagree on a single-valued field.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Run every stage but write nothing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip the per-document JSON files.
    #[arg(long = "no-individual")]
    pub no_individual: bool,

    /// Skip the interim CSV files.
    #[arg(long = "no-interim-csv")]
    pub no_interim_csv: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            codes_dir: self.codes_dir.clone(),
            output_dir: self.output_dir.clone(),
            strict: self.strict,
            no_individual: self.no_individual,
            no_interim_csv: self.no_interim_csv,
        }
    }
}

#[derive(Parser)]
pub struct CodesArgs {
    /// Coded field, e.g. genre or professional_status.
    #[arg(value_name = "FIELD")]
    pub field: CodeField,

    /// Directory holding the code tables.
    #[arg(long = "codes-dir", value_name = "DIR")]
    pub codes_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ExpandArgs {
    #[arg(value_name = "FIELD")]
    pub field: CodeField,

    #[arg(value_name = "CODE")]
    pub code: String,

    /// Directory holding the code tables.
    #[arg(long = "codes-dir", value_name = "DIR")]
    pub codes_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
