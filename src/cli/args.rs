/// Command-line surface: global flags and one `Args` struct per subcommand.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::settings::CONFIG_ENV;

/// accelview: browse and live-filter keyboard shortcut descriptors.
#[derive(Debug, Parser)]
#[command(
    name = "accelview",
    about = "Browse and live-filter keyboard shortcut definitions from XML descriptor files",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// How results are printed. `auto` means a table on a terminal, JSON otherwise.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Same as `--output json`.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Print tables without the header row.
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Log step timings and debug messages to stderr (or --log-file).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Settings file holding the last used descriptor path.
    #[arg(long, global = true, value_name = "PATH", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Append log output to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Result formats accepted by `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Table when stdout is a terminal, JSON when it is not.
    #[default]
    Auto,
    /// Pretty-printed JSON.
    Json,
    /// JSON on a single line.
    Compact,
    /// One JSON object per shortcut, one per line.
    Ndjson,
    /// Bordered table of accelerator, name and command.
    Table,
    /// The fixed-width display lines, one per line.
    Plain,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a descriptor and print every shortcut.
    List(ListArgs),
    /// Show only shortcuts starting with the given modifiers.
    Filter(FilterArgs),
    /// Search shortcuts by text.
    Search(SearchArgs),
    /// Interactive viewer: hold modifiers or type to filter.
    Live(LiveArgs),
    /// Show or reset the remembered descriptor path.
    Config(ConfigArgs),
}

/// Descriptor selection shared by all loading commands.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Only elements with this name count as shortcuts (default: any element
    /// with an `Accelerator` attribute).
    #[arg(long, value_name = "NAME")]
    pub element: Option<String>,
}

/// Arguments for `accelview list`.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Descriptor file. Defaults to the last file loaded.
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `accelview filter`.
#[derive(Debug, Parser)]
pub struct FilterArgs {
    /// Descriptor file. Defaults to the last file loaded.
    pub path: Option<PathBuf>,

    /// Treat Control as held.
    #[arg(long, short = 'c')]
    pub control: bool,

    /// Treat Alt as held.
    #[arg(long, short = 'a')]
    pub alt: bool,

    /// Treat Shift as held.
    #[arg(long, short = 's')]
    pub shift: bool,

    /// Text search over the whole list; overrides the modifier flags.
    #[arg(long, short = 't', value_name = "TERM")]
    pub search: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `accelview search`.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search term (case-insensitive substring).
    pub term: String,

    /// Descriptor file. Defaults to the last file loaded.
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Rank by fuzzy match instead of substring.
    #[arg(long)]
    pub fuzzy: bool,

    /// Maximum number of fuzzy results.
    #[arg(long, value_name = "N", default_value = "10")]
    pub limit: usize,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `accelview live`.
#[derive(Debug, Parser)]
pub struct LiveArgs {
    /// Descriptor file to open. Defaults to the last file loaded.
    pub path: Option<PathBuf>,

    /// Start with this text in the search field.
    #[arg(long, short = 't', value_name = "TERM")]
    pub search: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `accelview config`.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Forget the remembered descriptor path.
    #[arg(long)]
    pub clear: bool,
}
