use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for geosync
#[derive(Debug, Parser)]
#[command(
    name = "geosync",
    version,
    about = "Reconcile free-text place names against an area gazetteer"
)]
pub struct CliArgs {
    /// Gazetteer source: JSON area tree (.json / .json.gz) or a prebuilt .bin index
    #[arg(short = 'g', long, env = "GEOSYNC_GAZETTEER", global = true)]
    pub gazetteer: Option<PathBuf>,

    /// Minimum similarity score (50..=100) for a fuzzy match to be accepted
    #[arg(
        short = 't',
        long,
        env = "GEOSYNC_THRESHOLD",
        default_value_t = 85,
        value_parser = clap::value_parser!(i64).range(50..=100),
        global = true
    )]
    pub threshold: i64,

    /// Always parse the source, never read or write the binary index cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Raise log verbosity (-v info, -vv debug); logs go to stderr
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded gazetteer
    Stats,

    /// Resolve a single place name and list its candidates
    Resolve {
        /// Free-text place name, e.g. "Кировск Мурманская обл"
        query: String,
    },

    /// Reconcile a column of place names read from CSV
    Reconcile {
        /// Input CSV; place names are taken from the first column
        input: PathBuf,

        /// Write results here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// The input has no header row
        #[arg(long)]
        no_header: bool,

        /// Only write resolved rows that are not duplicates
        #[arg(long)]
        exportable_only: bool,

        /// CSV of manual overrides (`row_id,choice`; empty or `-` means no match)
        #[arg(long)]
        overrides: Option<PathBuf>,
    },

    /// Download the area tree and store it as JSON
    #[cfg(feature = "fetch")]
    Fetch {
        /// Endpoint serving the area tree
        #[arg(long, default_value = geosync_core::DEFAULT_AREAS_URL)]
        url: String,

        /// Destination file
        #[arg(short = 'o', long, default_value = "areas.json")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}
