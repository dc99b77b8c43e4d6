//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for semverctl
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The bare version string
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorChoice> for termcolor::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => termcolor::ColorChoice::Auto,
            ColorChoice::Always => termcolor::ColorChoice::Always,
            ColorChoice::Never => termcolor::ColorChoice::Never,
        }
    }
}

/// semverctl command line
///
/// Pass all four of --major, --minor, --patch and --build to update the
/// stored version, or --details alone to print it.
#[derive(Parser, Debug)]
#[command(name = "semverctl")]
#[command(about = "Read or bump a major.minor.patch.build version kept in an object store")]
#[command(version)]
pub struct Cli {
    /// Bucket that holds the version file [required]
    #[arg(long, value_name = "NAME")]
    pub bucket: String,

    /// File name used to store the version [required]
    #[arg(long, value_name = "KEY")]
    pub file: String,

    /// Major version: N sets it, +N adds to it, - leaves it unchanged
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub major: Option<String>,

    /// Minor version: N sets it, +N adds to it, - leaves it unchanged
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub minor: Option<String>,

    /// Patch version: N sets it, +N adds to it, - leaves it unchanged
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub patch: Option<String>,

    /// Build version: N sets it, +N adds to it, - leaves it unchanged
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub build: Option<String>,

    /// Print the currently stored version
    #[arg(long)]
    pub details: bool,

    /// Configuration file (defaults to ./semverctl.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the buckets (overrides store.root)
    #[arg(long, value_name = "DIR")]
    pub store_root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Output coloring
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Log filter (overrides logging.level)
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}
