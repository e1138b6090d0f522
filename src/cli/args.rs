//! Command line argument parsing for the Skiff CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::IndexConfig;

/// Skiff - skiplist-backed boolean search over a tab-separated document file
#[derive(Parser, Debug, Clone)]
#[command(name = "skiff")]
#[command(about = "Skiplist-backed boolean search over a tab-separated document file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SkiffArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Index configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "SKIFF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Highest level a skiplist node may reach
    #[arg(long, global = true)]
    pub max_level: Option<usize>,

    /// Probability of promoting a node one more level
    #[arg(long, global = true)]
    pub probability: Option<f64>,

    /// Seed for level generation (reproducible index shape)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SkiffArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Build the index configuration: file first, then flag overrides.
    pub fn index_config(&self) -> Result<IndexConfig> {
        let mut config = match &self.config {
            Some(path) => IndexConfig::from_json_file(path)?,
            None => IndexConfig::default(),
        };

        if let Some(max_level) = self.max_level {
            config.max_level = max_level;
        }
        if let Some(probability) = self.probability {
            config.promotion_probability = probability;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find documents containing every query term
    Search(SearchArgs),

    /// Find documents containing any term in a lexicographic range
    Range(RangeArgs),

    /// Show index statistics
    Stats(StatsArgs),

    /// Read queries from stdin until `quit`
    Interactive(InteractiveArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Tab-separated document file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Query terms
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Also report per-term match counts
    #[arg(long)]
    pub explain: bool,
}

impl SearchArgs {
    /// The query terms joined back into one query string.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for range lookups
#[derive(Parser, Debug, Clone)]
pub struct RangeArgs {
    /// Tab-separated document file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Lowest term (inclusive)
    #[arg(value_name = "LOW")]
    pub low: String,

    /// Highest term (inclusive)
    #[arg(value_name = "HIGH")]
    pub high: String,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Tab-separated document file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Validate index invariants as well
    #[arg(long)]
    pub validate: bool,
}

/// Arguments for the interactive loop
#[derive(Parser, Debug, Clone)]
pub struct InteractiveArgs {
    /// Tab-separated document file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
