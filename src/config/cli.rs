//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console report
    Text,
    /// Single JSON document
    Json,
}

/// scatter-reduce - partition, compute, and reduce across a worker group
#[derive(Parser, Debug, Default)]
#[command(name = "scatter-reduce")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file (CLI flags override its values)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // === Worker Group ===
    /// Number of workers (default: number of CPUs)
    #[arg(short = 'w', long, env = "SCATTER_REDUCE_WORKERS")]
    pub workers: Option<u32>,

    /// Base for per-worker seed derivation
    #[arg(long)]
    pub seed_base: Option<u64>,

    // === Monte Carlo ===
    /// Total Monte Carlo samples for pi (e.g., 5M, 500k, 5_000_000)
    #[arg(long)]
    pub pi_samples: Option<String>,

    /// Skip the pi round
    #[arg(long)]
    pub skip_pi: bool,

    // === Line Counting ===
    /// Files to count lines in
    #[arg(long, num_args = 1..)]
    pub files: Vec<String>,

    /// Create demo files when no --files are given
    #[arg(long)]
    pub make_dummy: bool,

    /// Directory for demo files
    #[arg(long)]
    pub dummy_dir: Option<PathBuf>,

    /// Number of demo files
    #[arg(long)]
    pub dummy_n: Option<usize>,

    /// Lines per demo file
    #[arg(long)]
    pub dummy_lines: Option<usize>,

    /// Count existing data*.txt files in this directory
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    // === Range Sum ===
    /// Also sum the integers 1..=N across the workers (e.g., 10M)
    #[arg(long, value_name = "N")]
    pub sum_n: Option<String>,

    // === Output ===
    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the JSON report to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// Number of files listed individually in the text report
    #[arg(long)]
    pub max_listed: Option<usize>,

    /// Validate configuration and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == Some(0) {
            anyhow::bail!("workers must be at least 1");
        }

        if self.skip_pi && self.pi_samples.is_some() {
            anyhow::bail!("--pi-samples conflicts with --skip-pi");
        }

        if !self.files.is_empty() && self.make_dummy {
            tracing::warn!("--files given, --make-dummy will be ignored");
        }

        Ok(())
    }
}
