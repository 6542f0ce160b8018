//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! A TOML file (if given) is loaded first and CLI flags override it.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub round: RoundConfig,
    #[serde(default)]
    pub pi: PiConfig,
    #[serde(default)]
    pub lines: LinesConfig,
    #[serde(default)]
    pub sum: SumConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Build the effective configuration from CLI arguments
    ///
    /// Loads `--config` if present, then applies CLI overrides.
    pub fn from_cli(cli: &cli::Cli) -> Result<Self> {
        let base = match cli.config {
            Some(ref path) => self::toml::parse_toml_file(path)?,
            None => Config::default(),
        };
        self::toml::merge_cli_with_config(cli, base)
    }
}

/// Worker group settings shared by every round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Number of workers in the group
    #[serde(default = "default_workers")]
    pub workers: u32,
    /// Base for per-worker seed derivation
    #[serde(default = "default_seed_base")]
    pub seed_base: u64,
}

fn default_workers() -> u32 {
    num_cpus::get().max(1) as u32
}

fn default_seed_base() -> u64 {
    1234
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            seed_base: default_seed_base(),
        }
    }
}

/// Monte Carlo π round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Total samples across all workers
    #[serde(default = "default_samples")]
    pub samples: u64,
}

fn default_true() -> bool {
    true
}

fn default_samples() -> u64 {
    5_000_000
}

impl Default for PiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            samples: default_samples(),
        }
    }
}

/// Line counting round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinesConfig {
    /// Files to count, in order
    #[serde(default)]
    pub files: Vec<String>,
    /// Generate a demo dataset when no files are listed
    #[serde(default)]
    pub make_dummy: bool,
    #[serde(default)]
    pub dummy: DummyConfig,
    /// Count the `data*.txt` files already present here when no files are
    /// listed and no demo dataset is generated
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Demo dataset generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DummyConfig {
    #[serde(default = "default_dummy_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_dummy_files")]
    pub files: usize,
    #[serde(default = "default_dummy_lines")]
    pub lines_per_file: usize,
}

fn default_dummy_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_dummy_files() -> usize {
    4
}

fn default_dummy_lines() -> usize {
    100_000
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            dir: default_dummy_dir(),
            files: default_dummy_files(),
            lines_per_file: default_dummy_lines(),
        }
    }
}

/// Range summation round (runs only when `n` is set)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumConfig {
    pub n: Option<u64>,
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Files listed individually in the text report
    #[serde(default = "default_max_listed")]
    pub max_listed: usize,
    /// JSON report destination (stdout when unset)
    pub json_path: Option<PathBuf>,
}

fn default_max_listed() -> usize {
    8
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            max_listed: default_max_listed(),
            json_path: None,
        }
    }
}

// Display trait implementations

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Workers: {} (seed base {})", self.round.workers, self.round.seed_base)?;
        if self.pi.enabled {
            writeln!(f, "  Pi: {} samples", self.pi.samples)?;
        } else {
            writeln!(f, "  Pi: disabled")?;
        }
        if !self.lines.files.is_empty() {
            writeln!(f, "  Lines: {} file(s)", self.lines.files.len())?;
        } else if self.lines.make_dummy {
            writeln!(
                f,
                "  Lines: {} dummy file(s) x {} lines in {}",
                self.lines.dummy.files,
                self.lines.dummy.lines_per_file,
                self.lines.dummy.dir.display()
            )?;
        } else if let Some(ref dir) = self.lines.data_dir {
            writeln!(f, "  Lines: data*.txt in {}", dir.display())?;
        } else {
            writeln!(f, "  Lines: no files")?;
        }
        if let Some(n) = self.sum.n {
            writeln!(f, "  Sum: 1..={}", n)?;
        }
        write!(f, "  Output: {}", self.output.format)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
