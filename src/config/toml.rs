//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{convert_output_format, parse_count};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Worker group
    if let Some(workers) = cli.workers {
        config.round.workers = workers;
    }
    if let Some(seed_base) = cli.seed_base {
        config.round.seed_base = seed_base;
    }

    // Monte Carlo
    if let Some(ref samples) = cli.pi_samples {
        config.pi.samples = parse_count(samples).context("Invalid --pi-samples")?;
    }
    if cli.skip_pi {
        config.pi.enabled = false;
    }

    // Line counting
    if !cli.files.is_empty() {
        config.lines.files = cli.files.clone();
    }
    if cli.make_dummy {
        config.lines.make_dummy = true;
    }
    if let Some(ref dir) = cli.dummy_dir {
        config.lines.dummy.dir = dir.clone();
    }
    if let Some(n) = cli.dummy_n {
        config.lines.dummy.files = n;
    }
    if let Some(lines) = cli.dummy_lines {
        config.lines.dummy.lines_per_file = lines;
    }
    if let Some(ref dir) = cli.data_dir {
        config.lines.data_dir = Some(dir.clone());
    }

    // Range sum
    if let Some(ref n) = cli.sum_n {
        config.sum.n = Some(parse_count(n).context("Invalid --sum-n")?);
    }

    // Output
    if let Some(format) = cli.format {
        config.output.format = convert_output_format(format);
    }
    if let Some(ref path) = cli.json_output {
        config.output.json_path = Some(path.clone());
        // A JSON destination implies JSON output
        config.output.format = OutputFormat::Json;
    }
    if let Some(max) = cli.max_listed {
        config.output.max_listed = max;
    }

    Ok(config)
}
