//! CLI to Config conversion utilities

use crate::config::cli;
use crate::config::OutputFormat;
use anyhow::{Context, Result};

/// Parse a count string (e.g., "5M", "500k", "5_000_000", "1,000") to a number
///
/// Suffixes are decimal: k = 10^3, m = 10^6, g = 10^9.
pub fn parse_count(s: &str) -> Result<u64> {
    let s: String = s
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '_' && *c != ',')
        .collect();

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('k') {
        (n, 1_000u64)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 1_000_000)
    } else if let Some(n) = s.strip_suffix('g') {
        (n, 1_000_000_000)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid count format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Count too large: {}", s))
}

/// Convert CLI OutputFormat to config OutputFormat
pub fn convert_output_format(cli_format: cli::OutputFormat) -> OutputFormat {
    match cli_format {
        cli::OutputFormat::Text => OutputFormat::Text,
        cli::OutputFormat::Json => OutputFormat::Json,
    }
}
