//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_round(&config.round)?;
    validate_pi(&config.pi)?;
    validate_lines(&config.lines)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate worker group configuration
pub fn validate_round(round: &RoundConfig) -> Result<()> {
    if round.workers == 0 {
        anyhow::bail!("workers must be at least 1");
    }

    Ok(())
}

/// Validate Monte Carlo configuration
pub fn validate_pi(pi: &PiConfig) -> Result<()> {
    if pi.enabled && pi.samples == 0 {
        anyhow::bail!("pi samples must be at least 1 (use --skip-pi to disable the round)");
    }

    Ok(())
}

/// Validate line counting configuration
pub fn validate_lines(lines: &LinesConfig) -> Result<()> {
    if lines.files.is_empty() && lines.make_dummy {
        if lines.dummy.files == 0 {
            anyhow::bail!("dummy file count must be at least 1");
        }
        if lines.dummy.dir.as_os_str().is_empty() {
            anyhow::bail!("dummy directory must not be empty");
        }
    }

    if let Some(empty) = lines.files.iter().position(|f| f.is_empty()) {
        anyhow::bail!("file list entry {} is empty", empty);
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.json_path.is_some() && output.format != OutputFormat::Json {
        anyhow::bail!("json_path is set but output format is {}", output.format);
    }

    Ok(())
}
