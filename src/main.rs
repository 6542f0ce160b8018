//! scatter-reduce CLI entry point
//!
//! Runs the configured rounds in order (pi, line count, range sum), timing
//! each call and printing the results.

use anyhow::{Context, Result};
use scatter_reduce::config::{cli::Cli, validator, Config, OutputFormat};
use scatter_reduce::output::{json, text, LinesOutcome, PiOutcome, RunReport, SumOutcome};
use scatter_reduce::util::logging::init_logging;
use scatter_reduce::util::time::Timestamp;
use scatter_reduce::{count_lines, dataset, estimate_pi, sum_range};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    cli.validate()?;

    let config = Config::from_cli(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;
    debug!(?config, "effective configuration");

    if cli.dry_run {
        println!("{}", config);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let report = run(&config)?;

    if config.output.format == OutputFormat::Json {
        json::write_json_output(&report, config.output.json_path.as_deref())?;
    } else {
        println!("Done.");
    }

    Ok(())
}

/// Run every enabled round, printing text progress as it goes
fn run(config: &Config) -> Result<RunReport> {
    let text_mode = config.output.format == OutputFormat::Text;
    let workers = config.round.workers;
    let mut report = RunReport::new(workers);

    if text_mode {
        text::print_header(workers);
    }

    // Monte Carlo pi
    if config.pi.enabled {
        if text_mode {
            text::print_pi_start(config.pi.samples);
        }
        let start = Timestamp::now();
        let estimate = estimate_pi(config.pi.samples, workers, config.round.seed_base)
            .context("Monte Carlo round failed")?;
        let outcome = PiOutcome {
            samples: config.pi.samples,
            seed_base: config.round.seed_base,
            estimate,
            elapsed: start.elapsed(),
        };
        if text_mode {
            text::print_pi(&outcome);
        }
        report.pi = Some(outcome);
    }

    // Line counting
    let files = dataset::resolve_inputs(&config.lines)?;
    if text_mode {
        text::print_lines_start(files.len());
    }
    if !files.is_empty() {
        let start = Timestamp::now();
        let lines = count_lines(&files, workers).context("Line count round failed")?;
        let outcome = LinesOutcome {
            report: lines,
            elapsed: start.elapsed(),
        };
        if text_mode {
            text::print_lines(&outcome, config.output.max_listed);
        }
        report.lines = Some(outcome);
    }

    // Range sum
    if let Some(n) = config.sum.n {
        let start = Timestamp::now();
        let sum = sum_range(n, workers).context("Range sum round failed")?;
        let outcome = SumOutcome {
            n,
            sum,
            elapsed: start.elapsed(),
        };
        if text_mode {
            text::print_sum(&outcome);
        }
        report.sum = Some(outcome);
    }

    Ok(report)
}
