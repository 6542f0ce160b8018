//! Human-readable text output

use super::{LinesOutcome, PiOutcome, SumOutcome};
use crate::util::time::{calculate_rate, format_duration, format_rate};

/// Print the banner shown before any round runs
pub fn print_header(workers: u32) {
    println!("scatter-reduce v{}", env!("CARGO_PKG_VERSION"));
    println!("Workers: {}", workers);
    println!();
}

/// Announce the Monte Carlo round
pub fn print_pi_start(samples: u64) {
    println!("[pi] Monte Carlo with {} total samples...", format_number(samples));
}

pub fn print_pi(outcome: &PiOutcome) {
    println!("{}", format_pi(outcome));
    println!();
}

/// Announce the line counting round, or that it is skipped
pub fn print_lines_start(files: usize) {
    if files == 0 {
        println!("[lines] No files provided, skipping line count.");
        println!();
    } else {
        println!("[lines] Counting lines in {} file(s)...", files);
    }
}

pub fn print_lines(outcome: &LinesOutcome, max_listed: usize) {
    for line in format_lines(outcome, max_listed) {
        println!("{}", line);
    }
    println!();
}

pub fn print_sum(outcome: &SumOutcome) {
    println!("{}", format_sum(outcome));
    println!();
}

/// Pi result line with elapsed time and sampling rate
pub fn format_pi(outcome: &PiOutcome) -> String {
    let rate = calculate_rate(outcome.samples, outcome.elapsed);
    format!(
        "[pi] pi ~ {:.12}  | time: {} ({} samples/s)",
        outcome.estimate,
        format_duration(outcome.elapsed),
        format_rate(rate)
    )
}

/// Per-file listing (first `max_listed` paths in order) and the global total
pub fn format_lines(outcome: &LinesOutcome, max_listed: usize) -> Vec<String> {
    let report = &outcome.report;
    let mut out = Vec::new();

    out.push("[lines] Results per file:".to_string());
    for (path, count) in report.per_file.iter().take(max_listed) {
        out.push(format!("   - {}: {} lines", path, format_number(*count)));
    }
    if report.per_file.len() > max_listed {
        out.push(format!("   ... and {} more", report.per_file.len() - max_listed));
    }
    out.push(format!(
        "[lines] Total lines (global) = {}  | time: {}",
        format_number(report.total),
        format_duration(outcome.elapsed)
    ));

    out
}

pub fn format_sum(outcome: &SumOutcome) -> String {
    format!(
        "[sum] 1 + ... + {} = {}  | time: {}",
        format_number(outcome.n),
        format_number(outcome.sum),
        format_duration(outcome.elapsed)
    )
}

/// Format number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::LineReport;
    use std::time::Duration;

    fn lines_outcome(files: usize) -> LinesOutcome {
        let per_file = (0..files).map(|i| (format!("data/f{:02}.txt", i), 1000 + i as u64)).collect();
        let total = (0..files).map(|i| 1000 + i as u64).sum();
        LinesOutcome {
            report: LineReport { per_file, total },
            elapsed: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(5_000_000), "5,000,000");
    }

    #[test]
    fn test_format_pi() {
        let line = format_pi(&PiOutcome {
            samples: 1_000_000,
            seed_base: 1234,
            estimate: 3.14159,
            elapsed: Duration::from_millis(500),
        });
        assert!(line.starts_with("[pi] pi ~ 3.141590000000"));
        assert!(line.contains("time: 500.000ms"));
        assert!(line.contains("2.00M samples/s"));
    }

    #[test]
    fn test_format_lines_truncates() {
        let lines = format_lines(&lines_outcome(10), 8);
        // header + 8 files + "more" + total
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "   - data/f00.txt: 1,000 lines");
        assert_eq!(lines[9], "   ... and 2 more");
        assert_eq!(lines[10], "[lines] Total lines (global) = 10,045  | time: 250.000ms");
    }

    #[test]
    fn test_format_lines_short_list() {
        let lines = format_lines(&lines_outcome(2), 8);
        assert_eq!(lines.len(), 4);
        assert!(!lines.iter().any(|l| l.contains("more")));
    }

    #[test]
    fn test_format_sum() {
        let line = format_sum(&SumOutcome {
            n: 10_000_000,
            sum: 50_000_005_000_000,
            elapsed: Duration::from_secs(1),
        });
        assert_eq!(line, "[sum] 1 + ... + 10,000,000 = 50,000,005,000,000  | time: 1.000s");
    }
}
