//! Timing helpers for rounds and reports
//!
//! Rounds are timed by the caller around each entry point and by the
//! coordinator around each worker's local call. Both the text and the JSON
//! report render elapsed times with [`format_duration`].

use std::time::{Duration, Instant};

/// Start point of a timed section
#[derive(Debug, Clone, Copy)]
pub struct Timestamp(Instant);

impl Timestamp {
    #[inline]
    pub fn now() -> Self {
        Self(Instant::now())
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }

    /// Elapsed time in whole microseconds, saturating
    #[inline]
    pub fn elapsed_micros(&self) -> u64 {
        u64::try_from(self.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Render an elapsed time at microsecond resolution
///
/// Sub-millisecond values print as whole microseconds, anything up to a minute
/// as milliseconds or seconds with three decimals, longer runs in minutes.
///
/// ```
/// use std::time::Duration;
/// use scatter_reduce::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_micros(150)), "150µs");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
/// ```
pub fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();

    if micros < 1_000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.3}ms", micros as f64 / 1_000.0)
    } else if micros < 60_000_000 {
        format!("{:.3}s", micros as f64 / 1_000_000.0)
    } else {
        format!("{:.2}m", micros as f64 / 60_000_000.0)
    }
}

/// Format a rate (items per second) with a K/M/G suffix
pub fn format_rate(rate: f64) -> String {
    if rate < 1_000.0 {
        format!("{:.0}", rate)
    } else if rate < 1_000_000.0 {
        format!("{:.2}K", rate / 1_000.0)
    } else if rate < 1_000_000_000.0 {
        format!("{:.2}M", rate / 1_000_000.0)
    } else {
        format!("{:.2}G", rate / 1_000_000_000.0)
    }
}

/// Items processed per second over `duration`; zero for a zero duration
pub fn calculate_rate(items: u64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        items as f64 / seconds
    } else {
        0.0
    }
}
