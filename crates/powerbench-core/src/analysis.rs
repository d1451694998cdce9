//! Baseline analysis
//!
//! Estimates the idle power floor of a run: warm-up rows and zero readings
//! are dropped, and the lowest fifth of what remains is averaged.

use std::fmt;

use tracing::debug;

use crate::datalog::PowerSample;

/// Samples before this many seconds are start-up transients
pub const WARMUP_SECS: f64 = 2.0;

/// The lowest `1 / LOWEST_FRACTION_DIVISOR` of samples form the baseline
pub const LOWEST_FRACTION_DIVISOR: usize = 5;

/// Printed when nothing survives filtering
pub const NO_DATA_MESSAGE: &str =
    "No power numbers collected. Was it run for less than two seconds?";

/// Outcome of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    /// Mean of the lowest samples
    Baseline {
        /// Average draw in watts
        watts: f64,
        /// Number of samples averaged
        samples_used: usize,
    },
    /// No usable samples
    NoData,
}

impl Report {
    /// Baseline in watts, if any
    pub fn watts(&self) -> Option<f64> {
        match self {
            Report::Baseline { watts, .. } => Some(*watts),
            Report::NoData => None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Baseline { watts, .. } => write!(f, "Power: {watts:.2} W"),
            Report::NoData => f.write_str(NO_DATA_MESSAGE),
        }
    }
}

/// Summed power of every sample past warm-up, zero readings removed
pub fn usable_watts(samples: &[PowerSample]) -> Vec<f64> {
    samples
        .iter()
        .filter(|s| s.elapsed_secs >= WARMUP_SECS)
        .map(PowerSample::total)
        .filter(|w| *w != 0.0)
        .collect()
}

/// Mean of the lowest fifth of `watts`
///
/// The count is floor-divided, so fewer than five values select nothing.
pub fn lowest_fraction_mean(mut watts: Vec<f64>) -> Report {
    watts.sort_by(f64::total_cmp);
    watts.truncate(watts.len() / LOWEST_FRACTION_DIVISOR);

    if watts.is_empty() {
        return Report::NoData;
    }

    let samples_used = watts.len();
    let mean = watts.iter().sum::<f64>() / samples_used as f64;
    Report::Baseline {
        watts: mean,
        samples_used,
    }
}

/// Compute the baseline report for a run
pub fn analyze(samples: &[PowerSample]) -> Report {
    let watts = usable_watts(samples);
    debug!("{} of {} samples usable", watts.len(), samples.len());
    lowest_fraction_mean(watts)
}
