//! Power Logs
//!
//! Reads the CSV written by Intel Power Gadget's `PowerLog`.

mod format;

pub use format::{
    parse_csv, split_record, ELAPSED_COLUMN, IA_POWER_COLUMN, PROCESSOR_POWER_COLUMN,
};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{BenchError, Result};

/// A single row of the power log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    /// Seconds since the logger started sampling
    pub elapsed_secs: f64,
    /// Package power in watts
    pub processor_watts: f64,
    /// Core (IA) power in watts
    pub ia_watts: f64,
}

impl PowerSample {
    /// Create a new sample
    pub fn new(elapsed_secs: f64, processor_watts: f64, ia_watts: f64) -> Self {
        Self {
            elapsed_secs,
            processor_watts,
            ia_watts,
        }
    }

    /// Combined draw used for the baseline
    pub fn total(&self) -> f64 {
        self.processor_watts + self.ia_watts
    }
}

/// Samples read from one logger run, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerLog {
    samples: Vec<PowerSample>,
}

impl PowerLog {
    /// Wrap already-parsed samples
    pub fn new(samples: Vec<PowerSample>) -> Self {
        Self { samples }
    }

    /// Parse log content
    pub fn parse(content: &str) -> Result<Self> {
        parse_csv(content).map(Self::new)
    }

    /// Read and parse a log file
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BenchError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let log = Self::parse(&content)?;
        debug!("Read {} samples from {}", log.len(), path.display());
        Ok(log)
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get all samples
    pub fn samples(&self) -> &[PowerSample] {
        &self.samples
    }

    /// Elapsed time of the last sample
    pub fn duration_secs(&self) -> f64 {
        self.samples.last().map(|s| s.elapsed_secs).unwrap_or_default()
    }
}
