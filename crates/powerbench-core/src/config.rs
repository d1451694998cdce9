//! Benchmark configuration
//!
//! Defaults reproduce the original measurement setup. Each setting can be
//! overridden through a `POWERBENCH_*` environment variable.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::{BenchError, Result};
use crate::launcher::{AppLauncher, DemoFlag};
use crate::powerlog::PowerLogger;

/// Demo app bundle to launch
pub const APP_PATH_VAR: &str = "POWERBENCH_APP";
/// Program used to start the app bundle
pub const OPENER_VAR: &str = "POWERBENCH_OPENER";
/// Power Gadget `PowerLog` executable
pub const POWERLOG_VAR: &str = "POWERBENCH_POWERLOG";
/// CSV file shared between the logger and the analyzer
pub const CSV_PATH_VAR: &str = "POWERBENCH_CSV";
/// Measurement window in whole seconds
pub const DURATION_VAR: &str = "POWERBENCH_DURATION_SECS";
/// Comma-separated demo flags to enable
pub const FLAGS_VAR: &str = "POWERBENCH_FLAGS";

const DEFAULT_APP_PATH: &str = "/Users/mstange/Library/Developer/Xcode/DerivedData/\
    IOSurface_compositing-bjcctwkmkjgauvcndwtxseupglst/Build/Products/Debug/\
    IOSurface compositing.app";
const DEFAULT_OPENER: &str = "open";
const DEFAULT_POWERLOG_PATH: &str = "/Applications/Intel Power Gadget/PowerLog";
const DEFAULT_CSV_PATH: &str = "/tmp/powerlog.csv";
const DEFAULT_DURATION_SECS: u64 = 20;

/// Settings for one benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Demo app bundle
    pub app_path: PathBuf,
    /// Program that starts the bundle (`open` on macOS)
    pub opener: String,
    /// Power measurement executable
    pub powerlog_path: PathBuf,
    /// Where the power log is written and read back from
    pub csv_path: PathBuf,
    /// How long the logger samples
    pub duration: Duration,
    /// Optional demo flags; the termination flag is always added
    pub flags: Vec<DemoFlag>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            app_path: PathBuf::from(DEFAULT_APP_PATH),
            opener: DEFAULT_OPENER.to_string(),
            powerlog_path: PathBuf::from(DEFAULT_POWERLOG_PATH),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            duration: Duration::from_secs(DEFAULT_DURATION_SECS),
            flags: Vec::new(),
        }
    }
}

impl BenchConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(APP_PATH_VAR) {
            config.app_path = PathBuf::from(path);
        }
        if let Some(opener) = get(OPENER_VAR) {
            config.opener = opener;
        }
        if let Some(path) = get(POWERLOG_VAR) {
            config.powerlog_path = PathBuf::from(path);
        }
        if let Some(path) = get(CSV_PATH_VAR) {
            config.csv_path = PathBuf::from(path);
        }
        if let Some(secs) = get(DURATION_VAR) {
            config.duration = parse_duration(&secs)?;
        }
        if let Some(flags) = get(FLAGS_VAR) {
            config.flags = parse_flags(&flags)?;
        }

        debug!("Configuration: {config:?}");
        Ok(config)
    }

    /// Launcher for the demo app
    pub fn launcher(&self) -> AppLauncher {
        AppLauncher::new(&self.opener, &self.app_path, &self.flags)
    }

    /// Power logger invocation
    pub fn power_logger(&self) -> PowerLogger {
        PowerLogger::new(&self.powerlog_path, &self.csv_path, self.duration)
    }
}

fn parse_duration(value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(BenchError::Config {
            key: DURATION_VAR.to_string(),
            message: format!("expected a positive number of seconds, got '{value}'"),
        }),
    }
}

fn parse_flags(value: &str) -> Result<Vec<DemoFlag>> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.parse::<DemoFlag>().map_err(|message| BenchError::Config {
                key: FLAGS_VAR.to_string(),
                message,
            })
        })
        .collect()
}
