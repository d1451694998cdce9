//! Power Gadget logger invocation
//!
//! Runs `PowerLog` for a fixed window and waits for it to finish. The
//! utility times itself; nothing here enforces the duration.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{BenchError, Result};
use crate::launcher::describe;

/// External power measurement utility
#[derive(Debug, Clone)]
pub struct PowerLogger {
    program: PathBuf,
    csv_path: PathBuf,
    duration: Duration,
}

impl PowerLogger {
    /// Create a logger invocation writing to `csv_path`
    pub fn new(
        program: impl Into<PathBuf>,
        csv_path: impl Into<PathBuf>,
        duration: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            csv_path: csv_path.into(),
            duration,
        }
    }

    /// Path the utility writes its CSV log to
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Sampling window in the utility's `<seconds>s` notation
    pub fn duration_arg(&self) -> String {
        format!("{}s", self.duration.as_secs())
    }

    /// Build the logger command with stdout discarded
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-file")
            .arg(&self.csv_path)
            .arg("-duration")
            .arg(self.duration_arg())
            .stdout(Stdio::null());
        cmd
    }

    /// Run the utility to completion
    ///
    /// A non-zero exit is only logged; whatever the utility managed to write
    /// is still analyzed.
    pub fn run(&self) -> Result<ExitStatus> {
        let mut cmd = self.command();
        debug!("Measuring: {}", describe(&cmd));
        info!(
            "Logging power for {} to {}",
            self.duration_arg(),
            self.csv_path.display()
        );

        let status = cmd.status().map_err(|source| BenchError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        if !status.success() {
            warn!("{} exited with {status}", self.program.display());
        }
        Ok(status)
    }
}
