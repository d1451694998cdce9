//! Benchmark run
//!
//! Launch, measure, analyze. The steps run strictly in order on the calling
//! thread; the CSV path is the only thing passed between them.

use tracing::info;

use crate::analysis::{analyze, Report};
use crate::config::BenchConfig;
use crate::datalog::PowerLog;
use crate::error::Result;

/// Run one benchmark and return its report
///
/// `passthrough` is forwarded to the demo app ahead of its feature flags.
/// Measurement starts as soon as the app process is spawned; nothing waits
/// for the app to finish initializing.
pub fn run(config: &BenchConfig, passthrough: &[String]) -> Result<Report> {
    let mut app = config.launcher().launch(passthrough)?;

    let logger = config.power_logger();
    logger.run()?;
    app.reap();

    let report = analyze_file(config)?;
    info!("Result: {report}");
    Ok(report)
}

/// Analyze the power log left at the configured CSV path
pub fn analyze_file(config: &BenchConfig) -> Result<Report> {
    let log = PowerLog::read_file(&config.csv_path)?;
    info!(
        "Analyzing {} samples covering {:.1}s",
        log.len(),
        log.duration_secs()
    );
    Ok(analyze(log.samples()))
}
