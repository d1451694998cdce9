//! `powerbench`: measure the idle power floor of the compositing demo
//!
//! Every argument is forwarded to the demo app. Settings come from the
//! `POWERBENCH_*` environment variables; log verbosity from `RUST_LOG`.

use anyhow::{Context, Result};
use powerbench_core::{bench, config::BenchConfig, VERSION};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let passthrough: Vec<String> = std::env::args().skip(1).collect();
    debug!("powerbench {VERSION}");

    let config = BenchConfig::from_env().context("Failed to load configuration")?;
    let report = bench::run(&config, &passthrough).context("Benchmark run failed")?;

    println!("{report}");
    Ok(())
}
