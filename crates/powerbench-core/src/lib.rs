//! # powerbench Core Library
//!
//! Measures the idle power floor of the IOSurface compositing demo.

#![warn(missing_docs)]

//!
//! A run has three sequential steps:
//! - launch the demo app with its feature flags and a self-termination flag
//! - run Intel Power Gadget's `PowerLog` for a fixed duration
//! - read the CSV it wrote and average the lowest 20% of power samples
//!
//! ## Example
//!
//! ```rust,ignore
//! use powerbench_core::{bench, config::BenchConfig};
//!
//! let config = BenchConfig::from_env()?;
//! let report = bench::run(&config, &["--extra".to_string()])?;
//! println!("{report}");
//! ```

pub mod analysis;
pub mod bench;
pub mod config;
pub mod datalog;
pub mod error;
pub mod launcher;
pub mod powerlog;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::{analyze, Report};
    pub use crate::config::BenchConfig;
    pub use crate::datalog::{PowerLog, PowerSample};
    pub use crate::error::{BenchError, Result};
    pub use crate::launcher::{AppLauncher, DemoFlag, LaunchedApp};
    pub use crate::powerlog::PowerLogger;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
