//! Demo application launcher
//!
//! Starts the compositing demo as an independent process. The launcher does
//! not wait for the app to come up before measurement begins, so the first
//! moments of the power log may precede app startup. The warm-up window in
//! [`crate::analysis`] absorbs most of that.

use std::fmt;
use std::path::PathBuf;
use std::process::{Child, Command};
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::error::{BenchError, Result};

/// Separator the opener uses before arguments meant for the app itself
const APP_ARGS_SEPARATOR: &str = "--args";

/// Feature flags understood by the compositing demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoFlag {
    /// Composite through an IOSurface instead of drawing directly
    UseIosurface,
    /// Mark the CALayer as opaque
    UseOpaqueCalayer,
    /// Mark the OpenGL context surface as opaque
    UseOpaqueGlcontext,
    /// Give the content view its own layer
    UseLayerForContentView,
    /// Ask the app to quit on its own after 20 seconds
    CloseAfter20Seconds,
}

impl DemoFlag {
    /// All known flags
    pub const ALL: [DemoFlag; 5] = [
        DemoFlag::UseIosurface,
        DemoFlag::UseOpaqueCalayer,
        DemoFlag::UseOpaqueGlcontext,
        DemoFlag::UseLayerForContentView,
        DemoFlag::CloseAfter20Seconds,
    ];

    /// Command-line form of the flag
    pub fn as_arg(&self) -> &'static str {
        match self {
            DemoFlag::UseIosurface => "--use-iosurface",
            DemoFlag::UseOpaqueCalayer => "--use-opaque-calayer",
            DemoFlag::UseOpaqueGlcontext => "--use-opaque-glcontext",
            DemoFlag::UseLayerForContentView => "--use-layer-for-content-view",
            DemoFlag::CloseAfter20Seconds => "--close-after-20-seconds",
        }
    }
}

impl fmt::Display for DemoFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl FromStr for DemoFlag {
    type Err = String;

    /// Accepts the flag with or without its leading dashes
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('-');
        DemoFlag::ALL
            .iter()
            .copied()
            .find(|flag| flag.as_arg().trim_start_matches('-') == name)
            .ok_or_else(|| format!("unknown demo flag '{}'", s.trim()))
    }
}

/// Builds and starts the demo app command
#[derive(Debug, Clone)]
pub struct AppLauncher {
    opener: String,
    app_path: PathBuf,
    flags: Vec<DemoFlag>,
}

impl AppLauncher {
    /// Create a launcher that runs `app_path` through `opener`
    ///
    /// `flags` are the optional feature flags; the termination flag is always
    /// added after them and need not be listed.
    pub fn new(
        opener: impl Into<String>,
        app_path: impl Into<PathBuf>,
        flags: &[DemoFlag],
    ) -> Self {
        let mut enabled: Vec<DemoFlag> = Vec::with_capacity(flags.len());
        for flag in flags {
            if *flag != DemoFlag::CloseAfter20Seconds && !enabled.contains(flag) {
                enabled.push(*flag);
            }
        }

        Self {
            opener: opener.into(),
            app_path: app_path.into(),
            flags: enabled,
        }
    }

    /// Arguments handed to the app: pass-through first, then flags
    pub fn app_args(&self, passthrough: &[String]) -> Vec<String> {
        passthrough
            .iter()
            .cloned()
            .chain(self.flags.iter().map(|f| f.as_arg().to_string()))
            .chain(std::iter::once(
                DemoFlag::CloseAfter20Seconds.as_arg().to_string(),
            ))
            .collect()
    }

    /// Build the full launch command
    pub fn command(&self, passthrough: &[String]) -> Command {
        let mut cmd = Command::new(&self.opener);
        cmd.arg(&self.app_path)
            .arg(APP_ARGS_SEPARATOR)
            .args(self.app_args(passthrough));
        cmd
    }

    /// Start the app without waiting for it to finish or become ready
    pub fn launch(&self, passthrough: &[String]) -> Result<LaunchedApp> {
        let mut cmd = self.command(passthrough);
        debug!("Launching: {}", describe(&cmd));

        let child = cmd.spawn().map_err(|source| BenchError::Spawn {
            program: self.opener.clone(),
            source,
        })?;
        info!("Started {} (pid {})", self.app_path.display(), child.id());

        Ok(LaunchedApp { child })
    }
}

/// Handle on the process started by [`AppLauncher::launch`]
#[derive(Debug)]
pub struct LaunchedApp {
    child: Child,
}

impl LaunchedApp {
    /// OS process id of the launched command
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Collect the process if it has exited, without blocking
    ///
    /// Returns `true` when the process has finished.
    pub fn reap(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(Some(status)) if status.success() => {
                debug!("Launcher exited: {status}");
                true
            }
            Ok(Some(status)) => {
                warn!("Launcher exited with {status}");
                true
            }
            Ok(None) => {
                debug!("App (pid {}) still running after measurement", self.id());
                false
            }
            Err(e) => {
                warn!("Could not query launched app: {e}");
                false
            }
        }
    }
}

/// Render arguments as one command line, quoting any that contain spaces
pub fn command_line<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            if arg.contains(' ') {
                format!("\"{arg}\"")
            } else {
                arg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human-readable form of a command for logging
pub(crate) fn describe(cmd: &Command) -> String {
    let parts: Vec<String> = std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    command_line(&parts)
}
