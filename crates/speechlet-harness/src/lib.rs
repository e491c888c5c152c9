//! Test harness host for speechlet skills.
//!
//! The harness reads request envelopes from standard input, one JSON object
//! per line, dispatches each through the demonstration [`SkillRouter`], and
//! writes one JSON line per envelope to standard output. Logs go to standard
//! error.
//!
//! Exit status is `0` when every envelope produced a response, `1` when any
//! envelope failed, and `2` when the harness itself could not run.
//!
//! [`SkillRouter`]: speechlet::SkillRouter

pub mod demo;
pub mod host;
mod output;
pub mod telemetry;

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use thiserror::Error;
use tracing::info;

use speechlet::RouterError;
use speechlet_config::{Config, ConfigError};

use self::host::{HostSummary, LineHost};
use self::telemetry::TelemetryError;

pub use self::host::ENVELOPE_TOO_LARGE;

const HARNESS_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Failures that stop the harness before or while serving envelopes.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration could not be loaded, or help text was requested.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Telemetry could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    /// The skill's handlers could not be registered.
    #[error("failed to build skill router: {0}")]
    Router(#[from] RouterError),
    /// Reading envelopes or writing results failed.
    #[error("harness I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Process outcome of one harness run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessStatus {
    /// Every envelope produced a response, or help text was printed.
    Success,
    /// At least one envelope produced an error line.
    InvocationFailures,
    /// The harness could not start or lost its input or output.
    Infrastructure,
}

impl HarnessStatus {
    /// Returns the process exit code for this outcome.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::InvocationFailures => 1,
            Self::Infrastructure => 2,
        }
    }

    const fn from_summary(summary: HostSummary) -> Self {
        if summary.all_succeeded() {
            Self::Success
        } else {
            Self::InvocationFailures
        }
    }
}

impl From<HarnessStatus> for ExitCode {
    fn from(status: HarnessStatus) -> Self {
        Self::from(status.code())
    }
}

/// Runs the harness and returns the process exit code.
pub fn run<I, T, R, W, E>(args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: BufRead,
    W: Write,
    E: Write,
{
    execute(args, stdin, stdout, stderr).into()
}

/// Runs the harness and reports its outcome.
///
/// Help and version requests are written to `stdout`; every other startup or
/// I/O failure is written to `stderr`.
pub fn execute<I, T, R, W, E>(args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> HarnessStatus
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: BufRead,
    W: Write,
    E: Write,
{
    match serve(args, stdin, &mut *stdout) {
        Ok(summary) => HarnessStatus::from_summary(summary),
        Err(HarnessError::Config(error)) if error.is_informational() => {
            let _ = write!(stdout, "{error}");
            HarnessStatus::Success
        }
        Err(error) => {
            let _ = writeln!(stderr, "speechlet-harness: {error}");
            HarnessStatus::Infrastructure
        }
    }
}

fn serve<I, T, R, W>(args: I, stdin: R, stdout: W) -> Result<HostSummary, HarnessError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: BufRead,
    W: Write,
{
    let config = Config::load_from_iter(args)?;
    let logging = telemetry::initialise(&config)?;
    let router = demo::router()?;
    info!(
        target: HARNESS_TARGET,
        log_format = %logging.format(),
        intents = ?router.intent_names(),
        max_envelope_bytes = config.max_envelope_bytes(),
        "harness ready"
    );
    let summary = LineHost::new(&router, config.max_envelope_bytes()).run(stdin, stdout)?;
    info!(
        target: HARNESS_TARGET,
        handled = summary.handled,
        failed = summary.failed,
        "harness finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests;
