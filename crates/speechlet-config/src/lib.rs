//! Configuration for the speechlet test harness.
//!
//! Settings resolve in the order command-line flag, then `SPEECHLET_*`
//! environment variable, then built-in default. Invalid values fail fast with
//! a [`ConfigError`] before the harness reads any input.
//!
//! | Setting | Flag | Environment | Default |
//! |---------|------|-------------|---------|
//! | Tracing filter | `--log-filter` | `SPEECHLET_LOG_FILTER` | `info` |
//! | Log format | `--log-format` | `SPEECHLET_LOG_FORMAT` | `json` |
//! | Envelope size limit | `--max-envelope-bytes` | `SPEECHLET_MAX_ENVELOPE_BYTES` | 1 MiB |

mod defaults;
mod logging;

use std::ffi::OsString;

use clap::Parser;
use clap::error::ErrorKind;
use thiserror::Error;

pub use self::defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_ENVELOPE_BYTES, default_log_filter, default_log_format,
    default_max_envelope_bytes,
};
pub use self::logging::LogFormat;

/// Environment variable overriding the log filter.
pub const LOG_FILTER_ENV: &str = "SPEECHLET_LOG_FILTER";
/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "SPEECHLET_LOG_FORMAT";
/// Environment variable overriding the envelope size limit.
pub const MAX_ENVELOPE_BYTES_ENV: &str = "SPEECHLET_MAX_ENVELOPE_BYTES";

/// Resolved harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "speechlet-harness",
    version,
    about = "Dispatches skill request envelopes read from standard input, one JSON object per line."
)]
pub struct Config {
    /// Tracing filter directive, for example `info` or `speechlet=debug`.
    #[arg(long, env = LOG_FILTER_ENV, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,

    /// Log output format: `json` or `compact`.
    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        default_value_t = default_log_format(),
        ignore_case = true
    )]
    log_format: LogFormat,

    /// Largest accepted envelope, in bytes.
    #[arg(
        long,
        env = MAX_ENVELOPE_BYTES_ENV,
        default_value_t = DEFAULT_MAX_ENVELOPE_BYTES,
        value_parser = parse_envelope_limit
    )]
    max_envelope_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: default_log_format(),
            max_envelope_bytes: DEFAULT_MAX_ENVELOPE_BYTES,
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Arguments`] when a flag or environment value is
    /// invalid, or when `--help` or `--version` was requested.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::try_parse()?)
    }

    /// Loads configuration from explicit arguments and the environment.
    ///
    /// The first item is the program name, as with `std::env::args_os`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Arguments`] when a flag or environment value is
    /// invalid, or when `--help` or `--version` was requested.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::try_parse_from(args)?)
    }

    /// Returns the tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the largest accepted envelope, in bytes.
    #[must_use]
    pub const fn max_envelope_bytes(&self) -> usize {
        self.max_envelope_bytes
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A flag or environment value could not be parsed, or help was requested.
    #[error(transparent)]
    Arguments(#[from] clap::Error),
}

impl ConfigError {
    /// Returns `true` when the error carries requested help or version text
    /// rather than a failure.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        match self {
            Self::Arguments(error) => matches!(
                error.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ),
        }
    }
}

fn parse_envelope_limit(value: &str) -> Result<usize, String> {
    let limit: usize = value
        .trim()
        .parse()
        .map_err(|error| format!("'{value}' is not a byte count: {error}"))?;
    if limit == 0 {
        return Err("the envelope size limit must be at least one byte".to_owned());
    }
    Ok(limit)
}
