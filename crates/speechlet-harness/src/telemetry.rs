//! Tracing setup for the harness.
//!
//! Standard output carries responses, so every log event goes to standard
//! error. The subscriber is process-global and installed at most once.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use speechlet_config::{Config, LogFormat};

static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Proof that the global subscriber is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Returns the format chosen by the call that installed the subscriber.
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }
}

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The filter directive did not parse.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Another subscriber was installed outside this module.
    #[error("failed to install log subscriber: {0}")]
    AlreadyInstalled(SetGlobalDefaultError),
}

/// Installs the subscriber described by `config` on first use.
///
/// Later calls leave the global state alone and report the format that was
/// installed first, whatever their own configuration says.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the filter directive does
/// not parse and [`TelemetryError::AlreadyInstalled`] when some other code
/// already owns the global subscriber.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED_FORMAT
        .get_or_try_init(|| install(config).map(|()| config.log_format()))
        .map(|format| TelemetryHandle { format: *format })
}

fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|error| TelemetryError::InvalidFilter {
        directive: directive.to_owned(),
        message: error.to_string(),
    })
}

fn install(config: &Config) -> Result<(), TelemetryError> {
    let filter = parse_filter(config.log_filter())?;
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    };
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("info")]
    #[case("off")]
    #[case("speechlet=debug,speechlet_harness=warn")]
    fn accepts_valid_filters(#[case] directive: &str) {
        assert!(parse_filter(directive).is_ok());
    }

    #[test]
    fn invalid_filter_names_the_directive() {
        let err = parse_filter("speechlet=loud").expect_err("unknown level");
        assert!(matches!(
            &err,
            TelemetryError::InvalidFilter { directive, .. } if directive == "speechlet=loud"
        ));
        assert!(err.to_string().starts_with("invalid log filter 'speechlet=loud'"));
    }

    #[test]
    fn repeated_initialisation_reports_the_first_format() {
        let first = initialise(&Config::default()).expect("first initialise");
        let second = initialise(&Config::default()).expect("second initialise");
        assert_eq!(first, second);
    }
}
