use crate::logging::LogFormat;

/// Default log filter expression used by the harness.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Largest envelope, in bytes, the harness accepts by default.
pub const DEFAULT_MAX_ENVELOPE_BYTES: usize = 1024 * 1024;

/// Default log filter expression used by the harness.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the harness.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default envelope size limit in bytes.
#[must_use]
pub const fn default_max_envelope_bytes() -> usize {
    DEFAULT_MAX_ENVELOPE_BYTES
}
