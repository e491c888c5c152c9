use clap::ValueEnum;
use strum::{Display, EnumString};

/// How the harness renders log events on standard error.
///
/// `--help` lists both spellings; parsing ignores ASCII case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, ValueEnum)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Flattened JSON events, one per line.
    #[default]
    Json,
    /// Terse single-line text for terminals.
    Compact,
}
