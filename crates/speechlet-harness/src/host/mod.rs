//! Line-oriented host binding for a [`SkillRouter`].
//!
//! Each non-blank input line is one JSON envelope. Every envelope produces
//! exactly one output line: the serialised response on success, or an error
//! object of the form `{"error":{"kind":"...","message":"..."}}`.

use std::io::{self, BufRead, Read, Write};

use tracing::{debug, warn};

use speechlet::{InvocationContext, SkillRouter};

use crate::output::OutputWriter;

/// Tracing target for host events.
const HOST_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::host");

/// Error kind written for envelopes over the configured size limit.
pub const ENVELOPE_TOO_LARGE: &str = "envelope_too_large";

/// Counts of envelopes processed by one [`LineHost::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostSummary {
    /// Envelopes that produced a response.
    pub handled: usize,
    /// Envelopes that produced an error line.
    pub failed: usize,
}

impl HostSummary {
    /// Returns `true` when no envelope failed.
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Feeds JSON-line envelopes through a router.
#[derive(Debug)]
pub struct LineHost<'r> {
    router: &'r SkillRouter,
    max_envelope_bytes: usize,
}

/// One framed input line.
enum Line {
    Envelope(Vec<u8>),
    TooLarge,
}

impl<'r> LineHost<'r> {
    /// Creates a host that rejects envelopes longer than `max_envelope_bytes`.
    #[must_use]
    pub const fn new(router: &'r SkillRouter, max_envelope_bytes: usize) -> Self {
        Self {
            router,
            max_envelope_bytes,
        }
    }

    /// Processes `input` until end of stream, writing one line per envelope.
    ///
    /// Invocation failures are reported in-band and counted; they never stop
    /// the loop.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading the input or writing the output fails.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, output: W) -> io::Result<HostSummary> {
        let mut writer = OutputWriter::new(output);
        let mut summary = HostSummary::default();
        let mut sequence: u64 = 0;

        while let Some(line) = read_line(&mut input, self.max_envelope_bytes)? {
            if let Line::Envelope(bytes) = &line
                && bytes.iter().all(u8::is_ascii_whitespace)
            {
                continue;
            }
            sequence += 1;
            let invocation_id = sequence.to_string();

            match line {
                Line::TooLarge => {
                    warn!(
                        target: HOST_TARGET,
                        invocation_id = %invocation_id,
                        limit = self.max_envelope_bytes,
                        "envelope exceeds size limit"
                    );
                    let message = format!(
                        "envelope exceeds the {} byte limit",
                        self.max_envelope_bytes
                    );
                    writer.write_error(ENVELOPE_TOO_LARGE, &message)?;
                    summary.failed += 1;
                }
                Line::Envelope(bytes) => {
                    let context = InvocationContext::new().with_invocation_id(invocation_id);
                    match self.router.handle_json(&context, &bytes) {
                        Ok(json) => {
                            writer.write_response(&json)?;
                            summary.handled += 1;
                        }
                        Err(error) => {
                            warn!(
                                target: HOST_TARGET,
                                invocation_id = context.invocation_id(),
                                kind = error.kind(),
                                %error,
                                "invocation failed"
                            );
                            writer.write_error(error.kind(), &error.to_string())?;
                            summary.failed += 1;
                        }
                    }
                }
            }
        }

        debug!(
            target: HOST_TARGET,
            handled = summary.handled,
            failed = summary.failed,
            "input exhausted"
        );
        Ok(summary)
    }
}

/// Reads one line of at most `limit` bytes, excluding the newline.
///
/// Longer lines are drained up to the next newline so the following envelope
/// starts cleanly.
fn read_line<R: BufRead>(reader: &mut R, limit: usize) -> io::Result<Option<Line>> {
    let mut buffer = Vec::new();
    let cap = u64::try_from(limit).map_or(u64::MAX, |bytes| bytes.saturating_add(1));
    let read = reader.by_ref().take(cap).read_until(b'\n', &mut buffer)?;
    if read == 0 {
        return Ok(None);
    }

    let terminated = buffer.last() == Some(&b'\n');
    if terminated {
        buffer.pop();
    }
    if buffer.len() <= limit {
        return Ok(Some(Line::Envelope(buffer)));
    }
    if !terminated {
        reader.skip_until(b'\n')?;
    }
    Ok(Some(Line::TooLarge))
}

#[cfg(test)]
mod tests;
