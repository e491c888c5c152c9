//! JSON-lines framing for host results.

use std::io::{self, Write};

use serde::Serialize;

/// Error payload written in place of a response.
#[derive(Debug, Serialize)]
struct ErrorLine<'a> {
    error: ErrorBody<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    kind: &'a str,
    message: &'a str,
}

/// Writes one result per line and flushes after each.
pub(crate) struct OutputWriter<W> {
    writer: W,
}

impl<W: Write> OutputWriter<W> {
    pub(crate) const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes an already serialised response.
    pub(crate) fn write_response(&mut self, json: &str) -> io::Result<()> {
        self.writer.write_all(json.as_bytes())?;
        self.finish_line()
    }

    /// Writes `{"error":{"kind":...,"message":...}}`.
    pub(crate) fn write_error(&mut self, kind: &str, message: &str) -> io::Result<()> {
        serde_json::to_writer(
            &mut self.writer,
            &ErrorLine {
                error: ErrorBody { kind, message },
            },
        )?;
        self.finish_line()
    }

    fn finish_line(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
