//! Human-readable run output.

use std::io::Write;

use crate::error::{HarnessError, Result};

/// Writer for verdicts, progress counters and summaries.
///
/// Quiet mode silences everything except the final trial count of a batch,
/// which [`Console::always`] writes regardless.
#[derive(Debug)]
pub struct Console<W> {
    writer: W,
    quiet: bool,
}

impl<W: Write> Console<W> {
    pub(crate) const fn new(writer: W, quiet: bool) -> Self {
        Self { writer, quiet }
    }

    /// Writes `text` unless quiet.
    pub(crate) fn message(&mut self, text: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.always(text)
    }

    /// Writes `text` followed by a newline unless quiet.
    pub(crate) fn line(&mut self, text: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_and_flush(text, "\n")
    }

    /// Writes `text` even in quiet mode.
    pub(crate) fn always(&mut self, text: &str) -> Result<()> {
        self.write_and_flush(text, "")
    }

    fn write_and_flush(&mut self, text: &str, terminator: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.write_all(terminator.as_bytes()))
            .and_then(|()| self.writer.flush())
            .map_err(|source| HarnessError::Console { source })
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
