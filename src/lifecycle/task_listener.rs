//! Per-invocation diagnostic sinks.

use std::io::Write;

/// Write-only text sink handed to lifecycle handlers.
///
/// Output is best effort: a sink that cannot write drops the line.
pub trait TaskListener {
    /// Writes one line of diagnostics.
    fn log(&mut self, line: &str);
}

/// Discards everything. Used for deletions, which have no console.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl TaskListener for NullListener {
    fn log(&mut self, _line: &str) {}
}

/// Writes lines to any `Write` implementation, e.g. stderr or a build log.
#[derive(Debug)]
pub struct StreamListener<W: Write> {
    out: W,
}

impl<W: Write> StreamListener<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TaskListener for StreamListener<W> {
    fn log(&mut self, line: &str) {
        let _ = writeln!(self.out, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_listener_writes_lines() {
        let mut listener = StreamListener::new(Vec::new());
        listener.log("first");
        listener.log("second");
        assert_eq!(String::from_utf8(listener.into_inner()).unwrap(), "first\nsecond\n");
    }
}
