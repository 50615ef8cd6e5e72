//! Log sink seam and stock adapters.
//!
//! A sink is anywhere a finished log line can go. The middleware writes and
//! walks away: no acknowledgment, no retry, no error surface. A sink that
//! wants durability implements it behind [`Sink::write`].

use std::io::Write;
use std::sync::Mutex;

/// Destination for formatted log lines.
///
/// `write` receives one complete, newline-terminated line per call. The
/// call is fire-and-forget — failures are the sink's own business and must
/// not propagate back into the request path.
pub trait Sink: Send + Sync {
    fn write(&self, line: &str);
}

// ── StdoutSink ────────────────────────────────────────────────────────────────

/// Writes lines to standard output. Write errors are ignored.
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&self, line: &str) {
        let _ = std::io::stdout().lock().write_all(line.as_bytes());
    }
}

// ── WriterSink ────────────────────────────────────────────────────────────────

/// Adapts any [`std::io::Write`] — a file, a pipe, a test buffer — into a
/// [`Sink`]. The writer sits behind a mutex; write errors are ignored.
///
/// ```rust
/// use traza::{Sink, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.write("one line\n");
/// assert_eq!(sink.into_inner(), b"one line\n");
/// ```
pub struct WriterSink<W>(Mutex<W>);

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self(Mutex::new(writer))
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.0.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, line: &str) {
        if let Ok(mut writer) = self.0.lock() {
            let _ = writer.write_all(line.as_bytes());
        }
    }
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// Bridges lines into the [`tracing`] ecosystem at `info` level, for
/// deployments where a `tracing` subscriber already owns the output.
pub struct TracingSink;

impl Sink for TracingSink {
    fn write(&self, line: &str) {
        tracing::info!(target: "traza", "{}", line.trim_end());
    }
}
