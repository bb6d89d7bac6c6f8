//! Fixed-capacity debug log buffer.
//!
//! A small text accumulator that boot-time code (notably the migration
//! engine's caller) writes into so that a host tool can dump the boot
//! transcript later over USB. Appends saturate: once the buffer is full,
//! further messages are dropped whole — callers must never assume delivery.
//!
//! Access is confined behind a single-owner handle with an explicit
//! lifecycle (create, append, clear) rather than an ambient global; the
//! [`BufferedLogger`](crate::adapters::log_sink::BufferedLogger) adapter
//! owns one instance for the `log` facade.

use core::fmt;

/// Capacity of the debug log buffer in bytes.
pub const LOG_BUFFER_SIZE: usize = 1024;

/// Saturating fixed-capacity text sink.
pub struct DebugLog {
    buf: heapless::String<LOG_BUFFER_SIZE>,
}

impl DebugLog {
    /// Create an empty log buffer.
    pub const fn new() -> Self {
        Self {
            buf: heapless::String::new(),
        }
    }

    /// Append a formatted message. If the message does not fit in the
    /// remaining capacity it is dropped entirely — no partial writes.
    pub fn append(&mut self, args: fmt::Arguments<'_>) {
        let before = self.buf.len();
        if fmt::Write::write_fmt(&mut self.buf, args).is_err() {
            self.buf.truncate(before);
        }
    }

    /// Discard all buffered text.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Buffered text so far.
    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been buffered since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for DebugLog {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Saturating: report success even when the text was dropped, so
        // `write!` callers never see a spurious error from a full buffer.
        self.append(format_args!("{s}"));
        Ok(())
    }

    // Route the whole record through `append` instead of letting the
    // default impl feed write_str one fragment at a time; a
    // multi-fragment `write!` near capacity is still dropped as a unit.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.append(args);
        Ok(())
    }
}
