//! Buffered logger adapter.
//!
//! Implements the `log` facade by mirroring every record to the serial
//! console (UART / USB-CDC in production) and into a fixed-capacity
//! [`DebugLog`] buffer, so a host tool can dump the boot transcript —
//! including the migration outcome — after the fact. Once the buffer is
//! full, further records still reach the console but are no longer
//! retained.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::debug_log::{DebugLog, LOG_BUFFER_SIZE};

/// Logger retaining recent records in a [`DebugLog`].
pub struct BufferedLogger {
    level: LevelFilter,
    buf: Mutex<DebugLog>,
}

/// The process-wide logger instance; install with [`BufferedLogger::install`].
pub static LOGGER: BufferedLogger = BufferedLogger::new(LevelFilter::Info);

impl BufferedLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self {
            level,
            buf: Mutex::new(DebugLog::new()),
        }
    }

    /// Register this logger with the `log` facade. Called once at startup.
    pub fn install(&'static self) -> Result<(), log::SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.level);
        Ok(())
    }

    /// Copy out the buffered transcript.
    pub fn dump(&self) -> heapless::String<LOG_BUFFER_SIZE> {
        let mut out = heapless::String::new();
        if let Ok(buf) = self.buf.lock() {
            // The buffer never exceeds the capacity of `out`.
            let _ = out.push_str(buf.as_str());
        }
        out
    }

    /// Discard the buffered transcript.
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buf.lock() {
            buf.clear();
        }
    }
}

impl Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = match record.level() {
            Level::Error => "E",
            Level::Warn => "W",
            Level::Info => "I",
            Level::Debug => "D",
            Level::Trace => "T",
        };
        println!("{level} ({}) {}", record.target(), record.args());

        if let Ok(mut buf) = self.buf.lock() {
            buf.append(format_args!("{level} {}\n", record.args()));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: Level, msg: &str) -> String {
        // Feed a synthetic record through a fresh logger and return the
        // retained transcript.
        let logger = BufferedLogger::new(LevelFilter::Info);
        logger.log(
            &Record::builder()
                .level(level)
                .target("test")
                .args(format_args!("{msg}"))
                .build(),
        );
        logger.dump().as_str().to_string()
    }

    #[test]
    fn info_records_are_retained() {
        assert_eq!(record(Level::Info, "flash opened"), "I flash opened\n");
    }

    #[test]
    fn records_below_level_are_dropped() {
        assert_eq!(record(Level::Debug, "noisy detail"), "");
    }

    #[test]
    fn clear_discards_transcript() {
        let logger = BufferedLogger::new(LevelFilter::Info);
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("old"))
                .build(),
        );
        logger.clear();
        assert!(logger.dump().is_empty());
    }
}
