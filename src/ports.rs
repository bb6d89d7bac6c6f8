//! Port traits — the boundary between domain logic and hardware.
//!
//! Driven adapters (flash, loggers) implement these traits. The migration
//! engine consumes them via generics, so the domain core never touches
//! ESP-IDF APIs directly and runs unchanged in host-side tests against
//! mocks.

use core::fmt;

// ── Flash port (driven adapter: domain ↔ config partition) ────

/// Raw access to the configuration flash region.
///
/// `write` is the wear-leveling write primitive: implementations MUST
/// guarantee that either the new content becomes the persisted content or
/// the call reports failure. The migration engine relies on exactly that
/// contract and implements no rollback of its own — on failure the
/// previously persisted blob remains authoritative.
pub trait FlashPort {
    /// Read `buf.len()` bytes starting at `offset` into `buf`.
    fn read(&self, offset: u32, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Persist `data` at `offset`, atomically or not at all.
    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), StorageError>;
}

// ── Error types ───────────────────────────────────────────────

/// Errors from [`FlashPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The requested range does not fit inside the partition.
    OutOfBounds,
    /// The backing partition could not be located.
    NotFound,
    /// Generic I/O error from the flash driver.
    IoError,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "range out of bounds"),
            Self::NotFound => write!(f, "partition not found"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
