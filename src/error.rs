//! Unified error types for the HallKey firmware.
//!
//! Follows embedded practice: a single `Error` enum that every subsystem
//! can convert into, keeping top-level error handling uniform. All variants
//! are `Copy` so they can be cheaply passed around without allocation.

use core::fmt;

use crate::migration::MigrationError;
use crate::ports::StorageError;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration migration aborted.
    Migration(MigrationError),
    /// Flash storage access failed.
    Storage(StorageError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Migration(e) => write!(f, "migration: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl From<MigrationError> for Error {
    fn from(e: MigrationError) -> Self {
        Self::Migration(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
