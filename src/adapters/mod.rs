//! Hardware adapters.
//!
//! Each adapter implements a port trait from [`crate::ports`] (or the
//! `log` facade). ESP-IDF backends are guarded by
//! `#[cfg(target_os = "espidf")]`; every adapter also carries an in-memory
//! simulation backend so the domain logic runs on the host unchanged.

pub mod flash;
pub mod log_sink;
