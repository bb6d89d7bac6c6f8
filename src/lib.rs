//! HallKey firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.
//!
//! The heart of this crate is the boot-time configuration migration engine
//! ([`migration`]): it upgrades the persisted configuration blob through a
//! chain of schema versions before any other subsystem reads it.

#![deny(unused_must_use)]

pub mod debug_log;
pub mod eeconfig;
pub mod error;
pub mod geometry;
pub mod migration;
pub mod ports;

// Adapters compile on every target; the ESP-IDF backends inside are
// guarded by cfg attributes, with an in-memory simulation fallback.
pub mod adapters;
