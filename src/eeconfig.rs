//! Persisted configuration blob layout.
//!
//! The blob is a fixed-size byte structure living at offset 0 of the config
//! flash partition:
//!
//! ```text
//! ┌─────────────┬─────────┬────────────────┬──────────────────────┬───────────┐
//! │ magic_start │ version │ global section │ NUM_PROFILES profile │ magic_end │
//! │   (u16)     │  (u16)  │ (per-version)  │ sections (per-vers.) │   (u16)   │
//! └─────────────┴─────────┴────────────────┴──────────────────────┴───────────┘
//! ```
//!
//! Section sizes are version-specific; the constants below record the layout
//! of every schema revision this firmware knows how to read. The total size
//! [`EECONFIG_SIZE`] always covers the *current* version — older blobs occupy
//! a prefix of the same region.
//!
//! Multi-byte fields are stored in the platform's native byte order; this
//! layout is never exchanged between machines, only between firmware
//! revisions running on the same MCU.

use crate::geometry::{ADVANCED_KEY_SIZE, NUM_ADVANCED_KEYS, NUM_KEYS, NUM_LAYERS, NUM_PROFILES};

// ── Structural sentinels ──────────────────────────────────────

/// Leading sentinel; identical across every schema version.
pub const MAGIC_START: u16 = 0x0B5A;

/// Trailing sentinel; stamped after the last profile section.
pub const MAGIC_END: u16 = 0xA5B0;

/// Byte offset of `magic_start` within the blob.
pub const MAGIC_START_OFFSET: usize = 0;

/// Byte offset of the 16-bit schema version within the blob.
pub const VERSION_OFFSET: usize = 2;

// ── Schema versions ───────────────────────────────────────────

/// v1.0 — initial release layout.
pub const VERSION_V1_0: u16 = 0x0100;

/// v1.1 — adds global options, gamepad buttons, analog curve and
/// enable-flag bytes per profile; renumbers part of the keycode table.
pub const VERSION_V1_1: u16 = 0x0101;

/// Newest schema version this firmware writes.
pub const CURRENT_VERSION: u16 = VERSION_V1_1;

// ── Per-version section sizes ─────────────────────────────────

/// v1.0 global section: magic_start, version, calibration fields,
/// current/last-non-default profile indices.
pub const GLOBAL_CONFIG_SIZE_V1_0: usize = 12;

/// v1.0 profile section.
pub const PROFILE_CONFIG_SIZE_V1_0: usize = NUM_LAYERS * NUM_KEYS // Keymap
    + NUM_KEYS * 4                                                // Actuation map
    + NUM_ADVANCED_KEYS * ADVANCED_KEY_SIZE                       // Advanced keys
    + 1; // Tick rate

/// v1.1 global section: v1.0 plus a 16-bit `options` field.
pub const GLOBAL_CONFIG_SIZE_V1_1: usize = 14;

/// v1.1 profile section.
pub const PROFILE_CONFIG_SIZE_V1_1: usize = NUM_LAYERS * NUM_KEYS // Keymap
    + NUM_KEYS * 4                                                // Actuation map
    + NUM_ADVANCED_KEYS * ADVANCED_KEY_SIZE                       // Advanced keys
    + NUM_KEYS                                                    // Gamepad buttons
    + 9                                                           // Gamepad options
    + 1; // Tick rate

/// Total blob size for the current schema version, trailing sentinel
/// included. Fixed at compile time; migration rearranges the interior but
/// never changes this outer contract.
pub const EECONFIG_SIZE: usize =
    GLOBAL_CONFIG_SIZE_V1_1 + NUM_PROFILES * PROFILE_CONFIG_SIZE_V1_1 + 2;

/// Byte offset of `magic_end` within the current-version blob.
pub const MAGIC_END_OFFSET: usize = EECONFIG_SIZE - 2;

// ── Layout helpers ────────────────────────────────────────────

/// Offset of profile `p`'s section for a layout with the given section
/// sizes. Profiles are laid out contiguously immediately after the global
/// section.
pub const fn profile_offset(global_size: usize, profile_size: usize, p: usize) -> usize {
    global_size + p * profile_size
}

/// Read a native-endian u16 at `offset`.
pub fn read_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_ne_bytes([buf[offset], buf[offset + 1]])
}

/// Write a native-endian u16 at `offset`.
pub fn write_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_ne_bytes());
}
