//! Device geometry constants.
//!
//! Compile-time counts for the board this firmware is built for. The
//! configuration layout arithmetic in [`crate::eeconfig`] and the migration
//! transforms are parameterized entirely by these values; they are supplied
//! here and never computed at runtime.

/// Number of configuration profiles stored in flash.
pub const NUM_PROFILES: usize = 4;

/// Number of keymap layers per profile.
pub const NUM_LAYERS: usize = 4;

/// Number of physical keys on the board.
pub const NUM_KEYS: usize = 64;

/// Number of advanced-key (tap-hold, null-bind, DKS, toggle) slots per
/// profile.
pub const NUM_ADVANCED_KEYS: usize = 32;

/// Size in bytes of one advanced-key entry.
pub const ADVANCED_KEY_SIZE: usize = 12;

/// Type tag stored in byte 2 of an advanced-key entry marking it as a
/// tap-hold binding.
pub const AK_TYPE_TAP_HOLD: u8 = 3;
