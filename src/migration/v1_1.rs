//! v1.0 → v1.1 layout transforms.
//!
//! v1.1 renumbered part of the keycode table (inserting `KC_INT1` through
//! `KC_LNG6`), added a global `options` field, and grew each profile with
//! gamepad buttons, an analog response curve and enable flags. These
//! functions rewrite one v1.0 section into the v1.1 layout, populating
//! every byte of the destination.

use super::MigrationError;
use super::cursor::{ReadCursor, WriteCursor};
use crate::eeconfig::{self, VERSION_V1_0};
use crate::geometry::{
    ADVANCED_KEY_SIZE, AK_TYPE_TAP_HOLD, NUM_ADVANCED_KEYS, NUM_KEYS, NUM_LAYERS,
};

/// Default analog response curve: linear, as four (x, y) points.
const DEFAULT_ANALOG_CURVE: [u8; 8] = [4, 20, 85, 95, 165, 170, 255, 255];

/// `keyboard_enabled` and `snappy_joystick` default on.
const DEFAULT_PROFILE_FLAGS: u8 = 0b0000_1001;

/// Translate a v1.0 keycode into its v1.1 value.
///
/// The v1.1 keycode table inserted new entries mid-range, shifting two
/// blocks of existing codes upward. Everything else is unchanged.
pub fn remap_keycode(code: u8) -> u8 {
    match code {
        // `KC_LNG1` and `KC_LNG2`
        0x70..=0x71 => code + 0x06,
        // `KC_LEFT_CTRL` ... `SP_MOUSE_BUTTON_5`
        0x72..=0x96 => code + 0x09,
        _ => code,
    }
}

/// Rewrite the v1.0 global section into the v1.1 layout.
pub fn global_config(dst: &mut [u8], src: &[u8]) -> Result<(), MigrationError> {
    let found = eeconfig::read_u16(src, eeconfig::VERSION_OFFSET);
    if found != VERSION_V1_0 {
        return Err(MigrationError::TransformRejected {
            expected: VERSION_V1_0,
            found,
        });
    }

    let mut src = ReadCursor::new(src);
    let mut dst = WriteCursor::new(dst);

    // Copy `magic_start` through `calibration`
    dst.copy_from(&mut src, 10);
    // Default `options` to 0
    dst.put_u16(0);
    // Copy `current_profile` and `last_non_default_profile`
    dst.copy_from(&mut src, 2);

    Ok(())
}

/// Rewrite one v1.0 profile section into the v1.1 layout.
pub fn profile_config(_profile: u8, dst: &mut [u8], src: &[u8]) -> Result<(), MigrationError> {
    let mut src = ReadCursor::new(src);
    let mut dst = WriteCursor::new(dst);

    // Copy `keymap` and `actuation_map`, then renumber keycodes in place
    let keymap_at = dst.position();
    dst.copy_from(&mut src, NUM_LAYERS * NUM_KEYS + NUM_KEYS * 4);
    for key in dst.span_mut(keymap_at, NUM_LAYERS * NUM_KEYS) {
        *key = remap_keycode(*key);
    }

    // Copy `advanced_keys`; default the new `hold_on_other_key_press`
    // field to 0 for tap-hold entries
    let advanced_keys_at = dst.position();
    dst.copy_from(&mut src, NUM_ADVANCED_KEYS * ADVANCED_KEY_SIZE);
    for i in 0..NUM_ADVANCED_KEYS {
        let entry = dst.span_mut(advanced_keys_at + i * ADVANCED_KEY_SIZE, ADVANCED_KEY_SIZE);
        if entry[2] == AK_TYPE_TAP_HOLD {
            entry[7] = 0;
        }
    }

    // Set `gamepad_buttons` to 0
    dst.fill(0, NUM_KEYS);
    // Default `analog_curve` to linear
    for point in DEFAULT_ANALOG_CURVE {
        dst.put_u8(point);
    }
    // Default `keyboard_enabled` and `snappy_joystick` to true
    dst.put_u8(DEFAULT_PROFILE_FLAGS);
    // Copy `tick_rate`
    dst.copy_from(&mut src, 1);

    Ok(())
}
