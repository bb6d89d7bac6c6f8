//! End-to-end tests of the configuration migration engine against a spy
//! flash port, covering the full chain, the idempotent no-op path, and
//! every abort path (in which the flash must never be written).

use hallkey::eeconfig::{
    CURRENT_VERSION, EECONFIG_SIZE, GLOBAL_CONFIG_SIZE_V1_0, GLOBAL_CONFIG_SIZE_V1_1, MAGIC_END,
    MAGIC_END_OFFSET, MAGIC_START, MAGIC_START_OFFSET, PROFILE_CONFIG_SIZE_V1_0,
    PROFILE_CONFIG_SIZE_V1_1, VERSION_OFFSET, VERSION_V1_0, profile_offset, read_u16, write_u16,
};
use hallkey::geometry::{
    ADVANCED_KEY_SIZE, AK_TYPE_TAP_HOLD, NUM_ADVANCED_KEYS, NUM_KEYS, NUM_LAYERS, NUM_PROFILES,
};
use hallkey::migration::{MigrateStatus, MigrationError, try_migrate};
use hallkey::ports::{FlashPort, StorageError};

// ── Spy flash port ────────────────────────────────────────────

/// Records every write; never read by the engine.
#[derive(Default)]
struct SpyFlash {
    writes: Vec<(u32, Vec<u8>)>,
    fail_writes: bool,
}

impl FlashPort for SpyFlash {
    fn read(&self, _offset: u32, buf: &mut [u8]) -> Result<(), StorageError> {
        buf.fill(0);
        Ok(())
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        self.writes.push((offset, data.to_vec()));
        Ok(())
    }
}

// ── Blob builders ─────────────────────────────────────────────

// Offsets of the fields inside a profile section, shared by both layouts
// up to the advanced-keys block.
const KEYMAP_SIZE: usize = NUM_LAYERS * NUM_KEYS;
const ACTUATION_SIZE: usize = NUM_KEYS * 4;
const AK_BLOCK_AT: usize = KEYMAP_SIZE + ACTUATION_SIZE;
const GAMEPAD_AT: usize = AK_BLOCK_AT + NUM_ADVANCED_KEYS * ADVANCED_KEY_SIZE;

/// A populated v1.0 blob with recognizable per-field patterns.
fn v1_0_blob() -> [u8; EECONFIG_SIZE] {
    let mut blob = [0u8; EECONFIG_SIZE];
    write_u16(&mut blob, MAGIC_START_OFFSET, MAGIC_START);
    write_u16(&mut blob, VERSION_OFFSET, VERSION_V1_0);
    // Calibration bytes and profile indices.
    for i in 4..GLOBAL_CONFIG_SIZE_V1_0 {
        blob[i] = 0xC0 + i as u8;
    }
    for p in 0..NUM_PROFILES {
        let base = profile_offset(GLOBAL_CONFIG_SIZE_V1_0, PROFILE_CONFIG_SIZE_V1_0, p);
        // Keycodes outside the renumbered ranges survive verbatim.
        blob[base..base + KEYMAP_SIZE].fill(0x04);
        blob[base + KEYMAP_SIZE..base + AK_BLOCK_AT].fill(0x11);
        // Tick rate marks the profile so offset arithmetic is checkable.
        blob[base + PROFILE_CONFIG_SIZE_V1_0 - 1] = 0xA0 + p as u8;
    }
    blob
}

/// A populated current-version blob (with a deliberately stale trailing
/// sentinel, which a commit must refresh).
fn current_blob() -> [u8; EECONFIG_SIZE] {
    let mut blob = [0u8; EECONFIG_SIZE];
    write_u16(&mut blob, MAGIC_START_OFFSET, MAGIC_START);
    write_u16(&mut blob, VERSION_OFFSET, CURRENT_VERSION);
    for (i, b) in blob
        .iter_mut()
        .enumerate()
        .take(MAGIC_END_OFFSET)
        .skip(4)
    {
        *b = (i % 251) as u8;
    }
    blob
}

fn migrated_profile_base(p: usize) -> usize {
    profile_offset(GLOBAL_CONFIG_SIZE_V1_1, PROFILE_CONFIG_SIZE_V1_1, p)
}

// ── Chain completeness ────────────────────────────────────────

#[test]
fn migrates_v1_0_blob_to_newest_version() {
    let mut flash = SpyFlash::default();
    let status = try_migrate(&v1_0_blob(), &mut flash).unwrap();

    assert_eq!(status, MigrateStatus::Committed);
    assert_eq!(flash.writes.len(), 1);

    let (offset, blob) = &flash.writes[0];
    assert_eq!(*offset, 0);
    assert_eq!(blob.len(), EECONFIG_SIZE);
    assert_eq!(read_u16(blob, VERSION_OFFSET), CURRENT_VERSION);
    assert_eq!(read_u16(blob, MAGIC_START_OFFSET), MAGIC_START);
    assert_eq!(read_u16(blob, MAGIC_END_OFFSET), MAGIC_END);
}

#[test]
fn global_section_gains_zeroed_options_field() {
    let stored = v1_0_blob();
    let mut flash = SpyFlash::default();
    try_migrate(&stored, &mut flash).unwrap();
    let blob = &flash.writes[0].1;

    // Magic and calibration bytes verbatim; the version field is stamped
    // to the step's target after the transform runs, so it is the one
    // part of the copied leading bytes that must differ end to end.
    assert_eq!(&blob[..2], &stored[..2]);
    assert_eq!(read_u16(blob, VERSION_OFFSET), CURRENT_VERSION);
    assert_eq!(&blob[4..10], &stored[4..10]);
    // Two zero bytes inserted, trailing profile indices carried over.
    assert_eq!(&blob[10..12], &[0, 0]);
    assert_eq!(&blob[12..14], &stored[10..12]);
}

#[test]
fn profile_sections_land_at_destination_offsets() {
    let mut flash = SpyFlash::default();
    try_migrate(&v1_0_blob(), &mut flash).unwrap();
    let blob = &flash.writes[0].1;

    for p in 0..NUM_PROFILES {
        let base = migrated_profile_base(p);
        // Each profile's tick-rate marker must land at the end of its
        // destination section.
        assert_eq!(blob[base + PROFILE_CONFIG_SIZE_V1_1 - 1], 0xA0 + p as u8);
    }
}

// ── Keycode remapping ─────────────────────────────────────────

#[test]
fn keycodes_are_renumbered_per_table() {
    let mut stored = v1_0_blob();
    let keymap = profile_offset(GLOBAL_CONFIG_SIZE_V1_0, PROFILE_CONFIG_SIZE_V1_0, 0);
    stored[keymap..keymap + 6].copy_from_slice(&[0x70, 0x71, 0x72, 0x96, 0x00, 0x97]);

    let mut flash = SpyFlash::default();
    try_migrate(&stored, &mut flash).unwrap();
    let blob = &flash.writes[0].1;

    let out = migrated_profile_base(0);
    assert_eq!(&blob[out..out + 6], &[0x76, 0x77, 0x7B, 0x9F, 0x00, 0x97]);
}

#[test]
fn actuation_map_is_not_renumbered() {
    let mut stored = v1_0_blob();
    let base = profile_offset(GLOBAL_CONFIG_SIZE_V1_0, PROFILE_CONFIG_SIZE_V1_0, 0);
    // Bytes that look like remappable keycodes but live in the actuation
    // map must pass through untouched.
    stored[base + KEYMAP_SIZE] = 0x70;
    stored[base + KEYMAP_SIZE + 1] = 0x96;

    let mut flash = SpyFlash::default();
    try_migrate(&stored, &mut flash).unwrap();
    let blob = &flash.writes[0].1;

    let out = migrated_profile_base(0) + KEYMAP_SIZE;
    assert_eq!(blob[out], 0x70);
    assert_eq!(blob[out + 1], 0x96);
}

// ── Advanced keys ─────────────────────────────────────────────

#[test]
fn tap_hold_entries_get_hold_on_other_key_press_cleared() {
    let mut stored = v1_0_blob();
    let ak = profile_offset(GLOBAL_CONFIG_SIZE_V1_0, PROFILE_CONFIG_SIZE_V1_0, 2) + AK_BLOCK_AT;
    stored[ak + 2] = AK_TYPE_TAP_HOLD;
    stored[ak + 7] = 0x55;
    stored[ak + ADVANCED_KEY_SIZE + 2] = 0x01; // other type
    stored[ak + ADVANCED_KEY_SIZE + 7] = 0x66;

    let mut flash = SpyFlash::default();
    try_migrate(&stored, &mut flash).unwrap();
    let blob = &flash.writes[0].1;

    let out = migrated_profile_base(2) + AK_BLOCK_AT;
    assert_eq!(blob[out + 7], 0);
    assert_eq!(blob[out + ADVANCED_KEY_SIZE + 7], 0x66);
}

// ── New per-profile fields ────────────────────────────────────

#[test]
fn new_profile_fields_get_their_defaults() {
    let mut flash = SpyFlash::default();
    try_migrate(&v1_0_blob(), &mut flash).unwrap();
    let blob = &flash.writes[0].1;

    for p in 0..NUM_PROFILES {
        let base = migrated_profile_base(p);
        let gamepad = &blob[base + GAMEPAD_AT..base + GAMEPAD_AT + NUM_KEYS];
        assert!(gamepad.iter().all(|&b| b == 0), "profile {p} gamepad buttons");

        let curve_at = base + GAMEPAD_AT + NUM_KEYS;
        assert_eq!(
            &blob[curve_at..curve_at + 8],
            &[4, 20, 85, 95, 165, 170, 255, 255],
            "profile {p} analog curve"
        );
        assert_eq!(blob[curve_at + 8], 0b0000_1001, "profile {p} flags");
    }
}

// ── Idempotent no-op path ─────────────────────────────────────

#[test]
fn newest_version_blob_is_rewritten_unchanged_except_sentinel() {
    let stored = current_blob();
    let mut flash = SpyFlash::default();
    let status = try_migrate(&stored, &mut flash).unwrap();

    assert_eq!(status, MigrateStatus::Committed);
    assert_eq!(flash.writes.len(), 1);

    let blob = &flash.writes[0].1;
    assert_eq!(&blob[..MAGIC_END_OFFSET], &stored[..MAGIC_END_OFFSET]);
    assert_eq!(read_u16(blob, MAGIC_END_OFFSET), MAGIC_END);
}

// ── Abort paths — flash must never be written ─────────────────

#[test]
fn unrecognized_region_is_left_untouched() {
    let mut stored = v1_0_blob();
    write_u16(&mut stored, MAGIC_START_OFFSET, 0xDEAD);

    let mut flash = SpyFlash::default();
    let status = try_migrate(&stored, &mut flash).unwrap();

    assert_eq!(status, MigrateStatus::NotRecognized);
    assert!(flash.writes.is_empty());
}

#[test]
fn version_mismatch_mid_chain_aborts_without_writing() {
    let mut stored = v1_0_blob();
    // Older than any registry entry: the v1.1 step applies, but its
    // transform expects a v1.0 source.
    write_u16(&mut stored, VERSION_OFFSET, 0x0099);

    let mut flash = SpyFlash::default();
    let err = try_migrate(&stored, &mut flash).unwrap_err();

    assert_eq!(
        err,
        MigrationError::TransformRejected {
            expected: VERSION_V1_0,
            found: 0x0099,
        }
    );
    assert!(flash.writes.is_empty());
}

#[test]
fn persist_failure_surfaces_and_discards_result() {
    let mut flash = SpyFlash {
        fail_writes: true,
        ..Default::default()
    };
    let err = try_migrate(&v1_0_blob(), &mut flash).unwrap_err();

    assert_eq!(err, MigrationError::Persist(StorageError::IoError));
    assert!(flash.writes.is_empty());
}
