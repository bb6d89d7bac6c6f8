//! Migration registry.
//!
//! One descriptor per supported schema version, ordered by ascending
//! version, in a static table of plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap. The table is the single source of truth for
//! section sizes at each revision: each migration step reads source offsets
//! from the *previous* descriptor and destination offsets from its own.
//!
//! Supporting a new schema version means appending exactly one descriptor
//! plus its transform functions; the engine needs no other change.

use super::MigrationError;
use super::v1_1;
use crate::eeconfig::{
    GLOBAL_CONFIG_SIZE_V1_0, GLOBAL_CONFIG_SIZE_V1_1, PROFILE_CONFIG_SIZE_V1_0,
    PROFILE_CONFIG_SIZE_V1_1, VERSION_V1_0, VERSION_V1_1,
};

/// Rewrites a global section from the previous version's layout into this
/// version's. `src` and `dst` are exactly the two layouts' global sections.
pub type GlobalConfigFn = fn(dst: &mut [u8], src: &[u8]) -> Result<(), MigrationError>;

/// Rewrites one profile section, parameterized by the 0-based profile slot.
pub type ProfileConfigFn = fn(profile: u8, dst: &mut [u8], src: &[u8]) -> Result<(), MigrationError>;

/// Migration metadata for one configuration version.
pub struct Migration {
    /// Schema version this descriptor produces.
    pub version: u16,
    /// Global section size in this version's layout.
    pub global_config_size: usize,
    /// Per-profile section size in this version's layout.
    pub profile_config_size: usize,
    /// Absent only for the baseline version, which is never applied.
    pub global_config_func: Option<GlobalConfigFn>,
    /// Absent only for the baseline version.
    pub profile_config_func: Option<ProfileConfigFn>,
}

/// Descriptors for every configuration version, ascending. The first entry
/// is the initial version (v1.0) and carries no transform functions; it
/// only anchors the size lookups for the first real migration step.
pub static MIGRATIONS: [Migration; 2] = [
    Migration {
        version: VERSION_V1_0,
        global_config_size: GLOBAL_CONFIG_SIZE_V1_0,
        profile_config_size: PROFILE_CONFIG_SIZE_V1_0,
        global_config_func: None,
        profile_config_func: None,
    },
    Migration {
        version: VERSION_V1_1,
        global_config_size: GLOBAL_CONFIG_SIZE_V1_1,
        profile_config_size: PROFILE_CONFIG_SIZE_V1_1,
        global_config_func: Some(v1_1::global_config),
        profile_config_func: Some(v1_1::profile_config),
    },
];

/// The newest descriptor — the version this firmware writes.
pub fn newest() -> &'static Migration {
    // The table always has at least the baseline entry.
    &MIGRATIONS[MIGRATIONS.len() - 1]
}
