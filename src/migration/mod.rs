//! Boot-time configuration migration engine.
//!
//! Upgrades the persisted configuration blob, section by section, through
//! the chain of schema versions in [`registry::MIGRATIONS`], then commits
//! the result back to flash. Runs once, single-threaded, before any other
//! subsystem reads the configuration.
//!
//! ```text
//!  Validating ──[magic_start ok]──▶ Migrating(step i) ──▶ Finalizing ──▶ Committed
//!      │                                  │                                 │
//!  [bad magic]                   [transform rejected]              [flash write failed]
//!      ▼                                  ▼                                 ▼
//!  NotRecognized                       Failed                            Failed
//!      (no write)                    (no write)                  (old blob stays good)
//! ```
//!
//! Steps alternate between two fixed-size scratch buffers sized to the
//! largest known blob layout, so memory use is bounded at compile time and
//! the stored blob is never modified in place. A failed step aborts the
//! whole run with flash untouched; the device then continues on the
//! last-known-good configuration.

pub mod cursor;
pub mod registry;
pub mod v1_1;

use core::fmt;

use log::{info, warn};

use crate::eeconfig::{
    self, EECONFIG_SIZE, MAGIC_END, MAGIC_END_OFFSET, MAGIC_START, MAGIC_START_OFFSET,
    VERSION_OFFSET,
};
use crate::geometry::NUM_PROFILES;
use crate::ports::{FlashPort, StorageError};
use self::registry::MIGRATIONS;

// ── Outcome and error types ───────────────────────────────────

/// Successful outcomes of [`try_migrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateStatus {
    /// The blob was (re-)stamped and committed to flash.
    Committed,
    /// The stored region carries no leading sentinel — it is not a
    /// recognized configuration. Nothing was written; the caller decides
    /// whether to fall back to factory defaults.
    NotRecognized,
}

/// Terminal failures of a migration run. In every case flash is left at
/// its prior content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationError {
    /// A transform found a source version it was not designed for —
    /// a registry/version-chain inconsistency.
    TransformRejected { expected: u16, found: u16 },
    /// The in-memory migration succeeded but the flash write did not;
    /// the computed result is discarded.
    Persist(StorageError),
}

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransformRejected { expected, found } => write!(
                f,
                "transform rejected: source version {found:#06x}, expected {expected:#06x}"
            ),
            Self::Persist(e) => write!(f, "persist failed: {e}"),
        }
    }
}

// ── Engine ────────────────────────────────────────────────────

/// Migrate the stored configuration blob to the newest schema version and
/// commit it through `flash`.
///
/// `stored` is the full configuration region as read from flash at boot.
/// A blob already at the newest version takes the zero-step path but is
/// still re-stamped and rewritten — a deliberate idempotent
/// no-op-plus-rewrite that refreshes the trailing sentinel.
pub fn try_migrate<F: FlashPort>(
    stored: &[u8; EECONFIG_SIZE],
    flash: &mut F,
) -> Result<MigrateStatus, MigrationError> {
    // The magic start is always the same for any version.
    if eeconfig::read_u16(stored, MAGIC_START_OFFSET) != MAGIC_START {
        warn!("migration: no leading sentinel, stored region left untouched");
        return Ok(MigrateStatus::NotRecognized);
    }

    let config_version = eeconfig::read_u16(stored, VERSION_OFFSET);

    // Two scratch buffers, alternated between steps to bound memory.
    // Buffer A starts out holding the stored configuration.
    let mut buf_a = [0u8; EECONFIG_SIZE];
    let mut buf_b = [0u8; EECONFIG_SIZE];
    buf_a.copy_from_slice(stored);
    let mut current_is_a = true;

    // Walk (previous, next) descriptor pairs; the baseline entry is never
    // applied, it only supplies the source layout of the first real step.
    for step in MIGRATIONS.windows(2) {
        let (prev, m) = (&step[0], &step[1]);

        if m.version <= config_version {
            // Skip migrations that are not applicable
            continue;
        }

        let (src, dst) = if current_is_a {
            (&buf_a, &mut buf_b)
        } else {
            (&buf_b, &mut buf_a)
        };

        info!(
            "migration: applying {:#06x} -> {:#06x}",
            prev.version, m.version
        );

        if let Some(global_func) = m.global_config_func {
            global_func(
                &mut dst[..m.global_config_size],
                &src[..prev.global_config_size],
            )?;
        }

        if let Some(profile_func) = m.profile_config_func {
            for p in 0..NUM_PROFILES {
                let src_at =
                    eeconfig::profile_offset(prev.global_config_size, prev.profile_config_size, p);
                let dst_at =
                    eeconfig::profile_offset(m.global_config_size, m.profile_config_size, p);
                profile_func(
                    p as u8,
                    &mut dst[dst_at..dst_at + m.profile_config_size],
                    &src[src_at..src_at + prev.profile_config_size],
                )?;
            }
        }

        // Stamp the version this step produced, then hand the buffer over.
        eeconfig::write_u16(dst, VERSION_OFFSET, m.version);
        current_is_a = !current_is_a;
    }

    let out = if current_is_a { &mut buf_a } else { &mut buf_b };

    // Make sure the configuration is structurally complete after migration.
    eeconfig::write_u16(out, MAGIC_END_OFFSET, MAGIC_END);

    flash.write(0, out).map_err(MigrationError::Persist)?;
    info!(
        "migration: committed at version {:#06x}",
        eeconfig::read_u16(out, VERSION_OFFSET)
    );
    Ok(MigrateStatus::Committed)
}
