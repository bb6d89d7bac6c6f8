//! HallKey Firmware — Main Entry Point
//!
//! Boot sequence:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ install logger ─▶ open config partition ─▶ read blob     │
//! │        ─▶ migrate to newest schema ─▶ start key scanning │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The migration runs to completion before anything else reads the
//! configuration. On any migration failure the device keeps operating on
//! the last-known-good (unmigrated) blob.

#![deny(unused_must_use)]

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use anyhow::anyhow;
    use log::{error, info, warn};

    use hallkey::adapters::flash::WearLevelingFlash;
    use hallkey::adapters::log_sink::LOGGER;
    use hallkey::eeconfig::EECONFIG_SIZE;
    use hallkey::migration::{self, MigrateStatus};
    use hallkey::ports::FlashPort;

    esp_idf_svc::sys::link_patches();
    LOGGER
        .install()
        .map_err(|e| anyhow!("logger install failed: {e}"))?;
    info!("HallKey boot");

    let mut flash =
        WearLevelingFlash::new().map_err(|e| anyhow!("config partition unavailable: {e}"))?;

    let mut stored = [0u8; EECONFIG_SIZE];
    flash
        .read(0, &mut stored)
        .map_err(|e| anyhow!("config read failed: {e}"))?;

    match migration::try_migrate(&stored, &mut flash) {
        Ok(MigrateStatus::Committed) => info!("configuration up to date"),
        Ok(MigrateStatus::NotRecognized) => {
            warn!("no configuration found; continuing with factory defaults");
        }
        Err(e) => {
            // Last-known-good blob stays authoritative; key scanning still
            // starts with whatever version is persisted.
            error!("configuration migration failed: {e}");
        }
    }

    // Key matrix scanning, USB HID and the rest of the runtime start here.
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    // The firmware binary only targets ESP-IDF; host builds use the
    // library and its tests.
    eprintln!("hallkey: host build — run `cargo test` instead");
}
