//! Wear-leveling flash adapter.
//!
//! Implements [`FlashPort`] over the dedicated `config` data partition.
//! On ESP32 the write path erases the affected range and rewrites it via
//! the esp_partition API; the ESP-IDF driver reports failure before any
//! sector is touched when parameters are invalid, and the caller (the
//! migration engine) treats any reported failure as "old content remains
//! authoritative". The simulation backend is a plain in-memory region for
//! host-side tests.

use crate::ports::{FlashPort, StorageError};
use log::info;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Size of the backing region in the simulation backend. Generously larger
/// than the configuration blob, like the real partition.
#[cfg(not(target_os = "espidf"))]
const SIM_REGION_SIZE: usize = 8192;

#[cfg(target_os = "espidf")]
const FLASH_SECTOR_SIZE: u32 = 4096;

pub struct WearLevelingFlash {
    #[cfg(not(target_os = "espidf"))]
    region: Vec<u8>,
    #[cfg(target_os = "espidf")]
    partition: *const esp_partition_t,
}

impl WearLevelingFlash {
    /// Open the configuration flash region.
    ///
    /// Returns `Err(StorageError::NotFound)` on ESP32 when the `config`
    /// partition is missing from the partition table.
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            let label = b"config\0";
            // SAFETY: esp_partition_find_first takes a NUL-terminated label
            // and returns a pointer into the static partition table, valid
            // for the program's lifetime.
            let partition = unsafe {
                esp_partition_find_first(
                    esp_partition_type_t_ESP_PARTITION_TYPE_DATA,
                    esp_partition_subtype_t_ESP_PARTITION_SUBTYPE_ANY,
                    label.as_ptr().cast(),
                )
            };
            if partition.is_null() {
                return Err(StorageError::NotFound);
            }
            info!("WearLevelingFlash: opened config partition");
            Ok(Self { partition })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("WearLevelingFlash: simulation backend");
            Ok(Self {
                region: vec![0xFF; SIM_REGION_SIZE],
            })
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn check_range(&self, offset: u32, len: usize) -> Result<usize, StorageError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(StorageError::OutOfBounds)?;
        if end > self.region.len() {
            return Err(StorageError::OutOfBounds);
        }
        Ok(start)
    }
}

impl FlashPort for WearLevelingFlash {
    fn read(&self, offset: u32, buf: &mut [u8]) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            let start = self.check_range(offset, buf.len())?;
            buf.copy_from_slice(&self.region[start..start + buf.len()]);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            // SAFETY: partition points into the static partition table and
            // buf is a valid writable range of buf.len() bytes.
            let ret = unsafe {
                esp_partition_read(
                    self.partition,
                    offset as usize,
                    buf.as_mut_ptr().cast(),
                    buf.len(),
                )
            };
            if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            Ok(())
        }
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), StorageError> {
        #[cfg(not(target_os = "espidf"))]
        {
            let start = self.check_range(offset, data.len())?;
            self.region[start..start + data.len()].copy_from_slice(data);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            // Erase whole sectors covering the range, then program.
            let erase_start = offset & !(FLASH_SECTOR_SIZE - 1);
            let erase_end = (offset + data.len() as u32).div_ceil(FLASH_SECTOR_SIZE)
                * FLASH_SECTOR_SIZE;
            // SAFETY: range checks are performed by the partition driver;
            // data is a valid readable range of data.len() bytes.
            let ret = unsafe {
                esp_partition_erase_range(
                    self.partition,
                    erase_start as usize,
                    (erase_end - erase_start) as usize,
                )
            };
            if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            let ret = unsafe {
                esp_partition_write(
                    self.partition,
                    offset as usize,
                    data.as_ptr().cast(),
                    data.len(),
                )
            };
            if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            Ok(())
        }
    }
}
