//! `/dev/mem` window mapper for real hardware.
//!
//! Maps the GPIO controller's physical register range into the process and
//! performs volatile 32-bit accesses on it.  Requires root (or `CAP_SYS_RAWIO`)
//! on the board.  Only built with the `mmio` feature.
//!
//! The device is opened `O_SYNC` so the kernel maps the range uncached.

use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;

use log::{info, warn};
use memmap2::{MmapMut, MmapOptions};

use crate::adapters::claims::ClaimTable;
use crate::app::ports::{RegisterBlock, WindowMapper};
use crate::error::MapError;

/// Page granularity required for the mmap offset.
const PAGE_SIZE: u64 = 4096;

// ── DevMemBlock ───────────────────────────────────────────────

pub struct DevMemBlock {
    base: u64,
    map: MmapMut,
    len_words: usize,
}

impl DevMemBlock {
    fn word_ptr(&self, index: usize) -> *const u32 {
        debug_assert!(index < self.len_words);
        self.map.as_ptr().cast::<u32>().wrapping_add(index)
    }
}

impl RegisterBlock for DevMemBlock {
    fn len_words(&self) -> usize {
        self.len_words
    }

    fn read_word(&self, index: usize) -> u32 {
        // SAFETY: index < len_words (checked by RegisterWindow) and the
        // mapping is page aligned, so the pointer is in bounds and aligned.
        unsafe { self.word_ptr(index).read_volatile() }
    }

    fn write_word(&mut self, index: usize, value: u32) {
        debug_assert!(index < self.len_words);
        let ptr = self.map.as_mut_ptr().cast::<u32>().wrapping_add(index);
        // SAFETY: same bounds/alignment argument as read_word; the block is
        // borrowed mutably so no other access through it is in flight.
        unsafe { ptr.write_volatile(value) }
    }
}

// ── DevMemMapper ──────────────────────────────────────────────

pub struct DevMemMapper {
    device: PathBuf,
    claims: ClaimTable,
}

impl DevMemMapper {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            claims: ClaimTable::new(),
        }
    }
}

fn map_io_error(e: &io::Error) -> MapError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => MapError::PermissionDenied,
        io::ErrorKind::NotFound | io::ErrorKind::InvalidInput => MapError::InvalidAddress,
        _ => MapError::Os(e.raw_os_error().unwrap_or(-1)),
    }
}

impl WindowMapper for DevMemMapper {
    type Block = DevMemBlock;

    fn map(&mut self, base: u64, len: usize) -> Result<DevMemBlock, MapError> {
        if base % PAGE_SIZE != 0 {
            return Err(MapError::Misaligned);
        }
        self.claims.claim(base, len)?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(&self.device)
            .map_err(|e| {
                warn!("devmem: open {} failed: {e}", self.device.display());
                map_io_error(&e)
            });
        let file = match file {
            Ok(f) => f,
            Err(e) => {
                self.claims.release(base);
                return Err(e);
            }
        };

        // SAFETY: the range is claimed exclusively by this mapper and the
        // mapping is only accessed through volatile word reads/writes.
        let map = unsafe { MmapOptions::new().offset(base).len(len).map_mut(&file) };
        match map {
            Ok(map) => {
                info!("devmem: mapped {len:#x} bytes at {base:#010x}");
                Ok(DevMemBlock {
                    base,
                    map,
                    len_words: len / 4,
                })
            }
            Err(e) => {
                self.claims.release(base);
                warn!("devmem: mmap at {base:#010x} failed: {e}");
                Err(map_io_error(&e))
            }
        }
    }

    fn release(&mut self, block: DevMemBlock) {
        self.claims.release(block.base);
        drop(block);
    }
}
