//! Exclusive ownership of physical address ranges.
//!
//! Each mapper keeps one [`ClaimTable`]; a range may be handed out once and
//! only becomes available again after it is released.

use heapless::Vec;

use crate::error::MapError;

/// Maximum simultaneously live windows per mapper.
pub const MAX_WINDOWS: usize = 4;

#[derive(Debug, Default)]
pub struct ClaimTable {
    /// Half-open `[start, end)` physical ranges.
    ranges: Vec<(u64, u64), MAX_WINDOWS>,
}

impl ClaimTable {
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Claim `[base, base + len)`; fails if any byte is already claimed.
    pub fn claim(&mut self, base: u64, len: usize) -> Result<(), MapError> {
        let end = base
            .checked_add(len as u64)
            .ok_or(MapError::InvalidAddress)?;
        if self.ranges.iter().any(|&(s, e)| base < e && s < end) {
            return Err(MapError::AlreadyMapped);
        }
        self.ranges
            .push((base, end))
            .map_err(|_| MapError::TooManyWindows)
    }

    /// Drop the claim that starts at `base`.  Unknown bases are ignored.
    pub fn release(&mut self, base: u64) {
        self.ranges.retain(|&(s, _)| s != base);
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
