//! In-memory GPIO register file.
//!
//! Stands in for the real controller on host builds and in tests.  Models
//! the parts of the register semantics the driver relies on:
//!
//! - GPFSEL words are plain read/write storage.
//! - GPSET/GPCLR are write-1-to-act: they update the pin levels and read
//!   back as zero.
//! - GPLEV reflects the levels and ignores writes.
//!
//! Every write is journaled so callers can assert on the exact sequence.

use log::debug;

use crate::adapters::claims::ClaimTable;
use crate::app::ports::{RegisterBlock, WindowMapper};
use crate::drivers::register_map::Pin;
use crate::error::MapError;
use crate::pins::{GPCLR0, GPLEV0, GPSET0};

/// One recorded register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub index: usize,
    pub value: u32,
}

// ── SimBlock ──────────────────────────────────────────────────

pub struct SimBlock {
    base: u64,
    words: Vec<u32>,
    levels: u64,
    journal: Vec<RegisterWrite>,
}

impl SimBlock {
    pub fn new(base: u64, len_words: usize) -> Self {
        Self {
            base,
            words: vec![0; len_words],
            levels: 0,
            journal: Vec::new(),
        }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    /// Current output level of `pin`.
    pub fn level(&self, pin: Pin) -> bool {
        self.levels & (1 << pin.number()) != 0
    }

    /// Every write since the block was mapped, oldest first.
    pub fn journal(&self) -> &[RegisterWrite] {
        &self.journal
    }

    /// Read a word with register semantics, without going through a window.
    pub fn peek(&self, index: usize) -> u32 {
        self.read_word(index)
    }

    fn poke(&mut self, index: usize, value: u32) {
        if let Some(w) = self.words.get_mut(index) {
            *w = value;
        }
    }

    fn bank_shift(index: usize, first: usize) -> Option<u32> {
        match index.checked_sub(first) {
            Some(bank @ 0..=1) => Some(bank as u32 * 32),
            _ => None,
        }
    }
}

impl RegisterBlock for SimBlock {
    fn len_words(&self) -> usize {
        self.words.len()
    }

    fn read_word(&self, index: usize) -> u32 {
        if Self::bank_shift(index, GPSET0).is_some() || Self::bank_shift(index, GPCLR0).is_some() {
            return 0;
        }
        if let Some(shift) = Self::bank_shift(index, GPLEV0) {
            return (self.levels >> shift) as u32;
        }
        self.words.get(index).copied().unwrap_or(0)
    }

    fn write_word(&mut self, index: usize, value: u32) {
        self.journal.push(RegisterWrite { index, value });
        if let Some(shift) = Self::bank_shift(index, GPSET0) {
            self.levels |= u64::from(value) << shift;
        } else if let Some(shift) = Self::bank_shift(index, GPCLR0) {
            self.levels &= !(u64::from(value) << shift);
        } else if Self::bank_shift(index, GPLEV0).is_none() {
            self.poke(index, value);
        }
    }
}

// ── SimMapper ─────────────────────────────────────────────────

/// Hands out [`SimBlock`]s and enforces exclusive ranges.
#[derive(Default)]
pub struct SimMapper {
    claims: ClaimTable,
    reset_words: Vec<(usize, u32)>,
}

impl SimMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload `index` with `value` in every block mapped afterwards
    /// (models firmware-set alternate functions on neighbouring pins).
    #[must_use]
    pub fn with_word(mut self, index: usize, value: u32) -> Self {
        self.reset_words.push((index, value));
        self
    }

    pub fn live_windows(&self) -> usize {
        self.claims.len()
    }
}

impl WindowMapper for SimMapper {
    type Block = SimBlock;

    fn map(&mut self, base: u64, len: usize) -> Result<SimBlock, MapError> {
        self.claims.claim(base, len)?;
        let mut block = SimBlock::new(base, len / 4);
        for &(index, value) in &self.reset_words {
            block.poke(index, value);
        }
        debug!("sim: mapped {len:#x} bytes at {base:#010x}");
        Ok(block)
    }

    fn release(&mut self, block: SimBlock) {
        self.claims.release(block.base());
        debug!("sim: released window at {:#010x}", block.base());
    }
}
