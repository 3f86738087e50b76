//! Port traits — the boundary between the register logic and the outside world.
//!
//! ```text
//!   WindowMapper ──▶ RegisterBlock ──▶ RegisterWindow ──▶ LedCommandEngine
//!                                                              ▲
//!                              device registration ──▶ WriteHandler
//! ```
//!
//! Driven adapters (the `/dev/mem` mapper, the in-memory simulator, test
//! doubles) implement [`WindowMapper`] and [`RegisterBlock`].  The device
//! registration collaborator only ever sees [`WriteHandler`], so the core
//! never depends on its types.

use crate::error::{Error, MapError};

// ───────────────────────────────────────────────────────────────
// Register block (driven adapter: domain ↔ hardware words)
// ───────────────────────────────────────────────────────────────

/// A mapped block of 32-bit registers addressed by word index.
///
/// Implementations perform volatile accesses.  Callers guarantee
/// `index < len_words()`; [`RegisterWindow`](crate::drivers::register_map::RegisterWindow)
/// checks this before every access.
pub trait RegisterBlock {
    /// Number of 32-bit words in the block.
    fn len_words(&self) -> usize;

    /// Volatile read of word `index`.
    fn read_word(&self, index: usize) -> u32;

    /// Volatile write of word `index`.
    fn write_word(&mut self, index: usize, value: u32);
}

// ───────────────────────────────────────────────────────────────
// Window mapper (driven adapter: domain → platform mapping)
// ───────────────────────────────────────────────────────────────

/// Establishes and releases physical register windows.
///
/// A mapper owns the claim table for the address ranges it hands out:
/// mapping a range that overlaps a live window fails with
/// [`MapError::AlreadyMapped`] until that window is released.
pub trait WindowMapper {
    type Block: RegisterBlock;

    /// Map `len` bytes starting at physical address `base`.
    fn map(&mut self, base: u64, len: usize) -> Result<Self::Block, MapError>;

    /// Give a block back; its range may be mapped again afterwards.
    fn release(&mut self, block: Self::Block);
}

// ───────────────────────────────────────────────────────────────
// Write handler (driving adapter: device node → domain)
// ───────────────────────────────────────────────────────────────

/// The write entry point handed to the device registration layer.
///
/// Returns the number of bytes consumed from `buf`.  Callers must
/// serialize invocations per device instance.
pub trait WriteHandler {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error>;
}
