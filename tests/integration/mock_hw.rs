//! Mock hardware for integration tests.
//!
//! Wraps the simulated register file with mappers that fail on purpose and
//! decodes the raw write journal back into per-pin operations, so tests can
//! assert on drive_high/drive_low sequences instead of register words.

use myled::MapError;
use myled::adapters::sim::{RegisterWrite, SimBlock, SimMapper};
use myled::app::ports::WindowMapper;
use myled::pins::{GPCLR0, GPFSEL0, GPSET0};

// ── Decoded operations ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOp {
    High(u8),
    Low(u8),
    FunctionSelect(usize, u32),
    Other(usize, u32),
}

/// Translate journaled writes into pin operations.  A set/clear write with
/// more than one bit expands into one op per bit.
pub fn decode(writes: &[RegisterWrite]) -> Vec<PinOp> {
    let mut ops = Vec::new();
    for w in writes {
        let (bank, high) = match w.index {
            i if (GPSET0..GPSET0 + 2).contains(&i) => (i - GPSET0, true),
            i if (GPCLR0..GPCLR0 + 2).contains(&i) => (i - GPCLR0, false),
            i if (GPFSEL0..GPFSEL0 + 6).contains(&i) => {
                ops.push(PinOp::FunctionSelect(i, w.value));
                continue;
            }
            index => {
                ops.push(PinOp::Other(index, w.value));
                continue;
            }
        };
        for bit in 0..32u8 {
            if w.value & (1 << bit) != 0 {
                let pin = bit + 32 * bank as u8;
                ops.push(if high {
                    PinOp::High(pin)
                } else {
                    PinOp::Low(pin)
                });
            }
        }
    }
    ops
}

/// Pin operations recorded after journal position `mark`.
pub fn ops_since(block: &SimBlock, mark: usize) -> Vec<PinOp> {
    decode(&block.journal()[mark..])
}

// ── FailingMapper ─────────────────────────────────────────────

/// Every map attempt fails with the configured error.
pub struct FailingMapper {
    pub error: MapError,
    pub attempts: usize,
}

impl FailingMapper {
    pub fn new(error: MapError) -> Self {
        Self { error, attempts: 0 }
    }
}

impl WindowMapper for FailingMapper {
    type Block = SimBlock;

    fn map(&mut self, _base: u64, _len: usize) -> Result<SimBlock, MapError> {
        self.attempts += 1;
        Err(self.error)
    }

    fn release(&mut self, _block: SimBlock) {
        unreachable!("nothing was ever mapped");
    }
}

// ── TruncatingMapper ──────────────────────────────────────────

/// Hands out blocks shorter than requested, so accesses past `words`
/// fail inside the window.  Counts releases.
pub struct TruncatingMapper {
    pub words: usize,
    pub releases: usize,
    inner: SimMapper,
}

impl TruncatingMapper {
    pub fn new(words: usize) -> Self {
        Self {
            words,
            releases: 0,
            inner: SimMapper::new(),
        }
    }
}

impl WindowMapper for TruncatingMapper {
    type Block = SimBlock;

    fn map(&mut self, base: u64, len: usize) -> Result<SimBlock, MapError> {
        let full = self.inner.map(base, len)?;
        self.inner.release(full);
        Ok(SimBlock::new(base, self.words))
    }

    fn release(&mut self, _block: SimBlock) {
        self.releases += 1;
    }
}
