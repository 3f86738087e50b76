//! GPIO register map — the only legal access path to hardware state.
//!
//! [`RegisterWindow`] owns the mapped register block together with the set
//! of pins that have been configured as outputs.  Every access goes through
//! a typed accessor keyed by a validated [`Pin`]:
//!
//! | Accessor      | Register        | Access              |
//! |---------------|-----------------|---------------------|
//! | `read_field`  | GPFSELn         | read                |
//! | `write_field` | GPFSELn         | read-modify-write   |
//! | `write_set`   | GPSET0 / GPSET1 | write-1-to-set      |
//! | `write_clear` | GPCLR0 / GPCLR1 | write-1-to-clear    |
//!
//! Function-select writes are the only read-modify-write in the driver and
//! happen during the configuration phase, which runs inside a critical
//! section because up to ten pins share one GPFSEL word.

use core::fmt;

use log::{debug, info};

use crate::app::ports::{RegisterBlock, WindowMapper};
use crate::error::{ConfigurationError, HardwareError, MapError};
use crate::pins::{
    FSEL_FIELD_BITS, FSEL_FIELD_MASK, FSEL_PINS_PER_REG, GPCLR0, GPFSEL0, GPSET0, MAX_PIN,
    MIN_WINDOW_WORDS, PINS_PER_BANK,
};

// ───────────────────────────────────────────────────────────────
// Pin
// ───────────────────────────────────────────────────────────────

/// A validated GPIO line number (0..=53).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    pub const fn new(number: u8) -> Result<Self, ConfigurationError> {
        if number > MAX_PIN {
            Err(ConfigurationError::InvalidPin(number))
        } else {
            Ok(Self(number))
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Location of this pin's 3-bit field in the GPFSEL registers.
    pub const fn function_select(self) -> FunctionSelect {
        FunctionSelect {
            register: GPFSEL0 + (self.0 / FSEL_PINS_PER_REG) as usize,
            shift: (self.0 % FSEL_PINS_PER_REG) as u32 * FSEL_FIELD_BITS,
        }
    }

    /// Set/clear/level bank (0 for pins 0-31, 1 for 32-53).
    pub const fn bank(self) -> usize {
        (self.0 / PINS_PER_BANK) as usize
    }

    /// The single bit that addresses this pin within its bank.
    pub const fn bank_mask(self) -> u32 {
        1 << (self.0 % PINS_PER_BANK)
    }

    const fn claim_bit(self) -> u64 {
        1 << self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Function-select field
// ───────────────────────────────────────────────────────────────

/// Register word and bit shift of one function-select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSelect {
    pub register: usize,
    pub shift: u32,
}

impl FunctionSelect {
    pub const fn mask(self) -> u32 {
        FSEL_FIELD_MASK << self.shift
    }

    /// Replace this field in `word`, leaving the other nine untouched.
    pub const fn apply(self, word: u32, function: Function) -> u32 {
        (word & !self.mask()) | ((function as u32) << self.shift)
    }

    pub const fn extract(self, word: u32) -> u32 {
        (word >> self.shift) & FSEL_FIELD_MASK
    }
}

/// Pin function modes encoded in a GPFSEL field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Function {
    Input = 0b000,
    Output = 0b001,
    Alt0 = 0b100,
    Alt1 = 0b101,
    Alt2 = 0b110,
    Alt3 = 0b111,
    Alt4 = 0b011,
    Alt5 = 0b010,
}

impl Function {
    pub const fn from_bits(bits: u32) -> Self {
        match bits & FSEL_FIELD_MASK {
            0b000 => Self::Input,
            0b001 => Self::Output,
            0b100 => Self::Alt0,
            0b101 => Self::Alt1,
            0b110 => Self::Alt2,
            0b111 => Self::Alt3,
            0b011 => Self::Alt4,
            _ => Self::Alt5,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// RegisterWindow
// ───────────────────────────────────────────────────────────────

/// The single mapped GPIO register window plus its configured-pin set.
///
/// Created by [`RegisterWindow::map`], released by [`RegisterWindow::unmap`].
/// After unmapping every access fails with [`HardwareError::Unmapped`].
/// Dropping a still-mapped window drops the block without returning it to
/// its mapper.
pub struct RegisterWindow<B: RegisterBlock> {
    block: Option<B>,
    base: u64,
    configured: u64,
}

impl<B: RegisterBlock> RegisterWindow<B> {
    /// Map `len` bytes of GPIO registers starting at physical `base`.
    pub fn map<M>(mapper: &mut M, base: u64, len: usize) -> Result<Self, MapError>
    where
        M: WindowMapper<Block = B>,
    {
        if base % 4 != 0 || len % 4 != 0 {
            return Err(MapError::Misaligned);
        }
        if len / 4 < MIN_WINDOW_WORDS {
            return Err(MapError::TooShort);
        }
        let block = mapper.map(base, len)?;
        info!("gpio: mapped {len:#x} bytes at {base:#010x}");
        Ok(Self {
            block: Some(block),
            base,
            configured: 0,
        })
    }

    /// Release the mapping.  A second call is a no-op.
    pub fn unmap<M>(&mut self, mapper: &mut M)
    where
        M: WindowMapper<Block = B>,
    {
        if let Some(block) = self.block.take() {
            mapper.release(block);
            self.configured = 0;
            info!("gpio: unmapped window at {:#010x}", self.base);
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.block.is_some()
    }

    /// Read-only view of the underlying block (`None` once unmapped).
    pub fn block(&self) -> Option<&B> {
        self.block.as_ref()
    }

    pub fn is_configured(&self, pin: Pin) -> bool {
        self.configured & pin.claim_bit() != 0
    }

    // ── Configuration phase ──────────────────────────────────

    /// Switch `pin` to output mode.  Read-modify-write of the pin's
    /// GPFSEL word; the other nine fields are preserved.
    pub fn configure_as_output(&mut self, pin: Pin) -> Result<(), HardwareError> {
        self.write_field(pin, Function::Output)?;
        self.configured |= pin.claim_bit();
        debug!("gpio: {pin} -> output");
        Ok(())
    }

    /// Configure every pin in `pins` as one serialized configuration phase.
    pub fn configure_outputs(&mut self, pins: &[Pin]) -> Result<(), ConfigurationError> {
        critical_section::with(|_cs| -> Result<(), ConfigurationError> {
            for &pin in pins {
                self.configure_as_output(pin)
                    .map_err(|cause| ConfigurationError::PinSetup { pin, cause })?;
            }
            Ok(())
        })
    }

    /// Current function of `pin` as encoded in its GPFSEL field.
    pub fn function(&self, pin: Pin) -> Result<Function, HardwareError> {
        self.read_field(pin).map(Function::from_bits)
    }

    // ── Output control ───────────────────────────────────────

    /// Drive `pin` high through its GPSET register.
    pub fn drive_high(&mut self, pin: Pin) -> Result<(), HardwareError> {
        self.ensure_output(pin)?;
        self.write_set(pin)
    }

    /// Drive `pin` low through its GPCLR register.
    pub fn drive_low(&mut self, pin: Pin) -> Result<(), HardwareError> {
        self.ensure_output(pin)?;
        self.write_clear(pin)
    }

    fn ensure_output(&self, pin: Pin) -> Result<(), HardwareError> {
        if self.block.is_none() {
            return Err(HardwareError::Unmapped);
        }
        if !self.is_configured(pin) {
            return Err(HardwareError::PinNotConfigured(pin));
        }
        Ok(())
    }

    // ── Typed accessors ──────────────────────────────────────

    pub fn read_field(&self, pin: Pin) -> Result<u32, HardwareError> {
        let fsel = pin.function_select();
        let word = self.read_word(fsel.register)?;
        Ok(fsel.extract(word))
    }

    fn write_field(&mut self, pin: Pin, function: Function) -> Result<(), HardwareError> {
        let fsel = pin.function_select();
        let word = self.read_word(fsel.register)?;
        self.write_word(fsel.register, fsel.apply(word, function))
    }

    fn write_set(&mut self, pin: Pin) -> Result<(), HardwareError> {
        self.write_word(GPSET0 + pin.bank(), pin.bank_mask())
    }

    fn write_clear(&mut self, pin: Pin) -> Result<(), HardwareError> {
        self.write_word(GPCLR0 + pin.bank(), pin.bank_mask())
    }

    fn read_word(&self, index: usize) -> Result<u32, HardwareError> {
        let block = self.block.as_ref().ok_or(HardwareError::Unmapped)?;
        if index >= block.len_words() {
            return Err(HardwareError::OutOfWindow(index));
        }
        Ok(block.read_word(index))
    }

    fn write_word(&mut self, index: usize, value: u32) -> Result<(), HardwareError> {
        let block = self.block.as_mut().ok_or(HardwareError::Unmapped)?;
        if index >= block.len_words() {
            return Err(HardwareError::OutOfWindow(index));
        }
        block.write_word(index, value);
        Ok(())
    }
}
