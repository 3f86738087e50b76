//! LED command engine — the stateless core of the write path.
//!
//! [`LedCommandEngine`] translates one command byte into set/clear register
//! writes through a [`RegisterWindow`].  It holds only the pin table, which
//! is configuration, so every call is independent of the previous one.
//!
//! ```text
//!  byte ──▶ LedSelection::decode ──▶ drive_high(lit) ──▶ drive_low(dark…)
//! ```

use log::debug;

use crate::app::ports::RegisterBlock;
use crate::drivers::register_map::RegisterWindow;
use crate::error::HardwareError;

use super::commands::{LedPins, LedSelection};

/// Bytes consumed by one command, whatever its content.
pub const COMMAND_LEN: usize = 1;

#[derive(Debug, Clone, Copy)]
pub struct LedCommandEngine {
    pins: LedPins,
}

impl LedCommandEngine {
    pub const fn new(pins: LedPins) -> Self {
        Self { pins }
    }

    pub const fn pins(&self) -> &LedPins {
        &self.pins
    }

    /// Apply one command byte.
    ///
    /// Recognised digits light one LED and clear the other two (or clear all
    /// three for `'0'`); the lit pin is set before the others are cleared.
    /// Any other byte is a no-op.  Returns [`COMMAND_LEN`] on success.
    pub fn apply_command<B: RegisterBlock>(
        &self,
        window: &mut RegisterWindow<B>,
        byte: u8,
    ) -> Result<usize, HardwareError> {
        let Some(selection) = LedSelection::decode(byte) else {
            debug!("led: ignoring byte {byte:#04x}");
            return Ok(COMMAND_LEN);
        };
        debug!("led: command {:?}", selection);

        if let Some(pin) = selection.lit(&self.pins) {
            window.drive_high(pin)?;
        }
        // Each pin gets its own clear write rather than a combined mask.
        for pin in selection.dark(&self.pins) {
            window.drive_low(pin)?;
        }
        Ok(COMMAND_LEN)
    }
}
