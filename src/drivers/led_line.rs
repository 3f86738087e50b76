//! embedded-hal view of one configured output line.
//!
//! Lets generic `OutputPin` consumers drive an LED without knowing about the
//! register window.  The line borrows the window mutably, so it cannot
//! outlive an unmap.

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::app::ports::RegisterBlock;
use crate::drivers::register_map::{Pin, RegisterWindow};
use crate::error::HardwareError;

pub struct OutputLine<'w, B: RegisterBlock> {
    window: &'w mut RegisterWindow<B>,
    pin: Pin,
}

impl<B: RegisterBlock> RegisterWindow<B> {
    /// Borrow `pin` as an [`OutputPin`].  Only configured pins yield a line.
    pub fn output(&mut self, pin: Pin) -> Result<OutputLine<'_, B>, HardwareError> {
        if !self.is_mapped() {
            return Err(HardwareError::Unmapped);
        }
        if !self.is_configured(pin) {
            return Err(HardwareError::PinNotConfigured(pin));
        }
        Ok(OutputLine { window: self, pin })
    }
}

impl<B: RegisterBlock> ErrorType for OutputLine<'_, B> {
    type Error = HardwareError;
}

impl<B: RegisterBlock> OutputPin for OutputLine<'_, B> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.window.drive_high(self.pin)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.window.drive_low(self.pin)
    }
}
