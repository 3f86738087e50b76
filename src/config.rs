//! Driver configuration parameters
//!
//! Platform constants for the register window and the LED pin table.
//! Defaults come from [`crate::pins`]; the host binary may override them
//! from a JSON file at startup.  Nothing here changes at runtime.

use serde::Deserialize;

use crate::app::commands::LedPins;
use crate::drivers::register_map::Pin;
use crate::error::ConfigurationError;
use crate::pins::{GPIO_BASE, GPIO_WINDOW_LEN, LED_GPIOS, MEM_DEVICE, MIN_WINDOW_WORDS};

/// Page granularity for the physical base address.
const PAGE_SIZE: u64 = 4096;

/// Startup configuration for one LED device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Physical base address of the GPIO register block.
    pub gpio_base: u64,
    /// Bytes to map from `gpio_base`.
    pub window_len: usize,
    /// GPIO numbers for LEDs A, B, C (commands '1', '2', '3').
    pub led_pins: [u8; 3],
    /// Memory device used by the `mmio` mapper.
    pub mem_device: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            gpio_base: GPIO_BASE,
            window_len: GPIO_WINDOW_LEN,
            led_pins: LED_GPIOS,
            mem_device: MEM_DEVICE.into(),
        }
    }
}

impl DriverConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Check window geometry and the pin table, returning validated pins.
    pub fn validate(&self) -> Result<LedPins, ConfigurationError> {
        if self.gpio_base % PAGE_SIZE != 0 {
            return Err(ConfigurationError::MisalignedBase);
        }
        if self.window_len % 4 != 0 || self.window_len / 4 < MIN_WINDOW_WORDS {
            return Err(ConfigurationError::BadWindowLen(self.window_len));
        }

        let [a, b, c] = self.led_pins;
        let pins = LedPins {
            a: Pin::new(a)?,
            b: Pin::new(b)?,
            c: Pin::new(c)?,
        };
        if a == b || a == c {
            return Err(ConfigurationError::DuplicatePin(a));
        }
        if b == c {
            return Err(ConfigurationError::DuplicatePin(b));
        }
        Ok(pins)
    }
}
