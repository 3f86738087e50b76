//! Inbound LED commands.
//!
//! A write to the device carries one ASCII digit.  [`LedSelection::decode`]
//! turns that byte into the selection it names; bytes outside `'0'..='3'`
//! decode to `None` and are ignored by the engine.

use heapless::Vec;

use crate::drivers::register_map::Pin;

/// The three controlled LED pins in command order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPins {
    pub a: Pin,
    pub b: Pin,
    pub c: Pin,
}

impl LedPins {
    pub const fn as_array(&self) -> [Pin; 3] {
        [self.a, self.b, self.c]
    }
}

/// Which LED a command lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedSelection {
    /// `'0'`: every LED off.
    AllOff,
    /// `'1'`
    A,
    /// `'2'`
    B,
    /// `'3'`
    C,
}

impl LedSelection {
    pub const fn decode(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(Self::AllOff),
            b'1' => Some(Self::A),
            b'2' => Some(Self::B),
            b'3' => Some(Self::C),
            _ => None,
        }
    }

    /// Pin driven high, if any.
    pub const fn lit(self, pins: &LedPins) -> Option<Pin> {
        match self {
            Self::AllOff => None,
            Self::A => Some(pins.a),
            Self::B => Some(pins.b),
            Self::C => Some(pins.c),
        }
    }

    /// Pins driven low, in the order they are cleared.
    pub fn dark(self, pins: &LedPins) -> Vec<Pin, 3> {
        let lit = self.lit(pins);
        pins.as_array()
            .into_iter()
            .filter(|&p| Some(p) != lit)
            .collect()
    }
}
