//! Unified error types for the LED driver.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! load hook and the host binary's error handling uniform.  All variants are
//! `Copy` so they can be returned from the write path without allocation.

use core::fmt;

use crate::drivers::register_map::Pin;

// ---------------------------------------------------------------------------
// Top-level driver error
// ---------------------------------------------------------------------------

/// Every fallible operation in the driver funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The register window could not be established.
    Map(MapError),
    /// Configuration was invalid or pin setup failed during load.
    Config(ConfigurationError),
    /// A register access was attempted through an unusable window.
    Hardware(HardwareError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(e) => write!(f, "map: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Map errors
// ---------------------------------------------------------------------------

/// The platform could not satisfy a register window mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Base or length is not word aligned (or not page aligned for `/dev/mem`).
    Misaligned,
    /// Window is too short to reach the set/clear registers.
    TooShort,
    /// The memory device does not exist or rejected the address.
    InvalidAddress,
    /// The caller lacks the privilege to open the memory device.
    PermissionDenied,
    /// Some part of the range is already owned by another window.
    AlreadyMapped,
    /// No more windows can be tracked by the mapper.
    TooManyWindows,
    /// The OS refused the mapping for another reason (raw errno if known).
    Os(i32),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misaligned => write!(f, "base or length misaligned"),
            Self::TooShort => write!(f, "window too short for set/clear registers"),
            Self::InvalidAddress => write!(f, "invalid physical address"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::AlreadyMapped => write!(f, "region already mapped"),
            Self::TooManyWindows => write!(f, "too many windows"),
            Self::Os(errno) => write!(f, "mmap failed (errno={errno})"),
        }
    }
}

impl From<MapError> for Error {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Pin number outside 0..=53.
    InvalidPin(u8),
    /// The same pin was assigned to two LEDs.
    DuplicatePin(u8),
    /// `gpio_base` is not page aligned.
    MisalignedBase,
    /// `window_len` is not a multiple of 4 or too short.
    BadWindowLen(usize),
    /// The function-select write for a pin could not be performed.
    PinSetup { pin: Pin, cause: HardwareError },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPin(p) => write!(f, "GPIO{p} out of range"),
            Self::DuplicatePin(p) => write!(f, "GPIO{p} assigned twice"),
            Self::MisalignedBase => write!(f, "gpio_base not page aligned"),
            Self::BadWindowLen(len) => write!(f, "window_len {len:#x} unusable"),
            Self::PinSetup { pin, cause } => write!(f, "{pin} setup failed: {cause}"),
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(e: ConfigurationError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

/// A register access could not be performed.  Fatal to the current call
/// only; the device must be reloaded before it is usable again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// The window has been unmapped.
    Unmapped,
    /// The pin was never passed to `configure_as_output`.
    PinNotConfigured(Pin),
    /// A register index fell outside the mapped window.
    OutOfWindow(usize),
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmapped => write!(f, "register window unmapped"),
            Self::PinNotConfigured(pin) => write!(f, "{pin} not configured as output"),
            Self::OutOfWindow(idx) => write!(f, "register word {idx} outside window"),
        }
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

impl embedded_hal::digital::Error for HardwareError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Driver-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
