//! myled — register-level GPIO LED selector.
//!
//! A write of one ASCII digit lights one of three LEDs (`'1'`, `'2'`, `'3'`)
//! or turns them all off (`'0'`).  The crate maps the GPIO controller's
//! register window, configures the LED pins as outputs once at load, and
//! drives the set/clear registers per command.  Device-node registration is
//! left to the caller, which plugs [`app::ports::WriteHandler`] into it.
//!
//! Hardware access is cfg-gated: the `mmio` feature enables the `/dev/mem`
//! mapper; every other build uses the in-memory simulator.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod device;
pub mod drivers;
pub mod error;
pub mod pins;

pub use app::ports::WriteHandler;
pub use device::{LedDriver, LoadedDriver};
pub use error::{ConfigurationError, Error, HardwareError, MapError};
