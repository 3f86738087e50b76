//! Application core — command decoding and the LED engine, zero I/O.
//!
//! All interaction with hardware happens through the **port traits** in
//! [`ports`], keeping this layer fully testable against the simulated
//! register file.

pub mod commands;
pub mod ports;
pub mod service;
