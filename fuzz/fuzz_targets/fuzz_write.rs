//! Fuzz target: feed arbitrary write buffers to a loaded LED device.
//!
//! Each input is split on `\n` into individual writes.  Invariants checked
//! after every write: no panic, one byte consumed per non-empty write, at
//! most one LED lit.

#![no_main]

use libfuzzer_sys::fuzz_target;
use myled::adapters::sim::SimMapper;
use myled::config::DriverConfig;
use myled::{LedDriver, WriteHandler};

fuzz_target!(|data: &[u8]| {
    let Ok(driver) = LedDriver::new(SimMapper::new(), DriverConfig::default()) else {
        return;
    };
    let Ok(mut dev) = driver.on_load() else {
        return;
    };

    for chunk in data.split(|&b| b == b'\n') {
        let consumed = dev.write(chunk).expect("loaded device rejected a write");
        assert_eq!(consumed, usize::from(!chunk.is_empty()));

        let block = dev.window().block().expect("window mapped while loaded");
        let lit = dev.pins().as_array().into_iter().filter(|&p| block.level(p)).count();
        assert!(lit <= 1, "{lit} LEDs lit");
    }

    dev.on_unload();
});
