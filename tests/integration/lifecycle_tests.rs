//! Load/unload ordering and startup failure handling.

use crate::mock_hw::{FailingMapper, PinOp, TruncatingMapper, decode};

use myled::adapters::sim::SimMapper;
use myled::config::DriverConfig;
use myled::drivers::register_map::{Function, Pin};
use myled::{ConfigurationError, Error, HardwareError, LedDriver, MapError};

#[test]
fn load_writes_only_function_select_registers() {
    let driver = LedDriver::new(SimMapper::new(), DriverConfig::default()).unwrap();
    let dev = driver.on_load().ok().unwrap();
    let block = dev.window().block().unwrap();

    // GPIO16 lives in GPFSEL1; GPIO25 and GPIO21 share GPFSEL2.
    assert_eq!(
        decode(block.journal()),
        vec![
            PinOp::FunctionSelect(1, 1 << 18),
            PinOp::FunctionSelect(2, 1 << 15),
            PinOp::FunctionSelect(2, (1 << 15) | (1 << 3)),
        ]
    );
    for pin in dev.pins().as_array() {
        assert_eq!(dev.window().function(pin).unwrap(), Function::Output);
    }
}

#[test]
fn load_keeps_alternate_functions_of_neighbours() {
    // GPIO14/15 (UART) in ALT0 inside GPFSEL1, next to GPIO16.
    let uart = (0b100 << 12) | (0b100 << 15);
    let mapper = SimMapper::new().with_word(1, uart);
    let dev = LedDriver::new(mapper, DriverConfig::default())
        .unwrap()
        .on_load()
        .ok()
        .unwrap();
    let window = dev.window();
    let pin = |n| Pin::new(n).unwrap();
    assert_eq!(window.function(pin(14)).unwrap(), Function::Alt0);
    assert_eq!(window.function(pin(15)).unwrap(), Function::Alt0);
    assert_eq!(window.function(pin(16)).unwrap(), Function::Output);
}

#[test]
fn map_failure_aborts_load_without_retry() {
    for error in [
        MapError::PermissionDenied,
        MapError::InvalidAddress,
        MapError::AlreadyMapped,
    ] {
        let driver = LedDriver::new(FailingMapper::new(error), DriverConfig::default()).unwrap();
        let (driver, err) = driver.on_load().err().unwrap();
        assert_eq!(err, Error::Map(error));
        assert_eq!(driver.into_mapper().attempts, 1);
    }
}

#[test]
fn pin_setup_failure_unmaps_before_reporting() {
    // Two words: GPFSEL0..1 only, so GPIO25 (GPFSEL2) cannot be reached.
    let driver = LedDriver::new(TruncatingMapper::new(2), DriverConfig::default()).unwrap();
    let (driver, err) = driver.on_load().err().unwrap();
    assert_eq!(
        err,
        Error::Config(ConfigurationError::PinSetup {
            pin: Pin::new(25).unwrap(),
            cause: HardwareError::OutOfWindow(2),
        })
    );
    assert_eq!(driver.into_mapper().releases, 1);
}

#[test]
fn unload_then_reload_starts_clean() {
    let driver = LedDriver::new(SimMapper::new(), DriverConfig::default()).unwrap();
    let dev = driver.on_load().ok().unwrap();
    let driver = dev.on_unload();
    assert_eq!(driver.config(), &DriverConfig::default());

    let dev = driver.on_load().ok().unwrap();
    let block = dev.window().block().unwrap();
    // Fresh block: only the three function-select writes.
    assert_eq!(block.journal().len(), 3);
    assert_eq!(dev.on_unload().into_mapper().live_windows(), 0);
}
