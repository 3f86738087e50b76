//! End-to-end command tests: load → write → inspect register traffic.

use crate::mock_hw::{PinOp, ops_since};

use myled::adapters::sim::SimMapper;
use myled::config::DriverConfig;
use myled::drivers::register_map::Pin;
use myled::{LedDriver, LoadedDriver, WriteHandler};

fn loaded() -> LoadedDriver<SimMapper> {
    let driver = LedDriver::new(SimMapper::new(), DriverConfig::default()).unwrap();
    driver.on_load().ok().unwrap()
}

fn mark(dev: &LoadedDriver<SimMapper>) -> usize {
    dev.window().block().unwrap().journal().len()
}

fn ops(dev: &LoadedDriver<SimMapper>, since: usize) -> Vec<PinOp> {
    ops_since(dev.window().block().unwrap(), since)
}

fn lit(dev: &LoadedDriver<SimMapper>) -> Vec<u8> {
    let block = dev.window().block().unwrap();
    dev.pins()
        .as_array()
        .into_iter()
        .filter(|&p| block.level(p))
        .map(Pin::number)
        .collect()
}

#[test]
fn select_b_then_all_off_then_ignored_byte() {
    let mut dev = loaded();

    let m = mark(&dev);
    assert_eq!(dev.write(b"2").unwrap(), 1);
    assert_eq!(
        ops(&dev, m),
        vec![PinOp::High(25), PinOp::Low(16), PinOp::Low(21)]
    );

    let m = mark(&dev);
    assert_eq!(dev.write(b"0").unwrap(), 1);
    assert_eq!(
        ops(&dev, m),
        vec![PinOp::Low(16), PinOp::Low(25), PinOp::Low(21)]
    );

    let m = mark(&dev);
    assert_eq!(dev.write(b"x").unwrap(), 1);
    assert!(ops(&dev, m).is_empty());
}

fn check_command(byte: u8, expected_ops: Vec<PinOp>, expected_lit: Vec<u8>) {
    let mut dev = loaded();
    let m = mark(&dev);
    assert_eq!(dev.write(&[byte]).unwrap(), 1);
    assert_eq!(ops(&dev, m), expected_ops, "command {:?}", byte as char);
    assert_eq!(lit(&dev), expected_lit, "command {:?}", byte as char);
}

#[test]
fn each_digit_matches_the_table() {
    check_command(
        b'1',
        vec![PinOp::High(16), PinOp::Low(25), PinOp::Low(21)],
        vec![16],
    );
    check_command(
        b'2',
        vec![PinOp::High(25), PinOp::Low(16), PinOp::Low(21)],
        vec![25],
    );
    check_command(
        b'3',
        vec![PinOp::High(21), PinOp::Low(16), PinOp::Low(25)],
        vec![21],
    );
    check_command(
        b'0',
        vec![PinOp::Low(16), PinOp::Low(25), PinOp::Low(21)],
        vec![],
    );
}

#[test]
fn switching_leds_never_leaves_two_lit() {
    let mut dev = loaded();
    for &byte in b"1231320" {
        dev.write(&[byte]).unwrap();
        assert!(lit(&dev).len() <= 1, "after {:?}", byte as char);
    }
    assert!(lit(&dev).is_empty());
}

#[test]
fn repeating_a_command_is_idempotent() {
    let mut dev = loaded();
    dev.write(b"3").unwrap();
    let once = lit(&dev);
    dev.write(b"3").unwrap();
    assert_eq!(lit(&dev), once);
    assert_eq!(once, vec![21]);
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut dev = loaded();
    let m = mark(&dev);
    assert_eq!(dev.write(b"1 and then 3").unwrap(), 1);
    assert_eq!(
        ops(&dev, m),
        vec![PinOp::High(16), PinOp::Low(25), PinOp::Low(21)]
    );
}

#[test]
fn empty_write_consumes_nothing() {
    let mut dev = loaded();
    let m = mark(&dev);
    assert_eq!(dev.write(&[]).unwrap(), 0);
    assert!(ops(&dev, m).is_empty());
}

#[test]
fn custom_pin_table_is_honoured() {
    let cfg = DriverConfig {
        led_pins: [5, 40, 13],
        ..DriverConfig::default()
    };
    let mut dev = LedDriver::new(SimMapper::new(), cfg)
        .unwrap()
        .on_load()
        .ok()
        .unwrap();
    let m = mark(&dev);
    dev.write(b"2").unwrap();
    assert_eq!(
        ops(&dev, m),
        vec![PinOp::High(40), PinOp::Low(5), PinOp::Low(13)]
    );
    assert_eq!(lit(&dev), vec![40]);
}
