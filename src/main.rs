//! myled — host entry point.
//!
//! Stands in for the device registration layer: the driver is loaded, every
//! line read from stdin is handed to the write entry point as one write
//! call, and the driver is unloaded at end of input.
//!
//! ```text
//! $ myled [config.json]
//! 1        # LED A on
//! 0        # all off
//! ```
//!
//! Built with `--features mmio` the real GPIO block is mapped through
//! `/dev/mem`; otherwise the in-memory register file is used.
#![deny(unused_must_use)]

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use myled::app::ports::WindowMapper;
use myled::config::DriverConfig;
use myled::{LedDriver, LoadedDriver, WriteHandler};

// ── Mapper selection ──────────────────────────────────────────

#[cfg(feature = "mmio")]
fn mapper(config: &DriverConfig) -> myled::adapters::devmem::DevMemMapper {
    myled::adapters::devmem::DevMemMapper::new(&config.mem_device)
}

#[cfg(not(feature = "mmio"))]
fn mapper(_config: &DriverConfig) -> myled::adapters::sim::SimMapper {
    info!("mmio disabled, using simulated register file");
    myled::adapters::sim::SimMapper::new()
}

fn load_config() -> Result<DriverConfig> {
    let Some(path) = std::env::args_os().nth(1) else {
        return Ok(DriverConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.to_string_lossy()))?;
    DriverConfig::from_json(&text).context("parsing driver config")
}

/// Hand every line of `input` to `device` as one write, then unload it.
///
/// The driver is unloaded whatever happens; a read error is returned
/// alongside it.
fn serve<M, R>(mut device: LoadedDriver<M>, input: R) -> (LedDriver<M>, io::Result<()>)
where
    M: WindowMapper,
    R: BufRead,
{
    let mut outcome = Ok(());
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                outcome = Err(e);
                break;
            }
        };
        match device.write(line.as_bytes()) {
            Ok(consumed) => debug!("write {:?} consumed {consumed}", line),
            Err(e) => {
                // The device is unusable until reloaded.
                warn!("write {:?} failed: {e}", line);
                break;
            }
        }
    }
    (device.on_unload(), outcome)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("myled v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let driver = LedDriver::new(mapper(&config), config).context("invalid configuration")?;
    let device = driver
        .on_load()
        .map_err(|(_, e)| e)
        .context("loading LED device")?;

    let (_driver, served) = serve(device, io::stdin().lock());
    served.context("reading stdin")
}
