//! Device lifecycle — load, serve, unload.
//!
//! The ordering map → configure → serve → unmap is carried by the types:
//!
//! ```text
//!  LedDriver ──on_load()──▶ LoadedDriver ──write()…──▶ on_unload() ──▶ mapper
//! ```
//!
//! The write entry point ([`WriteHandler`]) only exists on [`LoadedDriver`],
//! which can only be obtained once every LED pin is configured as an
//! output.  `on_unload` consumes it, so nothing can write after the window
//! is released.

use log::{info, warn};

use crate::app::commands::LedPins;
use crate::app::ports::{WindowMapper, WriteHandler};
use crate::app::service::LedCommandEngine;
use crate::config::DriverConfig;
use crate::drivers::register_map::RegisterWindow;
use crate::error::{Error, Result};

/// An LED device that has not been loaded yet.
pub struct LedDriver<M: WindowMapper> {
    mapper: M,
    config: DriverConfig,
    pins: LedPins,
}

impl<M: WindowMapper> LedDriver<M> {
    /// Validate `config` and bind it to `mapper`.
    pub fn new(mapper: M, config: DriverConfig) -> Result<Self> {
        let pins = config.validate()?;
        Ok(Self {
            mapper,
            config,
            pins,
        })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Map the window and configure every LED pin as an output.
    ///
    /// If pin setup fails the window is unmapped again before the error is
    /// returned, so a failed load leaves no claim behind.
    pub fn on_load(mut self) -> core::result::Result<LoadedDriver<M>, (Self, Error)> {
        let (base, len) = (self.config.gpio_base, self.config.window_len);
        let mut window = match RegisterWindow::map(&mut self.mapper, base, len) {
            Ok(w) => w,
            Err(e) => {
                warn!("led: load failed: {e}");
                return Err((self, e.into()));
            }
        };

        if let Err(e) = window.configure_outputs(&self.pins.as_array()) {
            window.unmap(&mut self.mapper);
            warn!("led: load failed: {e}");
            return Err((self, e.into()));
        }

        let pins = self.pins;
        info!("led: loaded (A={}, B={}, C={})", pins.a, pins.b, pins.c);
        Ok(LoadedDriver {
            mapper: self.mapper,
            config: self.config,
            window,
            engine: LedCommandEngine::new(pins),
        })
    }

    /// Hand the mapper back without loading.
    pub fn into_mapper(self) -> M {
        self.mapper
    }
}

/// A loaded LED device; the only type that accepts writes.
pub struct LoadedDriver<M: WindowMapper> {
    mapper: M,
    config: DriverConfig,
    window: RegisterWindow<M::Block>,
    engine: LedCommandEngine,
}

impl<M: WindowMapper> LoadedDriver<M> {
    pub fn window(&self) -> &RegisterWindow<M::Block> {
        &self.window
    }

    pub fn pins(&self) -> &LedPins {
        self.engine.pins()
    }

    /// Unmap the window and return to the unloaded state.
    pub fn on_unload(self) -> LedDriver<M> {
        let Self {
            mut mapper,
            config,
            mut window,
            engine,
        } = self;
        window.unmap(&mut mapper);
        info!("led: unloaded");
        LedDriver {
            mapper,
            config,
            pins: *engine.pins(),
        }
    }
}

impl<M: WindowMapper> WriteHandler for LoadedDriver<M> {
    /// Consume the leading byte of `buf`; the rest is ignored.  An empty
    /// buffer consumes nothing and touches no register.
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let Some(&byte) = buf.first() else {
            return Ok(0);
        };
        Ok(self.engine.apply_command(&mut self.window, byte)?)
    }
}
