//! Raspberry Pi GPIO edge source backed by `rppal` async interrupts.
//!
//! The Wiegand data lines are 5V open-collector outputs on most readers;
//! the Raspberry Pi's GPIO pins are 3.3V. Level-shift both lines before
//! connecting them, or the Pi will be damaged.
//!
//! Each line is configured as a pulled-up input with a rising-edge async
//! interrupt. The interrupt callbacks run on rppal's dispatch thread and do
//! nothing but push the line's bit value into the decoder sink, staying
//! within the bounded-time contract of the callback context.

use rppal::gpio::{Gpio, InputPin, Trigger};
use tracing::info;

use crate::{
    Result,
    traits::{DataLine, EdgeSource},
};
use wiegand_decoder::BitSink;

/// Physical pin assignment for the two data lines (BCM numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioConfig {
    /// BCM pin connected to DATA0.
    pub data0_pin: u8,

    /// BCM pin connected to DATA1.
    pub data1_pin: u8,
}

/// Wiegand edge source for Raspberry Pi GPIO pins.
///
/// # Examples
///
/// ```no_run
/// use wiegand_decoder::WiegandReceiver;
/// use wiegand_hardware::{EdgeSource, gpio::{GpioConfig, RppalEdgeSource}};
///
/// # fn main() -> wiegand_hardware::Result<()> {
/// let receiver = WiegandReceiver::with_defaults();
/// let mut source = RppalEdgeSource::new(GpioConfig {
///     data0_pin: 4,
///     data1_pin: 5,
/// })?;
/// source.start(receiver.sink())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RppalEdgeSource {
    data0: InputPin,
    data1: InputPin,
    config: GpioConfig,
    running: bool,
}

impl RppalEdgeSource {
    /// Claim both pins and configure them as pulled-up inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the GPIO peripheral is unavailable or either pin
    /// is already in use.
    pub fn new(config: GpioConfig) -> Result<Self> {
        let gpio = Gpio::new()?;
        let data0 = gpio.get(config.data0_pin)?.into_input_pullup();
        let data1 = gpio.get(config.data1_pin)?.into_input_pullup();

        Ok(Self {
            data0,
            data1,
            config,
            running: false,
        })
    }

    /// The configured pin assignment.
    #[must_use]
    pub fn config(&self) -> GpioConfig {
        self.config
    }
}

impl EdgeSource for RppalEdgeSource {
    fn start(&mut self, sink: BitSink) -> Result<()> {
        let data0_sink = sink.clone();
        self.data0.set_async_interrupt(Trigger::RisingEdge, None, move |_| {
            data0_sink.push(DataLine::Data0.bit());
        })?;

        self.data1.set_async_interrupt(Trigger::RisingEdge, None, move |_| {
            sink.push(DataLine::Data1.bit());
        })?;

        self.running = true;
        info!(
            data0 = self.config.data0_pin,
            data1 = self.config.data1_pin,
            "edge interrupts registered"
        );
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        self.data0.clear_async_interrupt()?;
        self.data1.clear_async_interrupt()?;
        self.running = false;
        Ok(())
    }
}
