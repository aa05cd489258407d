//! Hardware edge-source layer for the Wiegand decoder.
//!
//! This crate provides the abstraction between the decoder core and the
//! host's interrupt subsystem. The decoder only needs rising-edge
//! notifications on the two data lines; everything about pins, pull-ups
//! and interrupt registration lives here, behind the [`EdgeSource`] trait,
//! enabling substitution between the mock implementation (for development
//! and testing) and real GPIO hardware.
//!
//! # Backends
//!
//! - [`mock::MockEdgeSource`] — programmatically pulsed lines, always
//!   available.
//! - [`gpio::RppalEdgeSource`] — Raspberry Pi GPIO interrupts via `rppal`,
//!   behind the `hardware-rppal` feature.
//!
//! # Examples
//!
//! ```
//! use wiegand_decoder::WiegandReceiver;
//! use wiegand_hardware::{EdgeSource, mock::MockEdgeSource, traits::DataLine};
//!
//! # fn main() -> wiegand_hardware::Result<()> {
//! let receiver = WiegandReceiver::with_defaults();
//! let (mut source, handle) = MockEdgeSource::new();
//!
//! source.start(receiver.sink())?;
//! handle.pulse(DataLine::Data0)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Electrical Warning
//!
//! Wiegand readers drive their data lines at 5V; Raspberry Pi GPIO pins
//! are 3.3V. Level-shift both lines before connecting real hardware.

pub mod devices;
pub mod error;
pub mod mock;
pub mod traits;

#[cfg(feature = "hardware-rppal")]
pub mod gpio;

// Re-export commonly used types for convenience
pub use devices::AnyEdgeSource;
pub use error::{HardwareError, Result};
pub use traits::{DataLine, EdgeSource};
