//! Edge-source trait definitions.
//!
//! This module defines the contract between the decoder core and whatever
//! delivers rising-edge notifications: real GPIO interrupt hardware or the
//! mock used for development and testing. An edge source does not interpret
//! bits; it only maps a pulse on a physical line to a push into the
//! decoder's [`BitSink`].

use crate::error::Result;
use wiegand_core::Bit;
use wiegand_decoder::BitSink;

/// The two Wiegand data lines.
///
/// Both lines rest high. A pulse on DATA0 signals a 0 bit, a pulse on
/// DATA1 signals a 1 bit. A genuine reader never pulses both lines at
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataLine {
    /// The line carrying 0 bits.
    Data0,

    /// The line carrying 1 bits.
    Data1,
}

impl DataLine {
    /// The bit value a pulse on this line encodes.
    #[inline]
    #[must_use]
    pub fn bit(self) -> Bit {
        match self {
            DataLine::Data0 => Bit::Zero,
            DataLine::Data1 => Bit::One,
        }
    }
}

impl std::fmt::Display for DataLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data0 => write!(f, "DATA0"),
            Self::Data1 => write!(f, "DATA1"),
        }
    }
}

/// A source of rising-edge notifications for the two data lines.
///
/// Implementations register one callback per line; each callback pushes
/// that line's bit value into the provided sink. Callbacks run in the
/// source's own context (an interrupt dispatch thread for real GPIO), so
/// they must stay within [`BitSink::push`]'s bounded-time contract: no
/// blocking, no allocation, no I/O.
///
/// # Examples
///
/// ```
/// use wiegand_decoder::WiegandReceiver;
/// use wiegand_hardware::{EdgeSource, mock::MockEdgeSource};
///
/// # fn main() -> wiegand_hardware::Result<()> {
/// let receiver = WiegandReceiver::with_defaults();
/// let (mut source, _handle) = MockEdgeSource::new();
///
/// source.start(receiver.sink())?;
/// // ... pulses now land in the receiver ...
/// source.stop()?;
/// # Ok(())
/// # }
/// ```
pub trait EdgeSource: Send {
    /// Register edge callbacks feeding the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying line resources cannot be
    /// configured or the callbacks cannot be registered.
    fn start(&mut self, sink: BitSink) -> Result<()>;

    /// Deregister the edge callbacks.
    ///
    /// After `stop` returns no further bits are delivered. Stopping a
    /// source that was never started is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if deregistration fails at the hardware layer.
    fn stop(&mut self) -> Result<()>;
}
