//! Enum wrapper for edge-source dispatch.
//!
//! The wrapper lets configuration pick an edge-source backend at runtime
//! while keeping concrete types (and feature-gated variants) instead of
//! boxed trait objects.

use crate::Result;
use crate::mock::MockEdgeSource;
use crate::traits::EdgeSource;
use wiegand_decoder::BitSink;

#[cfg(feature = "hardware-rppal")]
use crate::gpio::RppalEdgeSource;

/// Enum wrapper for edge-source dispatch.
///
/// # Examples
///
/// ```
/// use wiegand_decoder::WiegandReceiver;
/// use wiegand_hardware::{AnyEdgeSource, EdgeSource, mock::MockEdgeSource};
///
/// # fn main() -> wiegand_hardware::Result<()> {
/// let receiver = WiegandReceiver::with_defaults();
/// let (mock, _handle) = MockEdgeSource::new();
/// let mut source = AnyEdgeSource::Mock(mock);
///
/// source.start(receiver.sink())?;
/// source.stop()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyEdgeSource {
    /// Mock data lines for development and testing.
    Mock(MockEdgeSource),

    /// Raspberry Pi GPIO interrupts.
    #[cfg(feature = "hardware-rppal")]
    Rppal(RppalEdgeSource),
}

impl EdgeSource for AnyEdgeSource {
    fn start(&mut self, sink: BitSink) -> Result<()> {
        match self {
            Self::Mock(source) => source.start(sink),
            #[cfg(feature = "hardware-rppal")]
            Self::Rppal(source) => source.start(sink),
        }
    }

    fn stop(&mut self) -> Result<()> {
        match self {
            Self::Mock(source) => source.stop(),
            #[cfg(feature = "hardware-rppal")]
            Self::Rppal(source) => source.stop(),
        }
    }
}
