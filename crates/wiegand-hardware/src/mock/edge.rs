//! Mock edge source implementation for testing and development.
//!
//! This module provides a simulated pair of Wiegand data lines that can be
//! pulsed programmatically, without requiring physical hardware or GPIO
//! access.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    HardwareError, Result,
    traits::{DataLine, EdgeSource},
};
use wiegand_core::Bit;
use wiegand_decoder::BitSink;

/// Where pulses land once the source is started.
type SharedSink = Arc<Mutex<Option<BitSink>>>;

fn lock(sink: &Mutex<Option<BitSink>>) -> MutexGuard<'_, Option<BitSink>> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock Wiegand edge source for testing and development.
///
/// The source side plugs into the decoder like real hardware; the handle
/// side simulates a reader pulsing the data lines.
///
/// # Examples
///
/// ```
/// use wiegand_decoder::WiegandReceiver;
/// use wiegand_hardware::{EdgeSource, mock::MockEdgeSource, traits::DataLine};
///
/// # fn main() -> wiegand_hardware::Result<()> {
/// let receiver = WiegandReceiver::with_defaults();
/// let (mut source, handle) = MockEdgeSource::new();
/// source.start(receiver.sink())?;
///
/// handle.pulse(DataLine::Data1)?;
/// handle.pulse(DataLine::Data0)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MockEdgeSource {
    sink: SharedSink,
    name: String,
}

impl MockEdgeSource {
    /// Create a new mock edge source with the default name.
    ///
    /// Returns a tuple of (MockEdgeSource, MockEdgeHandle) where the handle
    /// is used to simulate line pulses.
    pub fn new() -> (Self, MockEdgeHandle) {
        Self::with_name("Mock Wiegand Lines".to_string())
    }

    /// Create a new mock edge source with a custom name.
    pub fn with_name(name: String) -> (Self, MockEdgeHandle) {
        let sink: SharedSink = Arc::new(Mutex::new(None));

        let source = Self {
            sink: Arc::clone(&sink),
            name: name.clone(),
        };
        let handle = MockEdgeHandle { sink, name };

        (source, handle)
    }

    /// Get the source name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EdgeSource for MockEdgeSource {
    fn start(&mut self, sink: BitSink) -> Result<()> {
        *lock(&self.sink) = Some(sink);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        *lock(&self.sink) = None;
        Ok(())
    }
}

/// Handle for pulsing a mock edge source's data lines.
///
/// The handle is cloneable, so tests can simulate the two lines firing
/// from independent contexts.
#[derive(Debug, Clone)]
pub struct MockEdgeHandle {
    sink: SharedSink,
    name: String,
}

impl MockEdgeHandle {
    /// Fire one rising edge on the given line.
    ///
    /// # Errors
    ///
    /// Returns an error if the source has not been started or has been
    /// stopped.
    pub fn pulse(&self, line: DataLine) -> Result<()> {
        match lock(&self.sink).as_ref() {
            Some(sink) => {
                sink.push(line.bit());
                Ok(())
            }
            None => Err(HardwareError::disconnected(self.name.clone())),
        }
    }

    /// Transmit a whole bit sequence, pulsing the matching line per bit.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not started.
    pub fn send_bits(&self, bits: &[Bit]) -> Result<()> {
        for bit in bits {
            let line = match bit {
                Bit::Zero => DataLine::Data0,
                Bit::One => DataLine::Data1,
            };
            self.pulse(line)?;
        }
        Ok(())
    }

    /// Returns `true` if the source is started and pulses will land.
    pub fn is_attached(&self) -> bool {
        lock(&self.sink).is_some()
    }

    /// Get the source name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiegand_decoder::{ReceiverConfig, WiegandReceiver};

    fn fast_receiver() -> WiegandReceiver {
        WiegandReceiver::new(ReceiverConfig {
            capacity: 32,
            frame_timeout: Duration::from_millis(3),
        })
        .unwrap()
    }

    #[test]
    fn test_mock_pulse_before_start_fails() {
        let (_source, handle) = MockEdgeSource::new();

        assert!(!handle.is_attached());
        let result = handle.pulse(DataLine::Data0);
        assert!(matches!(result, Err(HardwareError::Disconnected { .. })));
    }

    #[test]
    fn test_mock_pulses_reach_receiver() {
        let receiver = fast_receiver();
        let (mut source, handle) = MockEdgeSource::new();

        source.start(receiver.sink()).unwrap();
        assert!(handle.is_attached());

        handle.pulse(DataLine::Data1).unwrap();
        handle.pulse(DataLine::Data0).unwrap();
        handle.pulse(DataLine::Data1).unwrap();

        std::thread::sleep(Duration::from_millis(15));
        let frame = receiver.read_frame().unwrap();
        assert_eq!(frame.to_bit_string(), "101");
    }

    #[test]
    fn test_mock_stop_detaches() {
        let receiver = fast_receiver();
        let (mut source, handle) = MockEdgeSource::new();

        source.start(receiver.sink()).unwrap();
        source.stop().unwrap();

        assert!(!handle.is_attached());
        assert!(handle.pulse(DataLine::Data0).is_err());

        // Stopping twice is a no-op.
        source.stop().unwrap();
    }

    #[test]
    fn test_mock_send_bits() {
        let receiver = fast_receiver();
        let (mut source, handle) = MockEdgeSource::new();
        source.start(receiver.sink()).unwrap();

        let bits = [Bit::Zero, Bit::One, Bit::One, Bit::Zero];
        handle.send_bits(&bits).unwrap();

        std::thread::sleep(Duration::from_millis(15));
        assert_eq!(receiver.read_frame().unwrap().to_bit_string(), "0110");
    }

    #[test]
    fn test_mock_handle_clone_shares_attachment() {
        let receiver = fast_receiver();
        let (mut source, handle) = MockEdgeSource::new();
        let handle_clone = handle.clone();

        source.start(receiver.sink()).unwrap();
        assert!(handle.is_attached());
        assert!(handle_clone.is_attached());

        handle_clone.pulse(DataLine::Data1).unwrap();
        std::thread::sleep(Duration::from_millis(15));
        assert_eq!(receiver.read_frame().unwrap().to_bit_string(), "1");
    }
}
