//! Bit accumulation, frame-boundary detection, and the drain/reset reader.
//!
//! The receiver owns one mutable capture state: the in-progress bit buffer
//! and the timestamp of the most recent bit. The state is written by edge
//! callbacks through [`BitSink`] and drained by a polling consumer through
//! [`WiegandReceiver::read`]. A single mutex guards the state; every
//! critical section is a handful of instructions (append + stamp, or
//! copy-and-reset), short enough to be safe from interrupt-like callback
//! threads.
//!
//! Frame completion is inferred, not signaled: the Wiegand wire format has
//! no terminator, so the receiver treats any inter-bit gap longer than the
//! configured quiet period as proof that the transmission ended.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;
use wiegand_core::constants::{DEFAULT_CAPACITY_BITS, DEFAULT_FRAME_TIMEOUT_MS, MAX_CAPACITY_BITS};
use wiegand_core::{Bit, CredentialFrame, Error, Result};

/// Capture configuration, fixed at receiver construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverConfig {
    /// Bit buffer capacity. Bits received beyond this are silently dropped.
    pub capacity: usize,

    /// Quiet period after which a transmission is considered complete.
    pub frame_timeout: Duration,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY_BITS,
            frame_timeout: Duration::from_millis(DEFAULT_FRAME_TIMEOUT_MS),
        }
    }
}

impl ReceiverConfig {
    fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY_BITS {
            return Err(Error::InvalidCapacity {
                capacity: self.capacity,
                max: MAX_CAPACITY_BITS,
            });
        }
        if self.frame_timeout.is_zero() {
            return Err(Error::Config(
                "frame timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shared capture state: the bit buffer and the last-bit timestamp.
#[derive(Debug)]
struct Accumulator {
    /// Arrival-order bit buffer. Preallocated to capacity so the callback
    /// path never allocates.
    bits: Vec<Bit>,

    /// Monotonic timestamp of the most recent edge callback, stamped even
    /// when the bit itself was dropped for being over capacity.
    last_bit_at: Option<Instant>,
}

impl Accumulator {
    fn push(&mut self, bit: Bit, capacity: usize) {
        if self.bits.len() < capacity {
            self.bits.push(bit);
        }
        self.last_bit_at = Some(Instant::now());
    }

    fn pending(&self, frame_timeout: Duration) -> usize {
        if self.bits.is_empty() {
            return 0;
        }
        // Instant subtraction yields one normalized Duration, so the quiet
        // period comparison cannot misjudge a seconds/nanoseconds borrow.
        match self.last_bit_at {
            Some(at) if at.elapsed() >= frame_timeout => self.bits.len(),
            _ => 0,
        }
    }
}

fn lock(state: &Mutex<Accumulator>) -> MutexGuard<'_, Accumulator> {
    // The accumulator is valid after any partial update, so a poisoned
    // mutex can be recovered rather than propagated.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable producer handle feeding bits into a receiver.
///
/// One sink is typically cloned per data line and invoked from that line's
/// rising-edge callback. `push` is bounded, non-blocking and performs no
/// allocation or I/O, so it is safe in contexts that preempt normal
/// execution. Interleaved pushes from both lines cannot corrupt the buffer;
/// if a faulty reader ever pulses both lines at once, last write wins.
#[derive(Debug, Clone)]
pub struct BitSink {
    state: Arc<Mutex<Accumulator>>,
    capacity: usize,
}

impl BitSink {
    /// Append one bit to the capture buffer.
    ///
    /// If the buffer is full the bit is dropped, but the last-bit timestamp
    /// is refreshed regardless so the quiet-period detector keeps tracking
    /// the transmission.
    pub fn push(&self, bit: Bit) {
        lock(&self.state).push(bit, self.capacity);
    }
}

/// Interrupt-fed Wiegand bitstream receiver.
///
/// Owns the capture state and exposes the consumer-side operations:
/// [`pending_bits`](Self::pending_bits) (frame-boundary detection),
/// [`read`](Self::read) (one-shot drain and reset) and
/// [`reset`](Self::reset). Producer callbacks feed it through handles
/// obtained from [`sink`](Self::sink).
///
/// Conceptually the receiver cycles through three states for the lifetime
/// of the process: Idle (buffer empty), Accumulating (bits arriving,
/// inter-bit gaps below the timeout) and Ready (quiet period elapsed), with
/// `read` moving it from Ready back to Idle.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wiegand_core::Bit;
/// use wiegand_decoder::{ReceiverConfig, WiegandReceiver};
///
/// # fn main() -> wiegand_core::Result<()> {
/// let receiver = WiegandReceiver::new(ReceiverConfig {
///     capacity: 32,
///     frame_timeout: Duration::from_millis(1),
/// })?;
/// let sink = receiver.sink();
///
/// for bit in [Bit::One, Bit::Zero, Bit::One] {
///     sink.push(bit);
/// }
/// std::thread::sleep(Duration::from_millis(5));
///
/// let frame = receiver.read_frame().expect("frame should be complete");
/// assert_eq!(frame.to_bit_string(), "101");
///
/// // The read drained the buffer; nothing is pending anymore.
/// assert!(receiver.read_frame().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WiegandReceiver {
    state: Arc<Mutex<Accumulator>>,
    config: ReceiverConfig,
}

impl WiegandReceiver {
    /// Create a receiver with the given configuration.
    ///
    /// # Errors
    /// Returns `Error::InvalidCapacity` if the capacity is 0 or larger than
    /// [`MAX_CAPACITY_BITS`], or `Error::Config` if the frame timeout is
    /// zero.
    pub fn new(config: ReceiverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: Arc::new(Mutex::new(Accumulator {
                bits: Vec::with_capacity(config.capacity),
                last_bit_at: None,
            })),
            config,
        })
    }

    /// Create a receiver with the default capacity (32 bits) and frame
    /// timeout (3 ms).
    #[must_use]
    pub fn with_defaults() -> Self {
        // The default configuration is statically valid.
        Self::new(ReceiverConfig::default()).expect("default receiver config is valid")
    }

    /// Obtain a producer handle for edge callbacks.
    #[must_use]
    pub fn sink(&self) -> BitSink {
        BitSink {
            state: Arc::clone(&self.state),
            capacity: self.config.capacity,
        }
    }

    /// The configured bit buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// The configured quiet period.
    #[must_use]
    pub fn frame_timeout(&self) -> Duration {
        self.config.frame_timeout
    }

    /// Number of bits in the completed frame, or 0 if no frame is complete.
    ///
    /// Returns 0 while the buffer is empty, and also while the most recent
    /// bit is fresher than the frame timeout (the transmission is presumed
    /// to still be in progress). This is a pure read: calling it repeatedly
    /// never mutates state.
    #[must_use]
    pub fn pending_bits(&self) -> usize {
        lock(&self.state).pending(self.config.frame_timeout)
    }

    /// Drain the completed frame, delivering at most `max_bits` bits.
    ///
    /// Non-blocking and one-shot: returns `None` immediately when no frame
    /// is complete; otherwise copies the first `min(length, max_bits)` bits
    /// into a fresh [`CredentialFrame`], clears the buffer, and returns the
    /// frame. The frame's [`bit_count`](CredentialFrame::bit_count) is the
    /// true captured length, which may exceed the delivered bits — compare
    /// the two to detect truncation.
    ///
    /// The completion check, copy and reset happen under one lock
    /// acquisition, so bits of a subsequent transmission can never leak
    /// into the drained frame.
    pub fn read(&self, max_bits: usize) -> Option<CredentialFrame> {
        let mut state = lock(&self.state);
        let bit_count = state.pending(self.config.frame_timeout);
        if bit_count == 0 {
            return None;
        }

        let delivered = state.bits[..bit_count.min(max_bits)].to_vec();
        state.bits.clear();
        drop(state);

        debug!(bits = bit_count, "credential frame drained");
        // bit_count >= delivered.len() holds by construction.
        let frame = CredentialFrame::new(delivered, bit_count)
            .expect("captured bit count is at least the delivered bit count");
        Some(frame)
    }

    /// Drain the completed frame without a delivery limit.
    ///
    /// Equivalent to `read(capacity)`; the resulting frame is never
    /// truncated.
    pub fn read_frame(&self) -> Option<CredentialFrame> {
        self.read(self.config.capacity)
    }

    /// Discard any accumulated bits.
    ///
    /// Callable at any time, including concurrently with producer pushes:
    /// after `reset` returns the buffer length is 0 and pushes that
    /// happen-after start a fresh frame. A push racing the reset may be
    /// lost, which the protocol's quiet-period spacing makes acceptable.
    pub fn reset(&self) {
        lock(&self.state).bits.clear();
    }
}
