//! Event-style frame delivery on top of the polling receiver.
//!
//! The hardware layer delivers edges, not frames, so frame completion can
//! only be observed by polling the receiver's quiet-period detector. This
//! module confines that polling to one tokio task and exposes completed
//! frames as an awaitable stream instead.
//!
//! ```text
//! ┌──────────────────┐   read_frame()   ┌───────────┐
//! │ WiegandReceiver  │◄─────────────────│ Poll Task │
//! └──────────────────┘                  └─────┬─────┘
//!                                             │ mpsc
//!                                             ▼
//!                                     ListenerHandle::recv()
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use wiegand_decoder::{FrameListener, ListenerConfig, WiegandReceiver};
//!
//! #[tokio::main]
//! async fn main() -> wiegand_core::Result<()> {
//!     let receiver = WiegandReceiver::with_defaults();
//!     let sink = receiver.sink();
//!     // ... hand `sink` to the edge source ...
//!
//!     let mut handle = FrameListener::new(receiver, ListenerConfig::default()).start();
//!
//!     while let Some(frame) = handle.recv().await {
//!         println!("frame: {frame}");
//!     }
//!
//!     handle.shutdown().await
//! }
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use wiegand_core::constants::DEFAULT_POLL_INTERVAL_MS;
use wiegand_core::{CredentialFrame, Result};

use crate::receiver::WiegandReceiver;

/// Frame channel depth. The protocol buffers at most one frame at the
/// receiver, so a small channel is plenty.
const FRAME_CHANNEL_CAPACITY: usize = 16;

/// Configuration for the polling task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Interval between receiver polls when no frame is pending.
    pub poll_interval: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Spawns the polling task that drains a receiver into a frame channel.
///
/// Consumes the receiver: the listener becomes the sole frame consumer,
/// while producer [`BitSink`](crate::BitSink) handles obtained beforehand
/// keep feeding it.
pub struct FrameListener {
    receiver: WiegandReceiver,
    config: ListenerConfig,
}

impl FrameListener {
    /// Create a listener for the given receiver.
    pub fn new(receiver: WiegandReceiver, config: ListenerConfig) -> Self {
        Self { receiver, config }
    }

    /// Spawn the polling task and return the consuming handle.
    pub fn start(self) -> ListenerHandle {
        let (frame_tx, frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);

        let mut tasks = JoinSet::new();
        tasks.spawn(Self::poll_task(self.receiver, self.config, frame_tx));

        ListenerHandle { frame_rx, tasks }
    }

    async fn poll_task(
        receiver: WiegandReceiver,
        config: ListenerConfig,
        frame_tx: mpsc::Sender<CredentialFrame>,
    ) -> Result<()> {
        let mut interval = tokio::time::interval(config.poll_interval);

        loop {
            interval.tick().await;

            let Some(frame) = receiver.read_frame() else {
                continue;
            };

            if frame.bit_count() == receiver.capacity() {
                // A frame that fills the buffer exactly may have lost
                // trailing bits to the capacity cap.
                warn!(
                    bits = frame.bit_count(),
                    "frame reached buffer capacity; trailing bits may have been dropped"
                );
            }
            debug!(bits = frame.bit_count(), "forwarding credential frame");

            if frame_tx.send(frame).await.is_err() {
                // Consumer dropped the handle.
                break;
            }
        }
        Ok(())
    }
}

/// Handle for receiving completed frames.
///
/// Holds the frame channel and the polling task; dropping the handle stops
/// the task on its next send attempt, while [`shutdown`](Self::shutdown)
/// stops it immediately.
pub struct ListenerHandle {
    frame_rx: mpsc::Receiver<CredentialFrame>,
    tasks: JoinSet<Result<()>>,
}

impl ListenerHandle {
    /// Receive the next completed frame.
    ///
    /// Blocks asynchronously until a frame arrives. Returns `None` once the
    /// polling task has terminated and the channel is drained.
    pub async fn recv(&mut self) -> Option<CredentialFrame> {
        self.frame_rx.recv().await
    }

    /// Stop the polling task and wait for it to terminate.
    pub async fn shutdown(mut self) -> Result<()> {
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiver::ReceiverConfig;
    use wiegand_core::Bit;

    fn fast_receiver() -> WiegandReceiver {
        WiegandReceiver::new(ReceiverConfig {
            capacity: 32,
            frame_timeout: Duration::from_millis(3),
        })
        .unwrap()
    }

    fn fast_listener_config() -> ListenerConfig {
        ListenerConfig {
            poll_interval: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_listener_delivers_completed_frame() {
        let receiver = fast_receiver();
        let sink = receiver.sink();

        let mut handle = FrameListener::new(receiver, fast_listener_config()).start();

        for bit in [Bit::One, Bit::Zero, Bit::One, Bit::One] {
            sink.push(bit);
        }

        let frame = tokio::time::timeout(Duration::from_secs(1), handle.recv())
            .await
            .expect("frame should arrive within a second")
            .expect("channel should be open");
        assert_eq!(frame.to_bit_string(), "1011");

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_listener_delivers_frames_in_sequence() {
        let receiver = fast_receiver();
        let sink = receiver.sink();

        let mut handle = FrameListener::new(receiver, fast_listener_config()).start();

        sink.push(Bit::One);
        let first = tokio::time::timeout(Duration::from_secs(1), handle.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.to_bit_string(), "1");

        sink.push(Bit::Zero);
        sink.push(Bit::Zero);
        let second = tokio::time::timeout(Duration::from_secs(1), handle.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.to_bit_string(), "00");

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_listener_shutdown_with_no_frames() {
        let receiver = fast_receiver();
        let handle = FrameListener::new(receiver, fast_listener_config()).start();
        handle.shutdown().await.unwrap();
    }
}
