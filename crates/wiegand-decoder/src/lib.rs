//! Wiegand bitstream capture and credential decoding.
//!
//! This crate contains the core of the decoder: a receiver that accumulates
//! bits delivered by asynchronous edge callbacks, infers frame boundaries
//! from quiet periods on the wire, and hands completed frames to a polling
//! consumer; plus the configurable bit-layout decoding of facility and card
//! codes.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐  BitSink::push   ┌──────────────────┐
//! │ DATA0 callback│─────────────────►│                  │
//! └───────────────┘                  │  WiegandReceiver │  read_frame()
//! ┌───────────────┐                  │  (mutex-guarded  │◄───────────────
//! │ DATA1 callback│─────────────────►│   bit buffer)    │   poll task
//! └───────────────┘                  └──────────────────┘
//! ```
//!
//! The wire protocol has no end-of-frame marker. A frame is complete once
//! no bit has arrived for the configured quiet period (3 ms by default).
//! The producer side ([`BitSink`]) is cloneable and safe to call from any
//! number of interrupt-like contexts; the consumer side drains the buffer
//! with a single non-blocking, one-shot [`WiegandReceiver::read`] call.
//!
//! For event-style consumption, [`FrameListener`] runs the polling loop in
//! a tokio task and forwards completed frames through an mpsc channel.
//!
//! # Examples
//!
//! ```
//! use wiegand_core::Bit;
//! use wiegand_decoder::{ReceiverConfig, WiegandReceiver};
//! use std::time::Duration;
//!
//! # fn main() -> wiegand_core::Result<()> {
//! let receiver = WiegandReceiver::new(ReceiverConfig {
//!     capacity: 32,
//!     frame_timeout: Duration::from_millis(3),
//! })?;
//!
//! let sink = receiver.sink();
//! sink.push(Bit::One);
//! sink.push(Bit::Zero);
//!
//! // Less than 3 ms have passed since the last bit, so the
//! // transmission is presumed to still be in progress.
//! assert_eq!(receiver.pending_bits(), 0);
//! # Ok(())
//! # }
//! ```

pub mod format;
pub mod listener;
pub mod receiver;

pub use format::{BitRange, WiegandFormat};
pub use listener::{FrameListener, ListenerConfig, ListenerHandle};
pub use receiver::{BitSink, ReceiverConfig, WiegandReceiver};
