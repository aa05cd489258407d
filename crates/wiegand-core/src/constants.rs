//! Core constants for the Wiegand decoder.
//!
//! This module defines the timing and capacity constants used throughout the
//! decoder workspace. These values come from the electrical characteristics
//! of the Wiegand interface and from the fixed 26-bit credential layout used
//! by the large majority of deployed readers.
//!
//! # Wire Protocol
//!
//! The Wiegand interface has two data lines, DATA0 and DATA1, normally held
//! high. A 0 bit is signaled by a short pulse on DATA0, a 1 bit by a short
//! pulse on DATA1. Pulses are a few microseconds wide with a few
//! milliseconds between bits. There is no end-of-frame marker: a frame is
//! considered complete once both lines have been quiet for longer than
//! [`DEFAULT_FRAME_TIMEOUT_MS`].
//!
//! # 26-bit Layout
//!
//! ```text
//! bit  0        1..=8            9..=24           25
//!      ┌─┐ ┌───────────┐ ┌──────────────────┐ ┌─┐
//!      │P│ │ facility  │ │       card       │ │P│
//!      └─┘ └───────────┘ └──────────────────┘ └─┘
//!      even      8 bits        16 bits         odd
//! ```
//!
//! Parity bits are carried in the raw value but are not validated.

// ============================================================================
// Capture Configuration
// ============================================================================

/// Default bit buffer capacity.
///
/// Large enough for every common Wiegand format (26, 34 and 37 bit) with
/// headroom for line noise. Bits received beyond the configured capacity are
/// silently dropped.
///
/// # Value: 32 bits
pub const DEFAULT_CAPACITY_BITS: usize = 32;

/// Maximum configurable bit buffer capacity.
///
/// The raw credential value is exposed as a `u64`, so a frame can never
/// carry more than 64 bits.
///
/// # Value: 64 bits
pub const MAX_CAPACITY_BITS: usize = 64;

// ============================================================================
// Timing Configuration
// ============================================================================

/// Default quiet period after which a transmission is considered complete
/// (milliseconds).
///
/// Wiegand readers space bits by roughly 1-2 ms, so a 3 ms gap on both
/// lines reliably marks the end of a frame while keeping read latency low.
/// This is a heuristic boundary, not a protocol terminator: the wire format
/// carries no explicit end-of-frame signal.
///
/// # Value: 3 ms
pub const DEFAULT_FRAME_TIMEOUT_MS: u64 = 3;

/// Default interval between polls of the receiver when no frame is pending
/// (milliseconds).
///
/// # Value: 5 ms
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5;

// ============================================================================
// Standard 26-bit Format
// ============================================================================

/// Total bit count of the standard 26-bit format.
pub const STANDARD_26_BIT_LENGTH: usize = 26;

/// First bit of the facility code in the 26-bit layout (bit 0 is the
/// leading even-parity bit).
pub const STANDARD_26_FACILITY_START: usize = 1;

/// Facility code width in the 26-bit layout.
pub const STANDARD_26_FACILITY_WIDTH: usize = 8;

/// First bit of the card code in the 26-bit layout.
pub const STANDARD_26_CARD_START: usize = 9;

/// Card code width in the 26-bit layout.
pub const STANDARD_26_CARD_WIDTH: usize = 16;
