use crate::{Result, error::Error};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single Wiegand bit.
///
/// A pulse on the DATA0 line carries a [`Bit::Zero`], a pulse on the DATA1
/// line carries a [`Bit::One`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bit {
    Zero = 0,
    One = 1,
}

impl Bit {
    /// Create a bit from a u8 value.
    ///
    /// # Errors
    /// Returns `Error::InvalidBit` if the value is not 0 or 1.
    #[inline]
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            _ => Err(Error::InvalidBit { value }),
        }
    }

    /// Convert the bit to a u8 value.
    #[inline]
    #[must_use]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` if the bit is [`Bit::One`].
    #[inline]
    #[must_use]
    pub fn is_set(self) -> bool {
        matches!(self, Bit::One)
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_u8())
    }
}

/// One complete credential transmission.
///
/// A frame is an immutable snapshot taken when the receiver drains its bit
/// buffer: the bits that were delivered to the caller plus the *true* number
/// of bits captured on the wire. The two can differ when the caller asked
/// for fewer bits than were captured; `bit_count` stays authoritative so
/// that truncation is detectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFrame {
    bits: Vec<Bit>,
    bit_count: usize,
    captured_at: DateTime<Utc>,
}

impl CredentialFrame {
    /// Create a frame from delivered bits and the true captured bit count.
    ///
    /// # Errors
    /// Returns `Error::InconsistentFrame` if `bit_count` is smaller than the
    /// number of delivered bits.
    pub fn new(bits: Vec<Bit>, bit_count: usize) -> Result<Self> {
        if bit_count < bits.len() {
            return Err(Error::InconsistentFrame {
                bit_count,
                delivered: bits.len(),
            });
        }
        Ok(Self {
            bits,
            bit_count,
            captured_at: Utc::now(),
        })
    }

    /// The bits delivered to the caller, in arrival (MSB-first) order.
    #[must_use]
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// The true number of bits captured on the wire.
    ///
    /// This may exceed `bits().len()` when the read was size-limited.
    #[must_use]
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Returns `true` if fewer bits were delivered than were captured.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.bits.len() < self.bit_count
    }

    /// When the frame was drained from the receiver.
    #[must_use]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Render the delivered bits as a string of `0`/`1` characters.
    #[must_use]
    pub fn to_bit_string(&self) -> String {
        self.bits.iter().map(|b| char::from(b.to_u8() + b'0')).collect()
    }
}

impl fmt::Display for CredentialFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} bits)", self.to_bit_string(), self.bit_count)
    }
}

/// Credential fields decoded from a frame.
///
/// Derived values, recomputed per frame and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFields {
    /// Every delivered bit folded into an unsigned integer, MSB-first.
    pub raw: u64,

    /// Facility (site) code.
    pub facility: u32,

    /// Card (individual credential) code.
    pub card: u32,
}

impl fmt::Display for DecodedFields {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "raw={:#X} facility={} card={}",
            self.raw, self.facility, self.card
        )
    }
}
