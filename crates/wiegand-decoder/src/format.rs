//! Credential bit layouts and field extraction.
//!
//! A [`WiegandFormat`] maps positions in a captured frame onto the facility
//! and card fields. The layout is configuration, not code: alternate
//! formats (34-bit, 37-bit site codes and so on) are expressed as different
//! bit ranges over the same extraction loop.
//!
//! Two decode paths exist. [`WiegandFormat::decode`] insists that the frame
//! carries exactly the format's bit length and fails otherwise, so callers
//! never mistake line noise for a credential. [`WiegandFormat::decode_lossy`]
//! reproduces the historical reader behavior: any frame is decoded under
//! the fixed layout, with out-of-range positions contributing only to the
//! raw value. Parity bits are carried in `raw` but never validated.

use wiegand_core::constants::{
    STANDARD_26_BIT_LENGTH, STANDARD_26_CARD_START, STANDARD_26_CARD_WIDTH,
    STANDARD_26_FACILITY_START, STANDARD_26_FACILITY_WIDTH,
};
use wiegand_core::{Bit, CredentialFrame, DecodedFields, Error, Result};

/// A contiguous range of bit positions within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    start: usize,
    width: usize,
}

impl BitRange {
    /// Create a bit range covering `width` bits starting at `start`.
    ///
    /// # Errors
    /// Returns `Error::InvalidBitRange` if the width is 0, or
    /// `Error::FieldTooWide` if the width exceeds the 32 bits a decoded
    /// field can hold.
    pub fn new(start: usize, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidBitRange(format!(
                "field at bit {start} has zero width"
            )));
        }
        if width > 32 {
            return Err(Error::FieldTooWide { width });
        }
        Ok(Self { start, width })
    }

    /// First bit position of the range.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of bits in the range.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// One past the last bit position of the range.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.width
    }

    #[inline]
    fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end()
    }
}

/// A credential bit layout: total length plus field positions.
///
/// # Examples
///
/// ```
/// use wiegand_core::{Bit, CredentialFrame};
/// use wiegand_decoder::WiegandFormat;
///
/// # fn main() -> wiegand_core::Result<()> {
/// // 26-bit frame: parity 0, facility 1, card 2, trailing parity 1.
/// let mut bits = vec![Bit::Zero];
/// bits.extend((0..8).map(|i| Bit::from(i == 7)));
/// bits.extend((0..16).map(|i| Bit::from(i == 14)));
/// bits.push(Bit::One);
/// let frame = CredentialFrame::new(bits, 26)?;
///
/// let fields = WiegandFormat::standard_26().decode(&frame)?;
/// assert_eq!(fields.facility, 1);
/// assert_eq!(fields.card, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiegandFormat {
    bit_length: usize,
    facility: BitRange,
    card: BitRange,
}

impl WiegandFormat {
    /// The standard 26-bit layout: leading parity, 8-bit facility code,
    /// 16-bit card code, trailing parity.
    #[must_use]
    pub fn standard_26() -> Self {
        Self {
            bit_length: STANDARD_26_BIT_LENGTH,
            facility: BitRange {
                start: STANDARD_26_FACILITY_START,
                width: STANDARD_26_FACILITY_WIDTH,
            },
            card: BitRange {
                start: STANDARD_26_CARD_START,
                width: STANDARD_26_CARD_WIDTH,
            },
        }
    }

    /// The HID 34-bit layout: leading parity, 16-bit facility code,
    /// 16-bit card code, trailing parity.
    #[must_use]
    pub fn hid_34() -> Self {
        Self {
            bit_length: 34,
            facility: BitRange { start: 1, width: 16 },
            card: BitRange { start: 17, width: 16 },
        }
    }

    /// Define a custom layout.
    ///
    /// # Errors
    /// Returns `Error::InvalidBitRange` if either field extends past
    /// `bit_length`.
    pub fn new(bit_length: usize, facility: BitRange, card: BitRange) -> Result<Self> {
        for (name, range) in [("facility", facility), ("card", card)] {
            if range.end() > bit_length {
                return Err(Error::InvalidBitRange(format!(
                    "{name} field ends at bit {} but the frame is {bit_length} bits",
                    range.end()
                )));
            }
        }
        Ok(Self {
            bit_length,
            facility,
            card,
        })
    }

    /// Total bit count a frame must carry to decode under this layout.
    #[must_use]
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Decode a frame, requiring it to match the layout's bit length.
    ///
    /// # Errors
    /// Returns `Error::TruncatedFrame` if the frame carries fewer bits than
    /// were captured on the wire, or `Error::UnexpectedFrameLength` if the
    /// captured length differs from the layout's bit length.
    pub fn decode(&self, frame: &CredentialFrame) -> Result<DecodedFields> {
        if frame.is_truncated() {
            return Err(Error::TruncatedFrame {
                bit_count: frame.bit_count(),
                delivered: frame.bits().len(),
            });
        }
        if frame.bit_count() != self.bit_length {
            return Err(Error::UnexpectedFrameLength {
                expected: self.bit_length,
                actual: frame.bit_count(),
            });
        }
        Ok(self.extract(frame.bits()))
    }

    /// Decode a frame of any length under this layout.
    ///
    /// The raw value accumulates every delivered bit; field positions that
    /// fall outside the delivered bits simply contribute nothing, which can
    /// produce meaningless facility/card values for frames of the wrong
    /// length. Prefer [`decode`](Self::decode) unless reproducing that
    /// historical behavior is the point.
    #[must_use]
    pub fn decode_lossy(&self, frame: &CredentialFrame) -> DecodedFields {
        self.extract(frame.bits())
    }

    fn extract(&self, bits: &[Bit]) -> DecodedFields {
        let mut raw = 0u64;
        let mut facility = 0u32;
        let mut card = 0u32;

        for (position, bit) in bits.iter().enumerate() {
            let value = bit.to_u8();
            raw = (raw << 1) | u64::from(value);
            if self.facility.contains(position) {
                facility = (facility << 1) | u32::from(value);
            }
            if self.card.contains(position) {
                card = (card << 1) | u32::from(value);
            }
        }

        DecodedFields {
            raw,
            facility,
            card,
        }
    }
}

impl Default for WiegandFormat {
    fn default() -> Self {
        Self::standard_26()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wiegand_core::CredentialFrame;

    fn frame_from(pattern: &str) -> CredentialFrame {
        let bits: Vec<Bit> = pattern.chars().map(|c| Bit::from(c == '1')).collect();
        let count = bits.len();
        CredentialFrame::new(bits, count).unwrap()
    }

    #[test]
    fn test_bit_range_validation() {
        assert!(BitRange::new(1, 8).is_ok());
        assert!(BitRange::new(0, 0).is_err());
        assert!(BitRange::new(0, 33).is_err());
    }

    #[test]
    fn test_format_rejects_out_of_bounds_fields() {
        let facility = BitRange::new(1, 8).unwrap();
        let card = BitRange::new(9, 16).unwrap();
        assert!(WiegandFormat::new(26, facility, card).is_ok());
        assert!(WiegandFormat::new(20, facility, card).is_err());
    }

    #[test]
    fn test_standard_26_round_trip() {
        // Leading parity 0, facility 0b0000_0001, card 0x0002, trailing parity 1.
        let pattern = "00000000100000000000000101";
        let frame = frame_from(pattern);

        let fields = WiegandFormat::standard_26().decode(&frame).unwrap();
        assert_eq!(fields.facility, 1);
        assert_eq!(fields.card, 2);
        assert_eq!(fields.raw, u64::from_str_radix(pattern, 2).unwrap());
    }

    #[rstest]
    #[case("000000001000000000000001010", 27)] // one bit too long
    #[case("0000000010000000000000010", 25)] // one bit too short
    fn test_decode_rejects_wrong_length(#[case] pattern: &str, #[case] length: usize) {
        let frame = frame_from(pattern);
        assert_eq!(frame.bit_count(), length);

        let result = WiegandFormat::standard_26().decode(&frame);
        assert!(matches!(
            result,
            Err(Error::UnexpectedFrameLength { expected: 26, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_frame() {
        let bits: Vec<Bit> = (0..20).map(|_| Bit::One).collect();
        let frame = CredentialFrame::new(bits, 26).unwrap();

        let result = WiegandFormat::standard_26().decode(&frame);
        assert!(matches!(result, Err(Error::TruncatedFrame { .. })));
    }

    #[test]
    fn test_decode_lossy_accepts_any_length() {
        // 30-bit frame decoded under the 26-bit layout: positions 26..30
        // land in raw only.
        let pattern = "000000001000000000000001011111";
        let frame = frame_from(pattern);

        let fields = WiegandFormat::standard_26().decode_lossy(&frame);
        assert_eq!(fields.facility, 1);
        assert_eq!(fields.card, 2);
        assert_eq!(fields.raw, u64::from_str_radix(pattern, 2).unwrap());
    }

    #[test]
    fn test_decode_lossy_short_frame() {
        // A 4-bit burst of noise: card range is never reached.
        let fields = WiegandFormat::standard_26().decode_lossy(&frame_from("1011"));
        assert_eq!(fields.raw, 0b1011);
        assert_eq!(fields.facility, 0b011);
        assert_eq!(fields.card, 0);
    }

    #[test]
    fn test_hid_34_layout() {
        // Parity 0, facility 0x0003 (16 bits), card 0x0005 (16 bits), parity 1.
        let mut bits = vec![Bit::Zero];
        bits.extend((0..16).map(|i| Bit::from(i >= 14)));
        bits.extend((0..16).map(|i| Bit::from(i == 13 || i == 15)));
        bits.push(Bit::One);
        let frame = CredentialFrame::new(bits, 34).unwrap();

        let fields = WiegandFormat::hid_34().decode(&frame).unwrap();
        assert_eq!(fields.facility, 0x0003);
        assert_eq!(fields.card, 0x0005);
    }
}
