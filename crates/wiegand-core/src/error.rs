use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Bitstream errors
    #[error("Invalid bit value: {value} (expected 0 or 1)")]
    InvalidBit { value: u8 },

    #[error("Frame bit count {bit_count} is less than delivered bits {delivered}")]
    InconsistentFrame { bit_count: usize, delivered: usize },

    // Decoding errors
    #[error("Unexpected frame length: expected {expected} bits, got {actual}")]
    UnexpectedFrameLength { expected: usize, actual: usize },

    #[error("Truncated frame: {bit_count} bits captured, only {delivered} delivered")]
    TruncatedFrame { bit_count: usize, delivered: usize },

    // Format definition errors
    #[error("Invalid bit range: {0}")]
    InvalidBitRange(String),

    #[error("Field width {width} exceeds 32 bits")]
    FieldTooWide { width: usize },

    // Configuration errors
    #[error("Invalid capacity: {capacity} (must be 1-{max})")]
    InvalidCapacity { capacity: usize, max: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
