//! Error types for edge-source hardware operations.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur while driving a Wiegand edge source.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Edge source is not attached or has been torn down.
    #[error("Edge source disconnected: {device}")]
    Disconnected { device: String },

    /// Edge source initialization failed.
    #[error("Initialization failed: {message}")]
    InitializationFailed { message: String },

    /// Operation is not supported by this edge source.
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// GPIO subsystem error.
    #[cfg(feature = "hardware-rppal")]
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new initialization failed error.
    pub fn initialization_failed(message: impl Into<String>) -> Self {
        Self::InitializationFailed {
            message: message.into(),
        }
    }

    /// Create a new unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }
}
