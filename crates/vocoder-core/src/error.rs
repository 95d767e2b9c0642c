//! Error handling for the vocoder library
//!
//! This module defines the error types that can occur during decoder
//! configuration and frame processing. Reconstruction distortion is not an
//! error: the speech engine reports it through the per-frame error count
//! instead, and decoding always completes.

#![allow(missing_docs)]

use thiserror::Error;

/// Result type alias for vocoder operations
pub type Result<T> = std::result::Result<T, VocoderError>;

/// Error type for vocoder operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocoderError {
    /// Invalid decoder configuration
    #[error("Invalid decoder configuration: {details}")]
    InvalidConfig { details: String },

    /// Codeword length does not match the decoder mode
    #[error("Invalid codeword length: expected {expected} bytes, got {actual}")]
    InvalidCodewordLength { expected: usize, actual: usize },

    /// Output buffer too small for a full frame
    #[error("Buffer too small: need {needed} samples, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
}

impl VocoderError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Codeword and buffer errors are per-call and leave the decoder state
    /// untouched; configuration errors require a new decoder.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfig { .. } => false,
            Self::InvalidCodewordLength { .. } | Self::BufferTooSmall { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = VocoderError::invalid_config("test message");
        assert!(matches!(err, VocoderError::InvalidConfig { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = VocoderError::InvalidCodewordLength {
            expected: 9,
            actual: 11,
        };
        let display = format!("{}", err);
        assert!(display.contains("expected 9"));
        assert!(display.contains("got 11"));
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = VocoderError::BufferTooSmall {
            needed: 160,
            actual: 80,
        };
        assert!(recoverable.is_recoverable());
    }
}
