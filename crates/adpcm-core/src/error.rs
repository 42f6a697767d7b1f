//! Error handling for the ADPCM codec library
//!
//! Every error in this module is raised before the codec touches an output
//! buffer or an adaptation state. The per-sample loop itself is total.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Invalid codec configuration
    #[error("Invalid codec configuration: {details}")]
    InvalidConfig { details: String },

    /// PCM byte buffer is not a whole number of 16-bit samples
    #[error("Invalid PCM length: {len} bytes is not a whole number of 16-bit samples")]
    InvalidPcmLength { len: usize },

    /// Invalid frame size
    #[error("Invalid frame size: expected {expected}, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}Hz (supported: {min}-{max}Hz)")]
    InvalidSampleRate { rate: u32, min: u32, max: u32 },

    /// Invalid channel count
    #[error("Invalid channel count: {channels} (supported: {supported:?})")]
    InvalidChannelCount { channels: u8, supported: Vec<u8> },

    /// Adaptation state outside its legal range
    #[error("Invalid adaptation state: {details}")]
    InvalidState { details: String },

    /// Output buffer too small for the operation
    #[error("Buffer too small: need {needed}, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Packed input holds fewer codes than requested
    #[error("Insufficient ADPCM data: need {needed} bytes, got {actual}")]
    InsufficientData { needed: usize, actual: usize },

    /// I/O operation failed
    #[error("I/O operation failed: {reason}")]
    IoError { reason: String },
}

impl CodecError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new invalid state error
    pub fn invalid_state(details: impl Into<String>) -> Self {
        Self::InvalidState {
            details: details.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Sizing errors are recoverable: the caller can retry the same call with
    /// a resized buffer or a complete input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfig { .. }
            | Self::InvalidSampleRate { .. }
            | Self::InvalidChannelCount { .. }
            | Self::InvalidState { .. } => false,

            Self::InvalidPcmLength { .. }
            | Self::InvalidFrameSize { .. }
            | Self::BufferTooSmall { .. }
            | Self::InsufficientData { .. }
            | Self::IoError { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. }
            | Self::InvalidSampleRate { .. }
            | Self::InvalidChannelCount { .. }
            | Self::InvalidState { .. } => ErrorCategory::Configuration,

            Self::InvalidPcmLength { .. }
            | Self::InvalidFrameSize { .. }
            | Self::InsufficientData { .. } => ErrorCategory::Framing,

            Self::BufferTooSmall { .. } => ErrorCategory::Memory,

            Self::IoError { .. } => ErrorCategory::Io,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and parameter errors
    Configuration,
    /// Input framing errors (sample parity, frame length, truncated data)
    Framing,
    /// Output buffer sizing errors
    Memory,
    /// I/O related errors
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Framing => write!(f, "Framing"),
            Self::Memory => write!(f, "Memory"),
            Self::Io => write!(f, "I/O"),
        }
    }
}

/// Convert from I/O errors
impl From<std::io::Error> for CodecError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            reason: error.to_string(),
        }
    }
}
