//! Core types and traits for the codec library
//!
//! This module defines the codec traits, the sample rate type and the
//! configuration used to build a streaming [`crate::AdpcmCodec`].

use crate::codecs::adpcm::AdpcmState;
use crate::error::Result;
use crate::utils::{validate_channels, validate_frame_size, validate_sample_rate};
use std::fmt;

/// Primary trait for audio codecs
///
/// This trait defines the core operations of a stateful codec object:
/// encoding, decoding, and state management.
pub trait AudioCodec: Send + Sync {
    /// Encode audio samples to compressed data
    ///
    /// # Arguments
    ///
    /// * `samples` - Input audio samples as 16-bit PCM
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not match the codec's framing
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Decode compressed data to audio samples
    ///
    /// # Arguments
    ///
    /// * `data` - Compressed audio data
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not match the codec's framing
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    ///
    /// This clears all internal state and prepares the codec for fresh input.
    /// Useful for handling stream discontinuities.
    fn reset(&mut self) -> Result<()>;

    /// Get the expected frame size in samples (0 when variable)
    fn frame_size(&self) -> usize;

    /// Check if the codec supports variable frame sizes
    fn supports_variable_frame_size(&self) -> bool {
        false
    }
}

/// Extended trait for codecs that can work on caller-owned buffers
pub trait AudioCodecExt: AudioCodec {
    /// Encode with pre-allocated output buffer (zero-copy)
    ///
    /// Returns the number of bytes written to the output buffer.
    fn encode_to_buffer(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize>;

    /// Decode with pre-allocated output buffer (zero-copy)
    ///
    /// Returns the number of samples written to the output buffer.
    fn decode_to_buffer(&mut self, data: &[u8], output: &mut [i16]) -> Result<usize>;

    /// Get maximum encoded size for a given input size
    fn max_encoded_size(&self, input_samples: usize) -> usize;

    /// Get maximum decoded size for a given input size
    fn max_decoded_size(&self, input_bytes: usize) -> usize;
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name
    pub name: &'static str,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Frame size in samples (0 when variable)
    pub frame_size: usize,
}

/// Sample rate enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRate {
    /// 8 kHz (narrowband)
    Rate8000,
    /// 11.025 kHz
    Rate11025,
    /// 16 kHz (wideband)
    Rate16000,
    /// 22.05 kHz
    Rate22050,
    /// 32 kHz
    Rate32000,
    /// 44.1 kHz (CD quality)
    Rate44100,
    /// 48 kHz (professional)
    Rate48000,
    /// Custom sample rate
    Custom(u32),
}

impl SampleRate {
    /// Get the sample rate value in Hz
    pub fn hz(self) -> u32 {
        match self {
            Self::Rate8000 => 8000,
            Self::Rate11025 => 11025,
            Self::Rate16000 => 16000,
            Self::Rate22050 => 22050,
            Self::Rate32000 => 32000,
            Self::Rate44100 => 44100,
            Self::Rate48000 => 48000,
            Self::Custom(rate) => rate,
        }
    }

    /// Create from Hz value
    pub fn from_hz(hz: u32) -> Self {
        match hz {
            8000 => Self::Rate8000,
            11025 => Self::Rate11025,
            16000 => Self::Rate16000,
            22050 => Self::Rate22050,
            32000 => Self::Rate32000,
            44100 => Self::Rate44100,
            48000 => Self::Rate48000,
            rate => Self::Custom(rate),
        }
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::Rate22050
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.hz())
    }
}

/// How a streaming codec treats its adaptation state between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateMode {
    /// Every call starts again from the configured initial state
    PerCall,
    /// State carries over from one call to the next (chunked live streams)
    #[default]
    Continuous,
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CodecConfig {
    /// Sample rate
    pub sample_rate: SampleRate,
    /// Number of channels
    pub channels: u8,
    /// Fixed frame size in samples, `None` for variable frames
    pub frame_size: Option<usize>,
    /// State handling between calls
    pub state_mode: StateMode,
    /// State the encoder and decoder start from (and reset to)
    pub initial_state: AdpcmState,
}

impl CodecConfig {
    /// Create a new codec configuration with default values
    pub fn new() -> Self {
        Self {
            sample_rate: SampleRate::default(),
            channels: 1,
            frame_size: None,
            state_mode: StateMode::default(),
            initial_state: AdpcmState::new(),
        }
    }

    /// Set sample rate
    pub fn with_sample_rate(mut self, sample_rate: SampleRate) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set channel count
    pub fn with_channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    /// Set a fixed frame size in samples
    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = Some(frame_size);
        self
    }

    /// Set state handling between calls
    pub fn with_state_mode(mut self, state_mode: StateMode) -> Self {
        self.state_mode = state_mode;
        self
    }

    /// Set the initial adaptation state
    pub fn with_initial_state(mut self, initial_state: AdpcmState) -> Self {
        self.initial_state = initial_state;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_sample_rate(self.sample_rate)?;
        validate_channels(self.channels)?;

        if let Some(frame_size) = self.frame_size {
            validate_frame_size(frame_size)?;
        }

        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_sample_rate_conversion() {
        assert_eq!(SampleRate::Rate8000.hz(), 8000);
        assert_eq!(SampleRate::from_hz(8000), SampleRate::Rate8000);
        assert_eq!(SampleRate::from_hz(22050), SampleRate::Rate22050);
        assert_eq!(SampleRate::from_hz(12345), SampleRate::Custom(12345));
        assert_eq!(SampleRate::Rate44100.to_string(), "44100Hz");
    }

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.sample_rate, SampleRate::Rate22050);
        assert_eq!(config.channels, 1);
        assert_eq!(config.frame_size, None);
        assert_eq!(config.state_mode, StateMode::Continuous);
        assert_eq!(config.initial_state, AdpcmState::new());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_codec_config_validation() {
        let config = CodecConfig::new()
            .with_sample_rate(SampleRate::Rate16000)
            .with_frame_size(320);
        assert!(config.validate().is_ok());

        let stereo = CodecConfig::new().with_channels(2);
        assert!(matches!(
            stereo.validate(),
            Err(CodecError::InvalidChannelCount { .. })
        ));

        let odd_frame = CodecConfig::new().with_frame_size(161);
        assert!(matches!(
            odd_frame.validate(),
            Err(CodecError::InvalidConfig { .. })
        ));

        let too_fast = CodecConfig::new().with_sample_rate(SampleRate::Custom(96000));
        assert!(matches!(
            too_fast.validate(),
            Err(CodecError::InvalidSampleRate { .. })
        ));
    }
}
