//! IMA ADPCM Codec Implementation
//!
//! This module provides the stateful codec object. It keeps one adaptation
//! state per direction and, depending on [`StateMode`], either carries it
//! across calls or restarts every call from the configured initial state.

use tracing::{debug, trace};

use crate::codecs::adpcm::engine::{self, decoded_len, encoded_len};
use crate::codecs::adpcm::state::AdpcmState;
use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, AudioCodecExt, CodecConfig, CodecInfo, StateMode};

/// Codec name reported by [`AudioCodec::info`]
pub const CODEC_NAME: &str = "IMA-ADPCM";

/// Encoded bits per sample
pub const BITS_PER_SAMPLE: u32 = 4;

/// Streaming IMA ADPCM codec
///
/// # Example
/// ```
/// use adpcm_core::{AdpcmCodec, AudioCodec, CodecConfig};
///
/// let mut codec = AdpcmCodec::new(CodecConfig::new().with_frame_size(160)).unwrap();
///
/// // Encode a frame of 160 samples
/// let input_frame = vec![0i16; 160];
/// let encoded = codec.encode(&input_frame).unwrap();
/// assert_eq!(encoded.len(), 80);
///
/// // Decode back to samples
/// let decoded = codec.decode(&encoded).unwrap();
/// assert_eq!(decoded, input_frame);
/// ```
#[derive(Debug, Clone)]
pub struct AdpcmCodec {
    /// Sample rate in Hz
    sample_rate: u32,
    /// Fixed frame size in samples
    frame_size: Option<usize>,
    /// State handling between calls
    state_mode: StateMode,
    /// State both directions start from and reset to
    initial_state: AdpcmState,
    /// Encoder state after the last successful encode
    encoder_state: AdpcmState,
    /// Decoder state after the last successful decode
    decoder_state: AdpcmState,
}

impl AdpcmCodec {
    /// Create a new codec from configuration
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;

        debug!(
            "Creating IMA ADPCM codec: {}, {:?} state, frame size {:?}",
            config.sample_rate, config.state_mode, config.frame_size
        );

        Ok(Self {
            sample_rate: config.sample_rate.hz(),
            frame_size: config.frame_size,
            state_mode: config.state_mode,
            initial_state: config.initial_state,
            encoder_state: config.initial_state,
            decoder_state: config.initial_state,
        })
    }

    /// Encoder state after the last successful encode
    pub fn encoder_state(&self) -> AdpcmState {
        self.encoder_state
    }

    /// Decoder state after the last successful decode
    pub fn decoder_state(&self) -> AdpcmState {
        self.decoder_state
    }

    /// State handling between calls
    pub fn state_mode(&self) -> StateMode {
        self.state_mode
    }

    /// Get the compression ratio (16-bit samples to 4-bit codes)
    pub fn compression_ratio(&self) -> f32 {
        0.25
    }

    fn starting_state(&self, carried: AdpcmState) -> AdpcmState {
        match self.state_mode {
            StateMode::PerCall => self.initial_state,
            StateMode::Continuous => carried,
        }
    }

    fn check_encode_input(&self, samples: &[i16]) -> Result<()> {
        if let Some(frame_size) = self.frame_size {
            if samples.len() != frame_size {
                return Err(CodecError::InvalidFrameSize {
                    expected: frame_size,
                    actual: samples.len(),
                });
            }
        } else if self.state_mode == StateMode::Continuous && samples.len() % 2 != 0 {
            // The zero pad nibble would be decoded as a real sample downstream
            return Err(CodecError::InvalidFrameSize {
                expected: samples.len() + 1,
                actual: samples.len(),
            });
        }

        Ok(())
    }

    fn check_decode_input(&self, data: &[u8]) -> Result<()> {
        if let Some(frame_size) = self.frame_size {
            let expected = encoded_len(frame_size);
            if data.len() != expected {
                return Err(CodecError::InvalidFrameSize {
                    expected,
                    actual: data.len(),
                });
            }
        }

        Ok(())
    }
}

impl Default for AdpcmCodec {
    fn default() -> Self {
        let state = AdpcmState::new();
        Self {
            sample_rate: crate::types::SampleRate::default().hz(),
            frame_size: None,
            state_mode: StateMode::default(),
            initial_state: state,
            encoder_state: state,
            decoder_state: state,
        }
    }
}

impl AudioCodec for AdpcmCodec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        self.check_encode_input(samples)?;

        let mut state = self.starting_state(self.encoder_state);
        let output = engine::encode(samples, &mut state);
        self.encoder_state = state;

        Ok(output)
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        self.check_decode_input(data)?;

        let mut state = self.starting_state(self.decoder_state);
        let output = engine::decode(data, decoded_len(data.len()), &mut state)?;
        self.decoder_state = state;

        Ok(output)
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: CODEC_NAME,
            sample_rate: self.sample_rate,
            channels: 1,
            bitrate: self.sample_rate * BITS_PER_SAMPLE,
            frame_size: self.frame_size.unwrap_or(0),
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.encoder_state = self.initial_state;
        self.decoder_state = self.initial_state;

        debug!("IMA ADPCM codec reset to {}", self.initial_state);
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.frame_size.unwrap_or(0)
    }

    fn supports_variable_frame_size(&self) -> bool {
        self.frame_size.is_none()
    }
}

impl AudioCodecExt for AdpcmCodec {
    fn encode_to_buffer(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize> {
        self.check_encode_input(samples)?;

        let mut state = self.starting_state(self.encoder_state);
        let written = engine::encode_into(samples, output, &mut state)?;
        self.encoder_state = state;

        trace!("IMA ADPCM encoded {} samples into {} bytes", samples.len(), written);
        Ok(written)
    }

    fn decode_to_buffer(&mut self, data: &[u8], output: &mut [i16]) -> Result<usize> {
        self.check_decode_input(data)?;

        let mut state = self.starting_state(self.decoder_state);
        let written = engine::decode_into(data, decoded_len(data.len()), output, &mut state)?;
        self.decoder_state = state;

        trace!("IMA ADPCM decoded {} bytes into {} samples", data.len(), written);
        Ok(written)
    }

    fn max_encoded_size(&self, input_samples: usize) -> usize {
        encoded_len(input_samples)
    }

    fn max_decoded_size(&self, input_bytes: usize) -> usize {
        decoded_len(input_bytes)
    }
}
