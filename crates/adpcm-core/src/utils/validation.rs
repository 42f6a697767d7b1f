//! Input validation utilities for codec operations
//!
//! Every check here runs before the codec writes a byte or touches an
//! adaptation state, so a failed call leaves the caller's buffers intact.

use crate::codecs::adpcm::{decoded_len, encoded_len};
use crate::error::{CodecError, Result};
use crate::types::SampleRate;

/// Lowest sample rate accepted by [`crate::types::CodecConfig`]
pub const MIN_SAMPLE_RATE: u32 = 4000;

/// Highest sample rate accepted by [`crate::types::CodecConfig`]
pub const MAX_SAMPLE_RATE: u32 = 48000;

/// Validate a little-endian PCM byte buffer and return its sample count
pub fn validate_pcm_byte_len(len: usize) -> Result<usize> {
    if len % 2 != 0 {
        return Err(CodecError::InvalidPcmLength { len });
    }

    Ok(len / 2)
}

/// Validate that a destination holds at least `needed` elements
pub fn validate_output_capacity(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(CodecError::BufferTooSmall { needed, actual });
    }

    Ok(())
}

/// Validate that `available` packed bytes hold `nsamples` codes
pub fn validate_packed_len(nsamples: usize, available: usize) -> Result<()> {
    let needed = encoded_len(nsamples);
    if available < needed {
        return Err(CodecError::InsufficientData {
            needed,
            actual: available,
        });
    }

    Ok(())
}

/// Validate the output of the byte-surface decoder: 2 bytes per sample
pub fn validate_pcm_output_capacity(adpcm_len: usize, actual: usize) -> Result<usize> {
    let needed = decoded_len(adpcm_len) * 2;
    validate_output_capacity(needed, actual)?;
    Ok(needed)
}

/// Validate sample rate range
pub fn validate_sample_rate(sample_rate: SampleRate) -> Result<()> {
    let rate = sample_rate.hz();
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&rate) {
        return Err(CodecError::InvalidSampleRate {
            rate,
            min: MIN_SAMPLE_RATE,
            max: MAX_SAMPLE_RATE,
        });
    }

    Ok(())
}

/// Validate channel count (the codec is a single mono stream)
pub fn validate_channels(channels: u8) -> Result<()> {
    if channels != 1 {
        return Err(CodecError::InvalidChannelCount {
            channels,
            supported: vec![1],
        });
    }

    Ok(())
}

/// Validate a fixed frame size: non-zero and a whole number of packed bytes
pub fn validate_frame_size(frame_size: usize) -> Result<()> {
    if frame_size == 0 || frame_size % 2 != 0 {
        return Err(CodecError::invalid_config(format!(
            "frame size must be a non-zero even sample count, got {}",
            frame_size
        )));
    }

    Ok(())
}

/// Validate volume maximiser headroom, a fraction of full scale in [0, 1)
pub fn validate_headroom(headroom: f32) -> Result<()> {
    if !(0.0..1.0).contains(&headroom) {
        return Err(CodecError::invalid_config(format!(
            "headroom must be in [0, 1), got {}",
            headroom
        )));
    }

    Ok(())
}
