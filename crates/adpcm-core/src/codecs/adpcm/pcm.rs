//! Little-endian PCM byte surface
//!
//! The four operations exposed to callers that hold raw byte buffers (driver
//! DMA buffers, file contents, network payloads): `encode`, `decode`,
//! `encode_into` and `decode_into`. Each call is a fresh stream that starts
//! from [`AdpcmState::new`]. Callers that need state continuity between
//! chunks use the typed functions in [`super::engine`] instead.
//!
//! PCM bytes are signed 16-bit little-endian samples. ADPCM bytes hold two
//! 4-bit codes, first code in the high nibble.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::codecs::adpcm::engine::{self, decoded_len, encoded_len};
use crate::codecs::adpcm::state::AdpcmState;
use crate::codecs::adpcm::tables::CODE_MASK;
use crate::error::Result;
use crate::utils::{validate_output_capacity, validate_pcm_byte_len, validate_pcm_output_capacity};

/// Encode little-endian PCM bytes to packed ADPCM
///
/// # Errors
///
/// Returns [`crate::CodecError::InvalidPcmLength`] if `pcm` has an odd length.
pub fn encode(pcm: &[u8]) -> Result<Bytes> {
    let nsamples = validate_pcm_byte_len(pcm.len())?;

    let mut output = BytesMut::zeroed(encoded_len(nsamples));
    pack_le(pcm, &mut output, &mut AdpcmState::new());

    trace!("PCM encoded {} bytes to {} ADPCM bytes", pcm.len(), output.len());

    Ok(output.freeze())
}

/// Decode packed ADPCM to little-endian PCM bytes
///
/// Every input byte yields two samples, so the result is `4 × adpcm.len()`
/// bytes long.
pub fn decode(adpcm: &[u8]) -> Bytes {
    let mut output = BytesMut::with_capacity(decoded_len(adpcm.len()) * 2);
    let mut state = AdpcmState::new();

    for &byte in adpcm {
        output.put_i16_le(engine::decode_code(byte >> 4, &mut state));
        output.put_i16_le(engine::decode_code(byte & CODE_MASK, &mut state));
    }

    trace!("PCM decoded {} ADPCM bytes to {} bytes", adpcm.len(), output.len());

    output.freeze()
}

/// Encode little-endian PCM bytes into a caller-supplied buffer
///
/// Returns the number of bytes written, `ceil(N/2)` for `N` samples.
///
/// # Errors
///
/// Returns [`crate::CodecError::InvalidPcmLength`] for an odd `pcm` length
/// and [`crate::CodecError::BufferTooSmall`] if `output` is shorter than
/// required. Nothing is written on error.
pub fn encode_into(pcm: &[u8], output: &mut [u8]) -> Result<usize> {
    let nsamples = validate_pcm_byte_len(pcm.len())?;
    let needed = encoded_len(nsamples);
    validate_output_capacity(needed, output.len())?;

    pack_le(pcm, &mut output[..needed], &mut AdpcmState::new());

    Ok(needed)
}

/// Decode packed ADPCM into a caller-supplied PCM byte buffer
///
/// Returns the number of bytes written, `4 × adpcm.len()`.
///
/// # Errors
///
/// Returns [`crate::CodecError::BufferTooSmall`] if `output` is shorter than
/// required. Nothing is written on error.
pub fn decode_into(adpcm: &[u8], output: &mut [u8]) -> Result<usize> {
    let needed = validate_pcm_output_capacity(adpcm.len(), output.len())?;

    let mut state = AdpcmState::new();
    let mut dst = &mut output[..needed];
    for &byte in adpcm {
        dst.put_i16_le(engine::decode_code(byte >> 4, &mut state));
        dst.put_i16_le(engine::decode_code(byte & CODE_MASK, &mut state));
    }

    Ok(needed)
}

/// Convert little-endian PCM bytes to samples
///
/// # Errors
///
/// Returns [`crate::CodecError::InvalidPcmLength`] if `pcm` has an odd length.
pub fn samples_from_le_bytes(pcm: &[u8]) -> Result<Vec<i16>> {
    let nsamples = validate_pcm_byte_len(pcm.len())?;

    let mut src = pcm;
    let mut samples = Vec::with_capacity(nsamples);
    while src.has_remaining() {
        samples.push(src.get_i16_le());
    }

    Ok(samples)
}

/// Convert samples to little-endian PCM bytes
pub fn samples_to_le_bytes(samples: &[i16]) -> Bytes {
    let mut output = BytesMut::with_capacity(samples.len() * 2);
    for &sample in samples {
        output.put_i16_le(sample);
    }
    output.freeze()
}

/// Caller guarantees `output.len() == encoded_len(pcm.len() / 2)`.
fn pack_le(pcm: &[u8], output: &mut [u8], state: &mut AdpcmState) {
    for (byte, pair) in output.iter_mut().zip(pcm.chunks(4)) {
        let mut src = pair;
        let high = engine::encode_sample(src.get_i16_le(), state);
        let low = if src.has_remaining() {
            engine::encode_sample(src.get_i16_le(), state)
        } else {
            0
        };
        *byte = (high << 4) | low;
    }
}
