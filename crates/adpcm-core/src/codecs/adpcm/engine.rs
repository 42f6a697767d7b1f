//! IMA ADPCM Engine
//!
//! Per-sample quantization and reconstruction, plus the block transforms
//! that pack two 4-bit codes per byte (first code in the high nibble).
//!
//! The encoder derives its next prediction from the code it just emitted,
//! using exactly the arithmetic of the decoder. Encoder and decoder started
//! from the same [`AdpcmState`] therefore stay in lock-step sample by sample.

use tracing::trace;

use crate::codecs::adpcm::state::AdpcmState;
use crate::codecs::adpcm::tables::{CODE_MASK, INDEX_TABLE, SIGN_BIT};
use crate::error::Result;
use crate::utils::{validate_output_capacity, validate_packed_len};

/// Number of packed bytes needed for `nsamples` codes
pub const fn encoded_len(nsamples: usize) -> usize {
    nsamples.div_ceil(2)
}

/// Number of codes held by `nbytes` packed bytes
pub const fn decoded_len(nbytes: usize) -> usize {
    nbytes * 2
}

/// Quantize one sample against the current prediction
///
/// Returns the 4-bit code (bit 3 is the sign) and advances `state` exactly as
/// [`decode_code`] would for the same code.
pub fn encode_sample(sample: i16, state: &mut AdpcmState) -> u8 {
    let mut diff = sample as i32 - state.predicted() as i32;
    let sign = if diff < 0 { SIGN_BIT } else { 0 };
    diff = diff.abs();

    // Three magnitude bits, most significant first
    let mut code = 0u8;
    let mut step = state.step();
    if diff >= step {
        code |= 4;
        diff -= step;
    }
    step >>= 1;
    if diff >= step {
        code |= 2;
        diff -= step;
    }
    step >>= 1;
    if diff >= step {
        code |= 1;
    }

    let code = code | sign;
    reconstruct(code, state);
    code
}

/// Reconstruct one sample from a 4-bit code
///
/// Only the low nibble of `code` is used.
pub fn decode_code(code: u8, state: &mut AdpcmState) -> i16 {
    reconstruct(code & CODE_MASK, state)
}

fn reconstruct(code: u8, state: &mut AdpcmState) -> i16 {
    let step = state.step();

    let mut vpdiff = step >> 3;
    if code & 4 != 0 {
        vpdiff += step;
    }
    if code & 2 != 0 {
        vpdiff += step >> 1;
    }
    if code & 1 != 0 {
        vpdiff += step >> 2;
    }

    let predicted = if code & SIGN_BIT != 0 {
        state.predicted() as i32 - vpdiff
    } else {
        state.predicted() as i32 + vpdiff
    };

    state.advance(predicted, INDEX_TABLE[code as usize]);
    state.predicted()
}

/// Encode samples into a freshly allocated packed buffer
///
/// The result holds exactly `ceil(N/2)` bytes. For an odd sample count the
/// low nibble of the last byte is zero.
pub fn encode(samples: &[i16], state: &mut AdpcmState) -> Vec<u8> {
    let mut output = vec![0u8; encoded_len(samples.len())];
    pack(samples, &mut output, state);

    trace!(
        "ADPCM encoded {} samples to {} bytes ({})",
        samples.len(),
        output.len(),
        state
    );

    output
}

/// Encode samples into a caller-supplied buffer
///
/// Writes exactly `ceil(N/2)` bytes and returns that count. Bytes past the
/// count are left alone.
///
/// # Errors
///
/// Returns [`crate::CodecError::BufferTooSmall`] if `output` is shorter than
/// `ceil(N/2)`. Neither `output` nor `state` is modified in that case.
pub fn encode_into(samples: &[i16], output: &mut [u8], state: &mut AdpcmState) -> Result<usize> {
    let needed = encoded_len(samples.len());
    validate_output_capacity(needed, output.len())?;

    pack(samples, &mut output[..needed], state);

    trace!("ADPCM encoded {} samples to {} bytes (zero-alloc)", samples.len(), needed);

    Ok(needed)
}

/// Decode `nsamples` codes into a freshly allocated sample buffer
///
/// `nsamples` is independent of `data.len()`: trailing bytes are ignored,
/// and an odd count stops after the high nibble of the last byte it needs.
///
/// # Errors
///
/// Returns [`crate::CodecError::InsufficientData`] if `data` holds fewer
/// than `ceil(nsamples/2)` bytes. `state` is untouched in that case.
pub fn decode(data: &[u8], nsamples: usize, state: &mut AdpcmState) -> Result<Vec<i16>> {
    validate_packed_len(nsamples, data.len())?;

    let mut output = vec![0i16; nsamples];
    unpack(data, &mut output, state);

    trace!(
        "ADPCM decoded {} bytes to {} samples ({})",
        encoded_len(nsamples),
        nsamples,
        state
    );

    Ok(output)
}

/// Decode `nsamples` codes into a caller-supplied sample buffer
///
/// # Errors
///
/// Returns [`crate::CodecError::InsufficientData`] for short input and
/// [`crate::CodecError::BufferTooSmall`] if `output` holds fewer than
/// `nsamples` samples. Nothing is written and `state` is untouched on error.
pub fn decode_into(
    data: &[u8],
    nsamples: usize,
    output: &mut [i16],
    state: &mut AdpcmState,
) -> Result<usize> {
    validate_packed_len(nsamples, data.len())?;
    validate_output_capacity(nsamples, output.len())?;

    unpack(data, &mut output[..nsamples], state);

    trace!(
        "ADPCM decoded {} bytes to {} samples (zero-alloc)",
        encoded_len(nsamples),
        nsamples
    );

    Ok(nsamples)
}

/// Caller guarantees `output.len() == encoded_len(samples.len())`.
fn pack(samples: &[i16], output: &mut [u8], state: &mut AdpcmState) {
    for (byte, pair) in output.iter_mut().zip(samples.chunks(2)) {
        let high = encode_sample(pair[0], state);
        let low = match pair.get(1) {
            Some(&sample) => encode_sample(sample, state),
            None => 0,
        };
        *byte = (high << 4) | low;
    }
}

/// Caller guarantees `data.len() >= encoded_len(output.len())`.
fn unpack(data: &[u8], output: &mut [i16], state: &mut AdpcmState) {
    for (pair, &byte) in output.chunks_mut(2).zip(data) {
        pair[0] = decode_code(byte >> 4, state);
        if let Some(sample) = pair.get_mut(1) {
            *sample = decode_code(byte & CODE_MASK, state);
        }
    }
}
