//! IMA ADPCM Codec Implementation
//!
//! 4-bit adaptive differential PCM: each 16-bit sample is coded as a 3-bit
//! magnitude plus a sign bit, relative to a running prediction, with a
//! quantizer step that adapts through an 89-entry table.
//!
//! # Architecture
//!
//! The implementation is split into several modules:
//! - `tables`: Step-size and index adjustment tables
//! - `state`: The caller-owned adaptation state
//! - `engine`: Per-sample transforms and the block encode/decode functions
//! - `pcm`: The little-endian byte surface (`encode`, `decode`, `*_into`)
//! - `codec`: The stateful [`AdpcmCodec`] object
//!
//! # Streaming
//!
//! The engine never keeps hidden state. To process a stream in chunks, pass
//! the same [`AdpcmState`] to consecutive calls:
//!
//! ```
//! use adpcm_core::codecs::adpcm::{self, AdpcmState};
//!
//! let samples: Vec<i16> = (0..320).map(|i| (i * 40) as i16).collect();
//!
//! let mut state = AdpcmState::new();
//! let mut chunked = Vec::new();
//! for chunk in samples.chunks(160) {
//!     chunked.extend(adpcm::encode(chunk, &mut state));
//! }
//!
//! let whole = adpcm::encode(&samples, &mut AdpcmState::new());
//! assert_eq!(chunked, whole);
//! ```

pub mod codec;
pub mod engine;
pub mod pcm;
pub mod state;
pub mod tables;

#[cfg(test)]
mod tests;

// Re-export the main codec struct
pub use codec::AdpcmCodec;

// Re-export key types and functions
pub use engine::{
    decode, decode_code, decode_into, decoded_len, encode, encode_into, encode_sample,
    encoded_len,
};
pub use state::AdpcmState;
