//! # ADPCM-Core: 4-bit IMA ADPCM Codec Library
//!
//! This library implements the IMA ADPCM codec: a stateful, sample-by-sample
//! transform between 16-bit signed linear PCM and 4-bit codes packed two per
//! byte, with a quantizer step that adapts through a fixed table.
//!
//! ## Features
//!
//! - **Caller-owned state**: the adaptation state is a plain value, so a
//!   stream can be processed in chunks by threading it through calls
//! - **Two buffer contracts**: allocate-and-return, or write into a
//!   caller-supplied buffer with the size checked before any byte is written
//! - **Byte surface**: `encode`/`decode`/`encode_into`/`decode_into` over
//!   little-endian PCM bytes, each call a fresh stream
//! - **Streaming codec**: [`AdpcmCodec`] implements [`AudioCodec`] with
//!   per-call or continuous state handling
//!
//! ## Usage
//!
//! ```rust
//! use adpcm_core::codecs::adpcm::{self, pcm, AdpcmState};
//!
//! // Typed samples with an explicit state
//! let samples = vec![0i16; 160];
//! let mut state = AdpcmState::new();
//! let encoded = adpcm::encode(&samples, &mut state);
//! assert_eq!(encoded.len(), 80);
//!
//! let decoded = adpcm::decode(&encoded, samples.len(), &mut AdpcmState::new())?;
//! assert_eq!(decoded, samples);
//!
//! // Raw little-endian PCM bytes
//! let packed = pcm::encode(&[0u8; 8])?;
//! assert_eq!(&packed[..], &[0x00, 0x00]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codecs;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use codecs::adpcm::{AdpcmCodec, AdpcmState};
pub use error::{CodecError, ErrorCategory, Result};
pub use types::{AudioCodec, AudioCodecExt, CodecConfig, CodecInfo, SampleRate, StateMode};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported codec names
pub const SUPPORTED_CODECS: &[&str] = &[codecs::adpcm::codec::CODEC_NAME];

/// Initialize the codec library
///
/// Installs a default `tracing` subscriber if none is set yet. It's safe to
/// call multiple times.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for setup that can fail.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt::try_init();

    tracing::info!("ADPCM-Core v{} initialized", VERSION);
    tracing::info!("Supported codecs: {:?}", SUPPORTED_CODECS);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_codecs: SUPPORTED_CODECS.to_vec(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// List of supported codec names
    pub supported_codecs: Vec<&'static str>,
}
