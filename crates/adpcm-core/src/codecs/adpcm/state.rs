//! ADPCM Adaptation State
//!
//! The adaptation state is the only mutable entity of the codec. It is a
//! plain value owned by the caller: the block functions borrow it mutably for
//! the duration of one call, and a chunked stream is continued by passing the
//! same state into the next call.

use std::fmt;

use crate::codecs::adpcm::tables::{MAX_STEP_INDEX, STEP_TABLE};
use crate::error::{CodecError, Result};

/// Adaptation state shared in lock-step by the encoder and the decoder
///
/// `predicted` is an `i16`, so it cannot leave the 16-bit range. `step_index`
/// is kept in `0..=88` by every constructor and every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AdpcmState {
    predicted: i16,
    step_index: u8,
}

impl AdpcmState {
    /// Fresh state: predicted value 0, step index 0
    pub const fn new() -> Self {
        Self {
            predicted: 0,
            step_index: 0,
        }
    }

    /// Create a state from explicit values
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidState`] if `step_index` exceeds 88.
    pub fn with_values(predicted: i16, step_index: u8) -> Result<Self> {
        if step_index > MAX_STEP_INDEX {
            return Err(CodecError::invalid_state(format!(
                "step index {} out of range 0..={}",
                step_index, MAX_STEP_INDEX
            )));
        }

        Ok(Self {
            predicted,
            step_index,
        })
    }

    /// Running estimate of the next linear sample
    pub const fn predicted(&self) -> i16 {
        self.predicted
    }

    /// Current index into the step-size table
    pub const fn step_index(&self) -> u8 {
        self.step_index
    }

    /// Current quantizer step size
    pub const fn step(&self) -> i32 {
        STEP_TABLE[self.step_index as usize]
    }

    /// Return to the fresh state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply one reconstructed difference and one index adjustment
    ///
    /// Both results are clamped, which keeps the invariants for any input.
    pub(crate) fn advance(&mut self, predicted: i32, index_delta: i8) {
        self.predicted = predicted.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        self.step_index =
            (self.step_index as i32 + index_delta as i32).clamp(0, MAX_STEP_INDEX as i32) as u8;
    }
}

impl fmt::Display for AdpcmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "predicted={} step_index={} step={}",
            self.predicted,
            self.step_index,
            self.step()
        )
    }
}
