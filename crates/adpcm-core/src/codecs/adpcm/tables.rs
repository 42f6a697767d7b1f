//! IMA ADPCM Tables and Constants
//!
//! The two lookup tables shared by the encoder and the decoder. Both sides
//! must use identical tables for the reconstruction to stay in lock-step.

/// Number of entries in the step-size table
pub const STEP_TABLE_LEN: usize = 89;

/// Largest legal adaptation index
pub const MAX_STEP_INDEX: u8 = (STEP_TABLE_LEN - 1) as u8;

/// Quantizer step sizes, indexed by the adaptation index
///
/// Strictly increasing, roughly 10% apart, spanning 7 to 32767.
pub const STEP_TABLE: [i32; STEP_TABLE_LEN] = [
    7, 8, 9, 10, 11, 12, 13, 14, 16, 17,
    19, 21, 23, 25, 28, 31, 34, 37, 41, 45,
    50, 55, 60, 66, 73, 80, 88, 97, 107, 118,
    130, 143, 157, 173, 190, 209, 230, 253, 279, 307,
    337, 371, 408, 449, 494, 544, 598, 658, 724, 796,
    876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066,
    2272, 2499, 2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358,
    5894, 6484, 7132, 7845, 8630, 9493, 10442, 11487, 12635, 13899,
    15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767,
];

/// Adaptation index adjustment, indexed by the full 4-bit code
///
/// The sign bit does not affect the adjustment, so the table repeats.
pub const INDEX_TABLE: [i8; 16] = [
    -1, -1, -1, -1, 2, 4, 6, 8,
    -1, -1, -1, -1, 2, 4, 6, 8,
];

/// Sign bit of a 4-bit code
pub const SIGN_BIT: u8 = 0x08;

/// Magnitude bits of a 4-bit code
pub const MAGNITUDE_MASK: u8 = 0x07;

/// Mask for a full 4-bit code
pub const CODE_MASK: u8 = 0x0F;
