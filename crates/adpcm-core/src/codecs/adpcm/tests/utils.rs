//! IMA ADPCM Test Utilities

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::codecs::adpcm::{encode_sample, AdpcmState};

/// Samples 100, 200, .. 500 and what the codec makes of them from a zero state
pub const RAMP: [i16; 5] = [100, 200, 300, 400, 500];
/// Packed codes for [`RAMP`]
pub const RAMP_ENCODED: [u8; 3] = [0x77, 0x77, 0x60];
/// Decoder output for [`RAMP_ENCODED`]
pub const RAMP_DECODED: [i16; 5] = [11, 41, 104, 240, 494];

/// Reconstructed samples the encoder tracks internally, one per input sample
pub fn encoder_reconstruction(samples: &[i16], state: &mut AdpcmState) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| {
            encode_sample(sample, state);
            state.predicted()
        })
        .collect()
}

/// Signal-to-noise ratio in dB, skipping the first `warmup` samples
pub fn calculate_snr(original: &[i16], decoded: &[i16], warmup: usize) -> f64 {
    let (signal, noise) = original
        .iter()
        .zip(decoded)
        .skip(warmup)
        .fold((0.0f64, 0.0f64), |(signal, noise), (&o, &d)| {
            let err = o as f64 - d as f64;
            (signal + (o as f64).powi(2), noise + err * err)
        });

    if noise == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (signal / noise).log10()
}

/// Test signal generators
pub mod test_signals {
    use super::*;

    /// Generate a sine wave at `frequency` Hz
    pub fn generate_sine_wave(frequency: f32, sample_rate: f32, duration_samples: usize, amplitude: i16) -> Vec<i16> {
        (0..duration_samples)
            .map(|i| {
                let t = i as f32 / sample_rate;
                let sample = (amplitude as f32) * (2.0 * std::f32::consts::PI * frequency * t).sin();
                sample.round() as i16
            })
            .collect()
    }

    /// Generate seeded white noise in `[-amplitude, amplitude]`
    pub fn generate_white_noise(duration_samples: usize, amplitude: i16, seed: u64) -> Vec<i16> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..duration_samples)
            .map(|_| rng.gen_range(-amplitude..=amplitude))
            .collect()
    }

    /// Generate a square wave alternating between the two full-scale rails
    pub fn generate_full_scale_square(duration_samples: usize, half_period: usize) -> Vec<i16> {
        (0..duration_samples)
            .map(|i| if (i / half_period) % 2 == 0 { i16::MAX } else { i16::MIN })
            .collect()
    }
}
