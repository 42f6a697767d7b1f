//! PCM volume maximiser
//!
//! Decoded microphone recordings are often quiet and sometimes start with a
//! loud transient from the input stage settling. `maximise_volume` drops that
//! transient and scales the rest so its peak sits just below full scale.

use tracing::{debug, warn};

use crate::error::Result;
use crate::utils::validate_headroom;

/// Leading samples inspected for a start-up click
pub const CLICK_WINDOW: usize = 1024;

/// Default fraction of full scale left free below the peak
pub const DEFAULT_HEADROOM: f32 = 0.002;

/// A leading window this many times louder than the rest is a click
const CLICK_RATIO: f64 = 10.0;

/// Scale samples to the loudest level possible without clipping
///
/// Inputs shorter than [`CLICK_WINDOW`], and silent inputs, are returned
/// unchanged. If the first [`CLICK_WINDOW`] samples are more than ten times
/// louder on average than the remainder, they are dropped before scaling.
///
/// # Errors
///
/// Returns [`crate::CodecError::InvalidConfig`] if `headroom` is outside
/// `[0, 1)`.
pub fn maximise_volume(samples: &[i16], headroom: f32) -> Result<Vec<i16>> {
    validate_headroom(headroom)?;

    if samples.len() < CLICK_WINDOW || peak_level(samples) == 0 {
        return Ok(samples.to_vec());
    }

    let body = if samples.len() > CLICK_WINDOW {
        let lead = mean_level(&samples[..CLICK_WINDOW]);
        let rest = mean_level(&samples[CLICK_WINDOW..]);
        if lead > CLICK_RATIO * rest {
            warn!(
                "First {} samples are {:.1}x louder than the rest, dropping them as a click",
                CLICK_WINDOW,
                lead / rest.max(f64::MIN_POSITIVE)
            );
            &samples[CLICK_WINDOW..]
        } else {
            samples
        }
    } else {
        samples
    };

    let peak = peak_level(body);
    if peak == 0 {
        return Ok(body.to_vec());
    }

    let target = ((1.0 - headroom) * i16::MAX as f32) as i32;
    let gain = target as f32 / peak as f32;

    debug!("Maximising volume: peak {} -> {}, gain {:.3}", peak, target, gain);

    Ok(body
        .iter()
        .map(|&sample| (sample as f32 * gain).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16)
        .collect())
}

/// Largest absolute sample value
pub fn peak_level(samples: &[i16]) -> u16 {
    samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
}

/// Mean absolute sample value, 0.0 for an empty slice
pub fn mean_level(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.unsigned_abs() as f64).sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_short_input_unchanged() {
        let samples = vec![100i16; CLICK_WINDOW - 1];
        assert_eq!(maximise_volume(&samples, DEFAULT_HEADROOM).unwrap(), samples);
    }

    #[test]
    fn test_silence_unchanged() {
        let samples = vec![0i16; 4096];
        assert_eq!(maximise_volume(&samples, DEFAULT_HEADROOM).unwrap(), samples);
    }

    #[test]
    fn test_scales_peak_to_target() {
        let samples: Vec<i16> = (0..4096).map(|i| if i % 2 == 0 { 1000 } else { -500 }).collect();
        let scaled = maximise_volume(&samples, 0.0).unwrap();

        assert_eq!(scaled.len(), samples.len());
        assert_eq!(peak_level(&scaled), 32767);
        assert_eq!(scaled[0], 32767);
        // Half of the peak, within one step of f32 rounding
        assert!((scaled[1] as i32 + 16383).abs() <= 1);
    }

    #[test]
    fn test_headroom_leaves_margin() {
        let samples = vec![2000i16; 2048];
        let scaled = maximise_volume(&samples, 0.5).unwrap();
        assert!(scaled.iter().all(|&s| s == 16383));
    }

    #[test]
    fn test_leading_click_is_dropped() {
        let mut samples = vec![20000i16; CLICK_WINDOW];
        samples.extend(std::iter::repeat(100i16).take(2048));

        let scaled = maximise_volume(&samples, 0.0).unwrap();
        assert_eq!(scaled.len(), 2048);
        assert!(scaled.iter().all(|&s| s == 32767));
    }

    #[test]
    fn test_exact_window_is_not_trimmed() {
        let samples = vec![300i16; CLICK_WINDOW];
        let scaled = maximise_volume(&samples, 0.0).unwrap();
        assert_eq!(scaled.len(), CLICK_WINDOW);
        assert!(scaled.iter().all(|&s| s == 32767));
    }

    #[test]
    fn test_full_scale_negative_peak() {
        let mut samples = vec![0i16; 2048];
        samples[1500] = i16::MIN;
        samples[1501] = 16384;
        let scaled = maximise_volume(&samples, 0.0).unwrap();
        assert_eq!(peak_level(&scaled), 32767);
        assert_eq!(scaled[1500], -32767);
    }

    #[test]
    fn test_invalid_headroom() {
        assert!(matches!(
            maximise_volume(&[0i16; 10], 1.5),
            Err(CodecError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_levels() {
        assert_eq!(peak_level(&[]), 0);
        assert_eq!(peak_level(&[-3, 2, i16::MIN]), 32768);
        assert_eq!(mean_level(&[]), 0.0);
        assert_eq!(mean_level(&[-2, 2, 4, -4]), 3.0);
    }
}
