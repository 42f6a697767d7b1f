//! File I/O for the converter
//!
//! PCM files are either raw signed 16-bit little-endian mono, or WAV when the
//! path ends in `.wav`. ADPCM files are raw packed bytes.

use std::fs;
use std::path::Path;

use adpcm_core::codecs::adpcm::pcm;
use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

/// True if `path` has a `.wav` extension (any case)
pub fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

/// PCM samples read from disk, with the WAV header's rate when there was one
#[derive(Debug)]
pub struct PcmInput {
    pub samples: Vec<i16>,
    pub sample_rate: Option<u32>,
}

/// Read PCM samples from a raw or WAV file
pub fn read_pcm(path: &Path) -> Result<PcmInput> {
    if is_wav(path) {
        let mut reader = WavReader::open(path)
            .with_context(|| format!("failed to open WAV file {}", path.display()))?;
        let spec = reader.spec();

        if spec.channels != 1 || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int {
            bail!(
                "{}: expected 16-bit integer mono WAV, got {} channel(s) of {}-bit {:?}",
                path.display(), spec.channels, spec.bits_per_sample, spec.sample_format
            );
        }

        let samples = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("failed to read samples from {}", path.display()))?;

        debug!("Read {} samples at {}Hz from {}", samples.len(), spec.sample_rate, path.display());
        return Ok(PcmInput { samples, sample_rate: Some(spec.sample_rate) });
    }

    let bytes = read_bytes(path)?;
    let samples = pcm::samples_from_le_bytes(&bytes)
        .with_context(|| format!("{} is not raw 16-bit PCM", path.display()))?;

    debug!("Read {} raw samples from {}", samples.len(), path.display());
    Ok(PcmInput { samples, sample_rate: None })
}

/// Write PCM samples as WAV or raw little-endian bytes, chosen by extension
pub fn write_pcm(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    if !is_wav(path) {
        return write_bytes(path, &pcm::samples_to_le_bytes(samples));
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create WAV file {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    debug!("Wrote {} samples at {}Hz to {}", samples.len(), sample_rate, path.display());
    Ok(())
}

/// Read a whole file
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Write a whole file, replacing any existing one
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    #[test]
    fn test_is_wav() {
        assert!(is_wav(Path::new("out.wav")));
        assert!(is_wav(Path::new("dir/OUT.WAV")));
        assert!(!is_wav(Path::new("out.raw")));
        assert!(!is_wav(Path::new("wav")));
    }

    #[test]
    fn test_raw_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.raw");
        let samples = vec![0i16, 1, -1, i16::MAX, i16::MIN];

        write_pcm(&path, &samples, 8000).unwrap();
        assert_eq!(fs::read(&path).unwrap().len(), 10);

        let input = read_pcm(&path).unwrap();
        assert_eq!(input.samples, samples);
        assert_eq!(input.sample_rate, None);
    }

    #[test]
    fn test_wav_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        let samples: Vec<i16> = (0..100).map(|i| (i * 300 - 15000) as i16).collect();

        write_pcm(&path, &samples, 16000).unwrap();

        let input = read_pcm(&path).unwrap();
        assert_eq!(input.samples, samples);
        assert_eq!(input.sample_rate, Some(16000));
    }

    #[test]
    fn test_odd_raw_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("odd.raw");
        write_bytes(&path, &[1, 2, 3]).unwrap();

        assert!(read_pcm(&path).is_err());
    }

    #[test]
    fn test_stereo_wav_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.finalize().unwrap();

        let err = read_pcm(&path).unwrap_err();
        assert!(err.to_string().contains("expected 16-bit integer mono WAV"));
    }
}
