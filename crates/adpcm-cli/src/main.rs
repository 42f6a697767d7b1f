//! `adpcm`: convert between 16-bit PCM, WAV and 4-bit IMA ADPCM files

mod audio_io;

use std::path::{Path, PathBuf};
use std::time::Instant;

use adpcm_core::codecs::adpcm::{self, AdpcmState};
use adpcm_core::utils::{maximise_volume, DEFAULT_HEADROOM};
use adpcm_core::SampleRate;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// IMA ADPCM file converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// Encode raw 16-bit little-endian PCM (or a mono WAV) to packed ADPCM
    Encode {
        /// Input file (.wav or raw PCM)
        #[arg(short, long)]
        input: PathBuf,

        /// Output ADPCM file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode packed ADPCM to WAV (by extension) or raw PCM
    Decode {
        /// Input ADPCM file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (.wav or raw PCM)
        #[arg(short, long)]
        output: PathBuf,

        /// Sample rate written to the WAV header (Hz)
        #[arg(short, long, default_value_t = SampleRate::default().hz())]
        sample_rate: u32,

        /// Scale the decoded audio to full volume
        #[arg(short, long)]
        maximise: bool,
    },

    /// Decode to WAV, then re-encode the decoded audio to a second ADPCM file
    Transcode {
        /// Input ADPCM file
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Re-encoded ADPCM file
        #[arg(short = 'e', long)]
        reencoded: PathBuf,

        /// Sample rate written to the WAV header (Hz)
        #[arg(short, long, default_value_t = SampleRate::default().hz())]
        sample_rate: u32,

        /// Scale the decoded audio to full volume before re-encoding
        #[arg(short, long)]
        maximise: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let start_time = Instant::now();

    match args.command {
        Command::Encode { input, output } => {
            encode_file(&input, &output)?;
        }
        Command::Decode { input, output, sample_rate, maximise } => {
            decode_file(&input, &output, sample_rate, maximise)?;
        }
        Command::Transcode { input, output, reencoded, sample_rate, maximise } => {
            transcode_file(&input, &output, &reencoded, sample_rate, maximise)?;
        }
    }

    info!("Done in {:.2?}", start_time.elapsed());
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Encode a PCM file and return the number of packed bytes written
fn encode_file(input: &Path, output: &Path) -> Result<usize> {
    let pcm = audio_io::read_pcm(input)?;
    if let Some(rate) = pcm.sample_rate {
        info!("Input is {}Hz; the ADPCM stream carries no rate, remember it for decoding", rate);
    }

    let encoded = adpcm::encode(&pcm.samples, &mut AdpcmState::new());
    audio_io::write_bytes(output, &encoded)?;

    info!(
        "Encoded {} samples from {} to {} bytes in {} (ratio {:.2})",
        pcm.samples.len(),
        input.display(),
        encoded.len(),
        output.display(),
        ratio(encoded.len(), pcm.samples.len() * 2)
    );
    Ok(encoded.len())
}

/// Decode an ADPCM file and write it out
///
/// `maximise` only affects what is written. The returned samples are the
/// decoder output as is.
fn decode_file(input: &Path, output: &Path, sample_rate: u32, maximise: bool) -> Result<Vec<i16>> {
    let data = audio_io::read_bytes(input)?;
    let samples = adpcm::decode(&data, adpcm::decoded_len(data.len()), &mut AdpcmState::new())
        .with_context(|| format!("failed to decode {}", input.display()))?;

    if maximise {
        let loud = maximise_volume(&samples, DEFAULT_HEADROOM)?;
        if loud.len() != samples.len() {
            warn!("Dropped {} leading samples as a start-up click", samples.len() - loud.len());
        }
        audio_io::write_pcm(output, &loud, sample_rate)?;
    } else {
        audio_io::write_pcm(output, &samples, sample_rate)?;
    }

    info!(
        "Decoded {} bytes from {} to {} samples in {}",
        data.len(),
        input.display(),
        samples.len(),
        output.display()
    );
    Ok(samples)
}

/// Decode to `output`, then re-encode the decoder output to `reencoded`
///
/// The re-encoded stream never sees the volume maximiser.
fn transcode_file(
    input: &Path,
    output: &Path,
    reencoded: &Path,
    sample_rate: u32,
    maximise: bool,
) -> Result<usize> {
    let samples = decode_file(input, output, sample_rate, maximise)?;
    let encoded = adpcm::encode(&samples, &mut AdpcmState::new());
    audio_io::write_bytes(reencoded, &encoded)?;

    info!(
        "Re-encoded {} samples to {} bytes in {}",
        samples.len(),
        encoded.len(),
        reencoded.display()
    );
    Ok(encoded.len())
}

fn ratio(output: usize, input: usize) -> f64 {
    if input == 0 {
        0.0
    } else {
        output as f64 / input as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use temp_dir::TempDir;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_transcode() {
        let args = Args::try_parse_from([
            "adpcm", "-v", "transcode", "-i", "in.adpcm", "-o", "out.wav", "-e", "again.adpcm", "-m",
        ]).unwrap();

        assert_eq!(args.verbose, 1);
        match args.command {
            Command::Transcode { sample_rate, maximise, reencoded, .. } => {
                assert_eq!(sample_rate, 22050);
                assert!(maximise);
                assert_eq!(reencoded, PathBuf::from("again.adpcm"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_encode_then_decode_files() {
        let dir = TempDir::new().unwrap();
        let raw = dir.path().join("ramp.raw");
        let packed = dir.path().join("ramp.adpcm");
        let wav = dir.path().join("ramp.wav");

        audio_io::write_pcm(&raw, &[100, 200, 300, 400, 500], 8000).unwrap();

        assert_eq!(encode_file(&raw, &packed).unwrap(), 3);
        assert_eq!(std::fs::read(&packed).unwrap(), vec![0x77, 0x77, 0x60]);

        let samples = decode_file(&packed, &wav, 8000, false).unwrap();
        assert_eq!(&samples[..5], &[11, 41, 104, 240, 494]);

        let written = audio_io::read_pcm(&wav).unwrap();
        assert_eq!(written.samples, samples);
        assert_eq!(written.sample_rate, Some(8000));
    }

    fn quiet_tone() -> Vec<i16> {
        (0..4096).map(|i| (1500.0 * (i as f32 * 0.1).sin()) as i16).collect()
    }

    #[test]
    fn test_decode_with_maximise() {
        let dir = TempDir::new().unwrap();
        let packed = dir.path().join("quiet.adpcm");
        let raw = dir.path().join("loud.raw");

        let encoded = adpcm::encode(&quiet_tone(), &mut AdpcmState::new());
        audio_io::write_bytes(&packed, &encoded).unwrap();

        let decoded = decode_file(&packed, &raw, 22050, true).unwrap();
        assert_eq!(decoded, adpcm::decode(&encoded, encoded.len() * 2, &mut AdpcmState::new()).unwrap());

        let written = audio_io::read_pcm(&raw).unwrap().samples;
        let peak = written.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
        assert!(peak > 32000, "Written peak {} should sit just below full scale", peak);
    }

    #[test]
    fn test_transcode_reencodes_decoder_output() {
        let dir = TempDir::new().unwrap();
        let packed = dir.path().join("tone.adpcm");
        let encoded = adpcm::encode(&quiet_tone(), &mut AdpcmState::new());
        audio_io::write_bytes(&packed, &encoded).unwrap();

        let decoded = adpcm::decode(&encoded, encoded.len() * 2, &mut AdpcmState::new()).unwrap();
        let expected = adpcm::encode(&decoded, &mut AdpcmState::new());

        let plain_wav = dir.path().join("plain.wav");
        let plain_adpcm = dir.path().join("plain.adpcm");
        transcode_file(&packed, &plain_wav, &plain_adpcm, 22050, false).unwrap();

        let loud_wav = dir.path().join("loud.wav");
        let loud_adpcm = dir.path().join("loud.adpcm");
        transcode_file(&packed, &loud_wav, &loud_adpcm, 22050, true).unwrap();

        // Maximising changes the WAV only
        assert_eq!(std::fs::read(&plain_adpcm).unwrap(), expected);
        assert_eq!(std::fs::read(&loud_adpcm).unwrap(), expected);

        let plain = audio_io::read_pcm(&plain_wav).unwrap().samples;
        let loud = audio_io::read_pcm(&loud_wav).unwrap().samples;
        assert_eq!(plain, decoded);
        assert_ne!(loud, plain);
        assert!(loud.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0) > 32000);
    }

    #[test]
    fn test_missing_input_reports_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.adpcm");
        let err = decode_file(&missing, &dir.path().join("out.raw"), 8000, false).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.adpcm"));
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(25, 100), 0.25);
        assert_eq!(ratio(0, 0), 0.0);
    }
}
