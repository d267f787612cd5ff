//! WAV file reading and writing.
//!
//! Recordings are stored as stereo WAV with the reference on the left channel
//! and the captured signal on the right. The excitation itself can be written
//! as a mono file for playback from a DAW or hardware player.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use latprobe_analysis::Frame;
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample. 32 is written as float, anything else as PCM.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// 32-bit float spec with the given layout.
    pub fn float(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 32,
        }
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::float(2, 48000)
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read every sample of a WAV file as f32, interleaved.
fn read_samples(reader: WavReader<std::io::BufReader<std::fs::File>>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Read a WAV file as `[reference, captured]` frames along with its spec.
///
/// Mono files are duplicated to both channels. Files with more than 2
/// channels use only the first two.
pub fn read_wav_frames<P: AsRef<Path>>(path: P) -> Result<(Vec<Frame>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(Error::UnsupportedChannels(0));
    }

    let samples = read_samples(reader)?;
    let frames = if channels == 1 {
        samples.iter().map(|&s| [s, s]).collect()
    } else {
        samples
            .chunks_exact(channels)
            .map(|chunk| [chunk[0], chunk[1]])
            .collect()
    };

    Ok((frames, spec))
}

/// Write `[reference, captured]` frames as a stereo WAV file.
///
/// `spec.channels` is ignored; the file always has two channels.
pub fn write_wav_frames<P: AsRef<Path>>(path: P, frames: &[Frame], spec: WavSpec) -> Result<()> {
    let spec = WavSpec { channels: 2, ..spec };
    let samples = latprobe_analysis::recording::frames_to_interleaved(frames);
    write_wav(path, &samples, spec)
}

/// Write interleaved samples to a WAV file.
///
/// Use a mono spec to write the excitation for external playback.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let hound_spec = hound::WavSpec::from(spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_frames_roundtrip_float() {
        let frames: Vec<Frame> = (0..480)
            .map(|i| {
                let t = i as f32 / 480.0;
                [t, -t * 0.5]
            })
            .collect();

        let file = NamedTempFile::with_suffix(".wav").unwrap();
        write_wav_frames(file.path(), &frames, WavSpec::float(2, 44100)).unwrap();
        let (loaded, spec) = read_wav_frames(file.path()).unwrap();

        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(loaded, frames);
    }

    #[test]
    fn test_mono_duplicated() {
        let samples = [0.1f32, 0.2, -0.3];
        let file = NamedTempFile::with_suffix(".wav").unwrap();
        write_wav(file.path(), &samples, WavSpec::float(1, 48000)).unwrap();

        let (frames, spec) = read_wav_frames(file.path()).unwrap();
        assert_eq!(spec.channels, 1);
        assert_eq!(frames, vec![[0.1, 0.1], [0.2, 0.2], [-0.3, -0.3]]);
    }

    #[test]
    fn test_multichannel_takes_first_two() {
        let samples = [1.0f32, 0.5, 0.25, -1.0, -0.5, -0.25];
        let file = NamedTempFile::with_suffix(".wav").unwrap();
        write_wav(file.path(), &samples, WavSpec::float(3, 48000)).unwrap();

        let (frames, _) = read_wav_frames(file.path()).unwrap();
        assert_eq!(frames, vec![[1.0, 0.5], [-1.0, -0.5]]);
    }

    #[test]
    fn test_pcm16_roundtrip_within_quantization() {
        let frames: Vec<Frame> = vec![[0.5, -0.5], [0.25, 0.0], [-1.0, 0.999]];
        let file = NamedTempFile::with_suffix(".wav").unwrap();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 16,
        };
        write_wav_frames(file.path(), &frames, spec).unwrap();

        let (loaded, _) = read_wav_frames(file.path()).unwrap();
        for (a, b) in frames.iter().flatten().zip(loaded.iter().flatten()) {
            assert!((a - b).abs() < 1.0 / 16384.0, "{a} vs {b}");
        }
    }

    #[test]
    fn test_read_info() {
        let file = NamedTempFile::with_suffix(".wav").unwrap();
        write_wav_frames(file.path(), &vec![[0.0, 0.0]; 4800], WavSpec::float(2, 48000)).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.num_frames, 4800);
        assert_eq!(info.format, WavFormat::IeeeFloat);
        assert!((info.duration_secs - 0.1).abs() < 1e-9);
    }
}
