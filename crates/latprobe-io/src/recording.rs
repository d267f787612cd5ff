//! Raw recording files.
//!
//! The capture format is headerless: consecutive stereo frames of
//! little-endian IEEE `f32`, reference first.
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬─────
//! │ ref[0]   │ cap[0]   │ ref[1]   │ cap[1]   │ ...
//! │ f32 LE   │ f32 LE   │ f32 LE   │ f32 LE   │
//! └──────────┴──────────┴──────────┴──────────┴─────
//! ```

use crate::{Error, Result};
use latprobe_analysis::Frame;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Bytes per stereo frame.
pub const FRAME_BYTES: usize = 2 * std::mem::size_of::<f32>();

/// Decode raw little-endian frames.
pub fn decode_frames(bytes: &[u8]) -> Result<Vec<Frame>> {
    if !bytes.len().is_multiple_of(FRAME_BYTES) {
        return Err(Error::MalformedRecording {
            len: bytes.len() as u64,
            frame_bytes: FRAME_BYTES,
        });
    }

    Ok(bytes
        .chunks_exact(FRAME_BYTES)
        .map(|chunk| {
            let mut frame = [0.0f32; 2];
            for (sample, raw) in frame.iter_mut().zip(chunk.chunks_exact(4)) {
                *sample = f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
            }
            frame
        })
        .collect())
}

/// Read a raw recording.
pub fn read_recording<P: AsRef<Path>>(path: P) -> Result<Vec<Frame>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let frames = decode_frames(&bytes)?;
    tracing::debug!(path = %path.display(), frames = frames.len(), "read raw recording");
    Ok(frames)
}

/// Write a raw recording.
pub fn write_recording<P: AsRef<Path>>(path: P, frames: &[Frame]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for sample in frames.iter().flatten() {
        writer.write_all(&sample.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Whether a path names a WAV file (by extension, case-insensitive).
pub fn is_wav_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}

/// Load a recording in either format: `.wav` files through
/// [`read_wav_frames`](crate::wav::read_wav_frames), anything else as raw.
pub fn load_recording<P: AsRef<Path>>(path: P) -> Result<Vec<Frame>> {
    let path = path.as_ref();
    if is_wav_path(path) {
        let (frames, spec) = crate::wav::read_wav_frames(path)?;
        tracing::debug!(
            path = %path.display(),
            frames = frames.len(),
            sample_rate = spec.sample_rate,
            "read WAV recording"
        );
        Ok(frames)
    } else {
        read_recording(path)
    }
}

/// Save a recording in the format named by the extension.
///
/// `sample_rate` is only used for WAV output.
pub fn save_recording<P: AsRef<Path>>(path: P, frames: &[Frame], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    if is_wav_path(path) {
        crate::wav::write_wav_frames(path, frames, crate::wav::WavSpec::float(2, sample_rate))
    } else {
        write_recording(path, frames)
    }
}
