//! Stereo recording frames and a quick level summary.

/// One stereo frame: `[reference, captured]`.
pub type Frame = [f32; 2];

/// Length and per-channel peak level of a recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingSummary {
    /// Number of frames.
    pub frames: usize,
    /// Peak absolute amplitude per channel, `[reference, captured]`.
    pub peak: [f32; 2],
}

impl RecordingSummary {
    /// Duration in seconds at `sample_rate`.
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / f64::from(sample_rate)
    }

    /// Whether either channel never leaves digital silence.
    pub fn has_silent_channel(&self) -> bool {
        self.peak.iter().any(|&p| p == 0.0)
    }
}

/// Summarize a recording. Non-finite samples are skipped for the peak.
pub fn summarize(recording: &[Frame]) -> RecordingSummary {
    let mut peak = [0.0f32; 2];
    for frame in recording {
        for (p, s) in peak.iter_mut().zip(frame) {
            if s.is_finite() {
                *p = p.max(s.abs());
            }
        }
    }

    RecordingSummary {
        frames: recording.len(),
        peak,
    }
}

/// Split a slice of interleaved stereo samples into frames.
///
/// A trailing odd sample is dropped.
pub fn frames_from_interleaved(samples: &[f32]) -> Vec<Frame> {
    samples.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
}

/// Flatten frames back into interleaved samples.
pub fn frames_to_interleaved(frames: &[Frame]) -> Vec<f32> {
    frames.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_peaks() {
        let recording = vec![[0.5, -0.25], [-0.75, 0.1], [0.0, f32::NAN]];
        let summary = summarize(&recording);

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.peak, [0.75, 0.25]);
        assert!(!summary.has_silent_channel());
    }

    #[test]
    fn test_summary_silent_channel() {
        let summary = summarize(&[[0.3, 0.0], [0.1, 0.0]]);
        assert!(summary.has_silent_channel());
        assert_eq!(summarize(&[]).peak, [0.0, 0.0]);
    }

    #[test]
    fn test_duration() {
        let summary = RecordingSummary {
            frames: 96000,
            peak: [1.0, 1.0],
        };
        assert!((summary.duration_secs(48000) - 2.0).abs() < 1e-12);
        assert_eq!(summary.duration_secs(0), 0.0);
    }

    #[test]
    fn test_interleave_roundtrip() {
        let frames = frames_from_interleaved(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(frames, vec![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(frames_to_interleaved(&frames), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
