//! Loopback capture: play the excitation, record reference and response.
//!
//! The output stream loops the excitation on channel 0 and keeps every other
//! output channel silent. The input stream takes its first two channels as
//! `[reference, captured]` frames: wire the excitation straight into input 0
//! and through the device under test into input 1.
//!
//! ```text
//!  out 0 ──┬─────────────────────────► in 0  (reference)
//!          └──► device under test ───► in 1  (captured)
//! ```
//!
//! Frames travel from the audio thread to the caller over a bounded channel.
//! If the caller falls behind, frames are dropped and counted; a recording
//! with drops has gaps and its block alignment is lost, so drops are logged
//! as warnings.

use crate::backend::{AudioBackend, BackendStreamConfig};
use crate::{Error, Result};
use latprobe_analysis::Frame;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Capacity of the audio-thread to caller channel, in callback buffers.
const CHANNEL_BUFFERS: usize = 256;

/// Plays an excitation and records the two-channel loopback.
pub struct LoopbackRecorder<'a> {
    backend: &'a dyn AudioBackend,
    output: BackendStreamConfig,
    input: BackendStreamConfig,
}

impl<'a> LoopbackRecorder<'a> {
    /// Create a recorder using `config` for both streams.
    pub fn new(backend: &'a dyn AudioBackend, config: BackendStreamConfig) -> Self {
        Self {
            backend,
            output: config.clone(),
            input: config,
        }
    }

    /// Select the input device by index or name.
    pub fn with_input_device(mut self, device: Option<String>) -> Self {
        self.input.device_name = device;
        self
    }

    /// Select the output device by index or name.
    pub fn with_output_device(mut self, device: Option<String>) -> Self {
        self.output.device_name = device;
        self
    }

    /// Sample rate both streams run at.
    pub fn sample_rate(&self) -> u32 {
        self.input.sample_rate
    }

    /// Record exactly `num_frames` frames while looping `excitation`.
    ///
    /// Fails with [`Error::Timeout`] when the frames do not arrive within
    /// `timeout`.
    pub fn record(
        &self,
        excitation: &[f32],
        num_frames: usize,
        timeout: Duration,
    ) -> Result<Vec<Frame>> {
        self.record_with_progress(excitation, num_frames, timeout, |_| {})
    }

    /// [`record`](Self::record), calling `progress` with the running frame
    /// count as buffers arrive.
    pub fn record_with_progress<F>(
        &self,
        excitation: &[f32],
        num_frames: usize,
        timeout: Duration,
        mut progress: F,
    ) -> Result<Vec<Frame>>
    where
        F: FnMut(usize),
    {
        if self.input.channels < 2 {
            return Err(Error::UnsupportedChannels(self.input.channels));
        }
        if self.output.channels == 0 {
            return Err(Error::UnsupportedChannels(0));
        }

        tracing::info!(
            backend = self.backend.name(),
            frames = num_frames,
            excitation = excitation.len(),
            sample_rate = self.input.sample_rate,
            "loopback recording started"
        );

        let out_channels = self.output.channels as usize;
        let in_channels = self.input.channels as usize;

        let signal = excitation.to_vec();
        let mut position = 0;
        let output_handle = self.backend.build_output_stream(
            &self.output,
            Box::new(move |data: &mut [f32]| {
                fill_cyclic(data, out_channels, &signal, &mut position);
            }),
            Box::new(|err: &str| tracing::error!(error = err, "output stream error")),
        )?;

        let (tx, rx) = mpsc::sync_channel::<Vec<Frame>>(CHANNEL_BUFFERS);
        let dropped = Arc::new(AtomicUsize::new(0));
        let input_dropped = Arc::clone(&dropped);
        let input_handle = self.backend.build_input_stream(
            &self.input,
            Box::new(move |data: &[f32]| {
                let frames = input_frames(data, in_channels);
                let count = frames.len();
                if tx.try_send(frames).is_err() {
                    input_dropped.fetch_add(count, Ordering::Relaxed);
                }
            }),
            Box::new(|err: &str| tracing::error!(error = err, "input stream error")),
        )?;

        let deadline = Instant::now() + timeout;
        let mut recording = Vec::with_capacity(num_frames);
        while recording.len() < num_frames {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(frames) => {
                    recording.extend(frames);
                    progress(recording.len().min(num_frames));
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(Error::Timeout {
                        received: recording.len(),
                        expected: num_frames,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(Error::Stream("input stream closed".to_string()));
                }
            }
        }

        drop(input_handle);
        drop(output_handle);
        recording.truncate(num_frames);

        let dropped = dropped.load(Ordering::Relaxed);
        if dropped > 0 {
            tracing::warn!(dropped, "input frames dropped, recording has gaps");
        }
        tracing::info!(frames = recording.len(), "loopback recording finished");

        Ok(recording)
    }
}

/// Write the excitation to channel 0 of each output frame, looping at its
/// end; other channels are silenced. An empty excitation plays silence.
pub fn fill_cyclic(data: &mut [f32], channels: usize, excitation: &[f32], position: &mut usize) {
    for frame in data.chunks_mut(channels.max(1)) {
        frame.fill(0.0);
        if let Some(&sample) = excitation.get(*position) {
            frame[0] = sample;
            *position = (*position + 1) % excitation.len();
        }
    }
}

/// Take the first two channels of an interleaved input buffer as frames.
pub fn input_frames(data: &[f32], channels: usize) -> Vec<Frame> {
    if channels < 2 {
        return Vec::new();
    }
    data.chunks_exact(channels)
        .map(|chunk| [chunk[0], chunk[1]])
        .collect()
}
