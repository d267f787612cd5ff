//! CSV export of sampled signals.
//!
//! Both the excitation and the averaged impulse response are written with the
//! same three columns, ready for a spreadsheet or plotting script:
//!
//! ```text
//! sample,time_ms,amplitude
//! 0,0.000000,0.0000012
//! 1,0.022676,-0.0000340
//! ```

use crate::Result;
use latprobe_analysis::DelayEstimate;
use std::io::{BufWriter, Write};
use std::path::Path;

fn write_series_csv(path: &Path, samples: &[f64], sample_rate: u32) -> Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);
    let ms_per_sample = if sample_rate == 0 {
        0.0
    } else {
        1000.0 / f64::from(sample_rate)
    };

    writeln!(file, "sample,time_ms,amplitude")?;
    for (i, &value) in samples.iter().enumerate() {
        writeln!(file, "{},{:.6},{:.9}", i, i as f64 * ms_per_sample, value)?;
    }
    file.flush()?;

    Ok(())
}

/// Export the averaged impulse response of an estimate.
///
/// # Example
///
/// ```rust,ignore
/// use latprobe_io::write_impulse_response_csv;
///
/// let estimate = estimate_delay(&recording, 8192, 48000)?;
/// write_impulse_response_csv("h.csv", &estimate)?;
/// ```
pub fn write_impulse_response_csv(path: impl AsRef<Path>, estimate: &DelayEstimate) -> Result<()> {
    write_series_csv(
        path.as_ref(),
        &estimate.impulse_response,
        estimate.sample_rate,
    )
}

/// Export a signal such as the excitation.
pub fn write_signal_csv(path: impl AsRef<Path>, signal: &[f64], sample_rate: u32) -> Result<()> {
    write_series_csv(path.as_ref(), signal, sample_rate)
}
