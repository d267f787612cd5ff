//! Chirp source tables.
//!
//! Firmware and plugin builds embed one period of the excitation as a static
//! table and loop it on the output. These writers render the table as source
//! text.
//!
//! ```text
//! Cpp:  std::array<float, 4> chirp_signal = {0.5, -0.25, 0.0, 1e-5};
//! Rust: pub static CHIRP_SIGNAL: [f32; 4] = [0.5, -0.25, 0.0, 1e-5];
//! ```

use crate::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Source language of a chirp table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// `std::array<float, N> chirp_signal = {...};`
    Cpp,
    /// `pub static CHIRP_SIGNAL: [f32; N] = [...];`
    Rust,
}

impl ArtifactFormat {
    /// Guess the format from a file extension: `.rs` is Rust, `.inc`, `.h`,
    /// `.hpp`, and `.cpp` are C++.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "rs" => Some(ArtifactFormat::Rust),
            "inc" | "h" | "hpp" | "cpp" => Some(ArtifactFormat::Cpp),
            _ => None,
        }
    }
}

/// Render a chirp table as source text, terminated by a newline.
///
/// Samples are narrowed to `f32` and written in their shortest round-trip
/// form, so the compiled table holds exactly the narrowed values.
pub fn render_chirp_artifact(signal: &[f64], format: ArtifactFormat) -> String {
    let (open, close) = match format {
        ArtifactFormat::Cpp => (
            format!("std::array<float, {}> chirp_signal = {{", signal.len()),
            "};\n",
        ),
        ArtifactFormat::Rust => (
            format!("pub static CHIRP_SIGNAL: [f32; {}] = [", signal.len()),
            "];\n",
        ),
    };

    // ~12 bytes per rendered sample
    let mut out = String::with_capacity(open.len() + signal.len() * 12 + close.len());
    out.push_str(&open);
    for (k, &sample) in signal.iter().enumerate() {
        if k > 0 {
            out.push_str(", ");
        }
        // Debug keeps a decimal point or exponent, so `0` renders as `0.0`
        let _ = write!(out, "{:?}", sample as f32);
    }
    out.push_str(close);
    out
}

/// Render and write a chirp table.
pub fn write_chirp_artifact<P: AsRef<Path>>(
    path: P,
    signal: &[f64],
    format: ArtifactFormat,
) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_chirp_artifact(signal, format))?;
    tracing::info!(
        path = %path.display(),
        samples = signal.len(),
        ?format,
        "wrote chirp table"
    );
    Ok(())
}
