//! svgwave Wavetable Backend
//!
//! This crate turns 2-D curves (typically SVG path data) into single-cycle
//! wavetables of signed 16-bit samples.
//!
//! # Overview
//!
//! A conversion runs four stages in order:
//!
//! - **Dense sampling** - the curve is evaluated at `oversample` evenly spaced
//!   parameters and each point is mapped into wavetable space
//! - **Binning** - every index keeps the dense point whose x lies nearest to it
//! - **Normalization** - the winning y-values are stretched onto `[-32767, 32767]`
//! - **Formatting** - samples become `index<delimiter>value` records
//!
//! # Determinism
//!
//! Conversion has no hidden state. The same curve and parameters always give the
//! same samples, and each curve of a document starts from fresh buckets.
//!
//! # Example
//!
//! ```ignore
//! use svgwave_backend_wavetable::{generate_document, GenerateOptions};
//! use svgwave_spec::CurveDocument;
//!
//! let doc = CurveDocument::from_json(json_string)?;
//! let result = generate_document(&doc, &GenerateOptions::default());
//!
//! let mut out = std::io::stdout();
//! result.write_records(&mut out)?;
//! for failure in result.failures() {
//!     eprintln!("{failure}");
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`generate_curve()`] / [`generate_document()`] - Main entry points
//! - [`curve`] - Curve sources and SVG path evaluation
//! - [`sampler`] - Dense sampling and coordinate transform
//! - [`binner`] - Nearest-wins index binning
//! - [`normalize`] - Amplitude normalization
//! - [`format`] - Record output
//! - [`wav`] - Deterministic WAV export

pub mod binner;
pub mod curve;
pub mod error;
pub mod format;
pub mod generate;
pub mod normalize;
pub mod sampler;
pub mod wav;

// Re-export main types at crate root
pub use binner::{bin_points, BinnedTable, Candidate, IndexBinner};
pub use curve::{CurveSource, PathCurve};
pub use error::{WavetableError, WavetableResult};
pub use format::RecordFormatter;
pub use generate::{
    curve_transform, generate_curve, generate_document, inspect_curve, CurveFailure,
    CurveInspection, CurveOutcome, DocumentResult, GenerateOptions, Wavetable,
};
pub use normalize::{normalize, MAX_AMPLITUDE};
pub use sampler::{DensePoint, DenseSampler};
pub use wav::{WavResult, DEFAULT_WAV_RATE};
