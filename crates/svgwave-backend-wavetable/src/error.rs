//! Error types for the wavetable backend.

use svgwave_spec::BackendError;
use thiserror::Error;

/// Result type for wavetable operations.
pub type WavetableResult<T> = Result<T, WavetableError>;

/// Errors that can occur while converting a curve into a wavetable.
#[derive(Debug, Error)]
pub enum WavetableError {
    /// A dense point mapped to a bucket outside `[0, sample_rate)`.
    #[error(
        "dense sample {sample} has x = {x}, outside [0, {sample_rate}) \
         (adjust origin/scale or skip out-of-range points)"
    )]
    OutOfRangeIndex {
        /// Position of the dense point in sampling order.
        sample: usize,
        /// Transformed x-coordinate of the point.
        x: f64,
        /// Number of buckets.
        sample_rate: usize,
    },

    /// Every bucket holds the same y-value, so there is nothing to normalize.
    #[error("curve is flat: every sample has y = {value}")]
    DegenerateRange {
        /// The single y-value shared by all buckets.
        value: f64,
    },

    /// The curve produced no samples at all.
    #[error("curve produced no samples")]
    EmptyCurve,

    /// No dense point landed within one unit of a bucket's index.
    #[error("index {index} of {sample_rate} received no point (curve does not cover it)")]
    UnfilledBucket {
        /// The uncovered bucket index.
        index: usize,
        /// Number of buckets.
        sample_rate: usize,
    },

    /// A bucket holds a NaN or infinite y-value.
    #[error("sample {index} is not finite")]
    NonFiniteSample {
        /// The bucket index.
        index: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Path data could not be turned into a curve.
    #[error("invalid path data: {message}")]
    InvalidPath {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavetableError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid path error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }
}

impl BackendError for WavetableError {
    fn code(&self) -> &'static str {
        match self {
            WavetableError::OutOfRangeIndex { .. } => "WAVE_001",
            WavetableError::DegenerateRange { .. } => "WAVE_002",
            WavetableError::EmptyCurve => "WAVE_003",
            WavetableError::UnfilledBucket { .. } => "WAVE_004",
            WavetableError::NonFiniteSample { .. } => "WAVE_005",
            WavetableError::InvalidParameter { .. } => "WAVE_006",
            WavetableError::InvalidPath { .. } => "WAVE_007",
            WavetableError::Io(_) => "WAVE_008",
        }
    }

    fn category(&self) -> &'static str {
        "wavetable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = WavetableError::invalid_param("sample_rate", "must be at least 2");
        assert!(err.to_string().contains("sample_rate"));
        assert!(err.to_string().contains("at least 2"));
        assert_eq!(err.code(), "WAVE_006");
    }

    #[test]
    fn test_out_of_range_message_names_the_point() {
        let err = WavetableError::OutOfRangeIndex {
            sample: 9999,
            x: 256.5,
            sample_rate: 256,
        };
        let msg = err.to_string();
        assert!(msg.contains("9999"));
        assert!(msg.contains("256.5"));
        assert_eq!(err.code(), "WAVE_001");
        assert_eq!(err.category(), "wavetable");
    }

    #[test]
    fn test_degenerate_range_message() {
        let err = WavetableError::DegenerateRange { value: 5.0 };
        assert_eq!(err.to_string(), "curve is flat: every sample has y = 5");
    }
}
