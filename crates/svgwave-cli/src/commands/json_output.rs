//! JSON output types for machine-readable CLI output.
//!
//! This module provides structured output types for the `--json` flag on
//! `convert`, `validate`, and `inspect`. Every command prints exactly one
//! JSON object so other tools can parse the result programmatically.

use serde::{Deserialize, Serialize};
use svgwave_backend_wavetable::{CurveInspection, WavetableError};
use svgwave_spec::BackendError;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: CLI_XXX for CLI-level errors; validation (`E0xx`) and conversion
/// (`WAVE_0xx`) codes are passed through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// No curve of the document could be converted
    pub const NO_CURVE_CONVERTED: &str = "CLI_004";
    /// Records or WAV files could not be written
    pub const OUTPUT_WRITE: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E003", "WAVE_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
    /// Validation result details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidateResult>,
    /// Canonical document hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_hash: Option<String>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// Validation result details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResult {
    /// Source format (json/path_list)
    pub source_kind: String,
    /// Number of curves in the document
    pub curve_count: usize,
    /// Effective sample rate
    pub sample_rate: u32,
    /// Effective oversample count
    pub oversample: u32,
}

impl ValidateOutput {
    /// Creates a successful validate output.
    pub fn success(
        result: ValidateResult,
        document_hash: String,
        source_hash: String,
        warnings: Vec<JsonWarning>,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
            document_hash: Some(document_hash),
            source_hash: Some(source_hash),
        }
    }

    /// Creates a failed validate output.
    pub fn failure(
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
        document_hash: Option<String>,
        source_hash: Option<String>,
    ) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
            document_hash,
            source_hash,
        }
    }
}

/// Per-curve conversion report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveReport {
    /// Position of the curve in the document
    pub position: usize,
    /// Curve id (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether the curve converted
    pub success: bool,
    /// Number of samples produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,
    /// Smallest bucket y-value before normalization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    /// Largest bucket y-value before normalization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
    /// Dense points dropped as out of range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<usize>,
    /// Error (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// An exported WAV file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WavFile {
    /// Position of the source curve
    pub position: usize,
    /// Output path
    pub path: String,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
    /// Number of samples written
    pub num_samples: usize,
}

/// JSON output for the `convert` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutput {
    /// Whether at least one curve converted and all output was written
    pub success: bool,
    /// Document-level errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
    /// One report per curve, in document order
    pub curves: Vec<CurveReport>,
    /// Record file written (if `-o` was given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Records (when no output file was given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<String>>,
    /// Exported WAV files
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wav_files: Vec<WavFile>,
    /// Canonical document hash (after flag overrides)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_hash: Option<String>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

impl ConvertOutput {
    /// Creates an output that failed before any curve was processed.
    pub fn failure(
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
        document_hash: Option<String>,
        source_hash: Option<String>,
    ) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            curves: Vec::new(),
            output: None,
            records: None,
            wav_files: Vec::new(),
            document_hash,
            source_hash,
        }
    }
}

/// Per-curve inspection report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectReport {
    /// Position of the curve in the document
    pub position: usize,
    /// Curve id (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Sampling and coverage statistics (if the curve could be sampled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<InspectStats>,
    /// Error (if the curve could not be sampled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// Sampling and coverage statistics for one curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectStats {
    /// Dense points evaluated
    pub points: usize,
    /// `[min, max]` of transformed x
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_extent: Option<[f64; 2]>,
    /// `[min, max]` of transformed y
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_extent: Option<[f64; 2]>,
    /// Points outside `[0, sample_rate)`
    pub out_of_range: usize,
    /// Filled buckets
    pub filled: usize,
    /// Number of buckets
    pub sample_rate: usize,
    /// First bucket without a point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_unfilled: Option<usize>,
    /// Largest winning distance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    /// `[min, max]` of the winning y-values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_y_range: Option<[f64; 2]>,
}

impl From<&CurveInspection> for InspectStats {
    fn from(inspection: &CurveInspection) -> Self {
        let pair = |range: Option<(f64, f64)>| range.map(|(lo, hi)| [lo, hi]);
        Self {
            points: inspection.points,
            x_extent: pair(inspection.x_extent),
            y_extent: pair(inspection.y_extent),
            out_of_range: inspection.out_of_range,
            filled: inspection.filled,
            sample_rate: inspection.sample_rate,
            first_unfilled: inspection.first_unfilled,
            max_distance: inspection.max_distance,
            bucket_y_range: pair(inspection.bucket_y_range),
        }
    }
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Whether at least one curve could be inspected
    pub success: bool,
    /// Document-level errors
    pub errors: Vec<JsonError>,
    /// One report per curve, in document order
    pub curves: Vec<InspectReport>,
}

/// Converts an InputError to a JsonError.
pub fn input_error_to_json(err: &crate::input::InputError, file: Option<&str>) -> JsonError {
    use crate::input::InputError;

    let code = match err {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
        InputError::JsonParse { .. } => error_codes::JSON_PARSE,
    };

    let mut error = JsonError::new(code, err.to_string());
    if let Some(f) = file {
        error = error.with_file(f);
    }
    error
}

/// Converts a ValidationError to a JsonError.
pub fn validation_error_to_json(err: &svgwave_spec::ValidationError) -> JsonError {
    let mut json_err = JsonError::new(err.code.to_string(), &err.message);
    if let Some(ref path) = err.path {
        json_err = json_err.with_path(path);
    }
    json_err
}

/// Converts a ValidationWarning to a JsonWarning.
pub fn validation_warning_to_json(warn: &svgwave_spec::ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warn.code.to_string(),
        message: warn.message.clone(),
        path: warn.path.clone(),
    }
}

/// Converts a conversion error for the curve at `position` to a JsonError.
pub fn wavetable_error_to_json(err: &WavetableError, position: usize) -> JsonError {
    JsonError::new(err.code(), err.to_string()).with_path(format!("curves[{}]", position))
}
