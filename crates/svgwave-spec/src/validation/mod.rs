//! Document validation logic.

pub mod common;


use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::document::{CurveDocument, CurveEntry, DOCUMENT_VERSION};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::params::WavetableParams;

pub use common::{
    validate_count_range, validate_finite, validate_non_zero, validate_positive,
    CommonValidationError,
};

/// Regex pattern for valid curve ids.
/// Format: starts with lowercase letter, followed by up to 63 lowercase letters, digits, underscores, or hyphens.
const CURVE_ID_PATTERN: &str = r"^[a-z][a-z0-9_-]{0,63}$";

/// Smallest usable wavetable length.
pub const MIN_SAMPLE_RATE: u32 = 2;

/// Largest supported wavetable length.
pub const MAX_SAMPLE_RATE: u32 = 65_536;

/// Upper bound on dense evaluations per curve.
pub const MAX_OVERSAMPLE: u32 = 10_000_000;

/// Below this many dense points per bucket, buckets are likely to stay unfilled.
const LOW_OVERSAMPLE_FACTOR: u32 = 4;

static CURVE_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn curve_id_regex() -> &'static Regex {
    CURVE_ID_REGEX.get_or_init(|| Regex::new(CURVE_ID_PATTERN).expect("invalid regex pattern"))
}

/// Validates a curve document.
///
/// # Returns
/// * `ValidationResult` with `ok=true` if validation passed, with any warnings.
/// * `ValidationResult` with `ok=false` and errors if validation failed.
///
/// # Example
/// ```
/// use svgwave_spec::{CurveDocument, CurveEntry};
/// use svgwave_spec::validation::validate_document;
///
/// let doc = CurveDocument::builder()
///     .curve(CurveEntry::new("M0 128 L256 128"))
///     .build();
///
/// assert!(validate_document(&doc).is_ok());
/// ```
pub fn validate_document(doc: &CurveDocument) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_version(doc, &mut result);
    check_params(&doc.params, &mut result);
    validate_curves(doc, &mut result);

    result
}

/// Validates wavetable parameters on their own.
pub fn validate_params(params: &WavetableParams) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_params(params, &mut result);
    result
}

/// Validates the target size used when fitting frames.
///
/// Each target becomes a scale numerator, so a present target must be
/// finite and non-zero. Errors use `E006` with paths `delta_x` / `delta_y`.
pub fn validate_fit_targets(delta_x: Option<f64>, delta_y: Option<f64>) -> ValidationResult {
    let mut result = ValidationResult::default();
    for (path, delta) in [("delta_x", delta_x), ("delta_y", delta_y)] {
        if let Some(value) = delta {
            if let Err(e) = validate_non_zero(path, value) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidParams,
                    e.message,
                    path,
                ));
            }
        }
    }
    result
}

/// Checks whether a curve id matches the allowed pattern.
pub fn is_valid_curve_id(id: &str) -> bool {
    curve_id_regex().is_match(id)
}

fn validate_version(doc: &CurveDocument, result: &mut ValidationResult) {
    if doc.version != DOCUMENT_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedVersion,
            format!(
                "version must be {}, got {}",
                DOCUMENT_VERSION, doc.version
            ),
            "version",
        ));
    }
}

fn check_params(params: &WavetableParams, result: &mut ValidationResult) {
    let mut checks = vec![
        (
            "params.sample_rate",
            validate_count_range(
                "sample_rate",
                params.sample_rate,
                MIN_SAMPLE_RATE,
                MAX_SAMPLE_RATE,
            ),
        ),
        (
            "params.oversample",
            validate_count_range(
                "oversample",
                params.oversample,
                params.sample_rate,
                MAX_OVERSAMPLE,
            ),
        ),
        ("params.x_origin", validate_finite("x_origin", params.x_origin)),
        ("params.y_origin", validate_finite("y_origin", params.y_origin)),
        ("params.x_scale", validate_non_zero("x_scale", params.x_scale)),
        ("params.y_scale", validate_non_zero("y_scale", params.y_scale)),
        ("params.source_x", validate_finite("source_x", params.source_x)),
        ("params.source_y", validate_finite("source_y", params.source_y)),
    ];
    if let Some(span) = params.span {
        checks.push(("params.span", validate_finite("span", span)));
    }

    for (path, check) in checks {
        if let Err(e) = check {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidParams,
                e.message,
                path,
            ));
        }
    }

    if params.delimiter.as_str().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidParams,
            "delimiter must not be empty",
            "params.delimiter",
        ));
    }

    if params.oversample >= params.sample_rate
        && params.oversample < params.sample_rate.saturating_mul(LOW_OVERSAMPLE_FACTOR)
    {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::LowOversample,
            format!(
                "oversample {} is less than {}x sample_rate {}; some indices may receive no point",
                params.oversample, LOW_OVERSAMPLE_FACTOR, params.sample_rate
            ),
            "params.oversample",
        ));
    }
}

fn validate_curves(doc: &CurveDocument, result: &mut ValidationResult) {
    if doc.curves.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoCurves,
            "document must declare at least one curve",
            "curves",
        ));
        return;
    }

    let mut seen_ids = HashSet::new();
    let multiple = doc.curves.len() > 1;

    for (i, curve) in doc.curves.iter().enumerate() {
        validate_curve(i, curve, multiple, &mut seen_ids, result);
    }
}

fn validate_curve<'a>(
    index: usize,
    curve: &'a CurveEntry,
    multiple: bool,
    seen_ids: &mut HashSet<&'a str>,
    result: &mut ValidationResult,
) {
    match curve.id.as_deref() {
        Some(id) => {
            if !is_valid_curve_id(id) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidCurveId,
                    format!("id must match pattern '{}', got '{}'", CURVE_ID_PATTERN, id),
                    format!("curves[{}].id", index),
                ));
            }
            if !seen_ids.insert(id) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::DuplicateCurveId,
                    format!("duplicate curve id: {}", id),
                    format!("curves[{}].id", index),
                ));
            }
        }
        None if multiple => {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::MissingCurveId,
                format!("curve {} has no id", index),
                format!("curves[{}]", index),
            ));
        }
        None => {}
    }

    let d = curve.d.trim();
    if d.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyPathData,
            "path data must not be empty",
            format!("curves[{}].d", index),
        ));
    } else {
        let subpaths = d.chars().filter(|c| matches!(c, 'M' | 'm')).count();
        if subpaths > 1 {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::MultipleSubpaths,
                format!(
                    "path data has {} subpaths; they are sampled as one continuous curve",
                    subpaths
                ),
                format!("curves[{}].d", index),
            ));
        }
    }

    if let Some(ref frame) = curve.frame {
        let checks = [
            ("x", validate_finite("frame.x", frame.x)),
            ("y", validate_finite("frame.y", frame.y)),
            ("width", validate_positive("frame.width", frame.width)),
            ("height", validate_positive("frame.height", frame.height)),
        ];
        for (field, check) in checks {
            if let Err(e) = check {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidFrame,
                    e.message,
                    format!("curves[{}].frame.{}", index, field),
                ));
            }
        }
    }
}
