//! svgwave Curve Document Library
//!
//! This crate provides the types, validation, and hashing for svgwave curve
//! documents. A curve document is a JSON file that lists one or more 2-D paths
//! (SVG path data) together with the parameters used to turn each path into a
//! single-cycle wavetable.
//!
//! # Example
//!
//! ```
//! use svgwave_spec::{CurveDocument, CurveEntry, WavetableParams};
//! use svgwave_spec::validation::validate_document;
//! use svgwave_spec::hash::canonical_document_hash;
//!
//! let doc = CurveDocument::builder()
//!     .params(WavetableParams::default())
//!     .curve(CurveEntry::new("M0 200 L128 56 L256 200").with_id("ramp"))
//!     .build();
//!
//! let result = validate_document(&doc);
//! assert!(result.is_ok());
//!
//! let hash = canonical_document_hash(&doc).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation, plus the `BackendError` trait
//! - [`document`]: Curve document and curve entry types
//! - [`params`]: Wavetable parameters, delimiters, and the coordinate transform
//! - [`validation`]: Document and parameter validation
//! - [`hash`]: Canonical document hashing

pub mod document;
pub mod error;
pub mod hash;
pub mod params;
pub mod validation;

// Re-export commonly used types at the crate root
pub use document::{CurveDocument, CurveDocumentBuilder, CurveEntry, Frame, DOCUMENT_VERSION};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::{canonical_document_hash, canonical_value_hash};
pub use params::{
    Delimiter, OutOfRangePolicy, Transform, WavetableParams, DEFAULT_OVERSAMPLE,
    DEFAULT_SAMPLE_RATE,
};
pub use validation::{
    is_valid_curve_id, validate_document, validate_fit_targets, validate_params,
};
