//! Common numeric validation helpers.

use std::fmt;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that a value is finite.
///
/// # Example
/// ```
/// use svgwave_spec::validation::common::validate_finite;
///
/// assert!(validate_finite("x_origin", 12.5).is_ok());
/// assert!(validate_finite("x_origin", f64::NAN).is_err());
/// ```
pub fn validate_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is positive (> 0).
///
/// # Example
/// ```
/// use svgwave_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("width", 1.0).is_ok());
/// assert!(validate_positive("width", 0.0).is_err());
/// assert!(validate_positive("width", -1.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is finite and non-zero.
///
/// # Example
/// ```
/// use svgwave_spec::validation::common::validate_non_zero;
///
/// assert!(validate_non_zero("x_scale", -2.0).is_ok());
/// assert!(validate_non_zero("x_scale", 0.0).is_err());
/// ```
pub fn validate_non_zero(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value == 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be non-zero",
            name
        )));
    }
    Ok(())
}

/// Validate that an integer is within `[min, max]`.
///
/// # Example
/// ```
/// use svgwave_spec::validation::common::validate_count_range;
///
/// assert!(validate_count_range("sample_rate", 256, 2, 65536).is_ok());
/// assert!(validate_count_range("sample_rate", 1, 2, 65536).is_err());
/// ```
pub fn validate_count_range(
    name: &str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<(), CommonValidationError> {
    if value < min || value > max {
        return Err(CommonValidationError::new(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}
