//! Amplitude normalization.

use crate::error::{WavetableError, WavetableResult};

/// Largest output amplitude. The range is symmetric, so `i16::MIN` is never produced.
pub const MAX_AMPLITUDE: i16 = 0x7fff;

/// Rescales values linearly so the minimum maps to `-MAX_AMPLITUDE` and the
/// maximum to `+MAX_AMPLITUDE`.
///
/// ```text
/// out = round(((y - min) / (max - min) * 2 - 1) * 32767)
/// ```
///
/// # Errors
/// * [`WavetableError::EmptyCurve`] if `values` is empty
/// * [`WavetableError::NonFiniteSample`] if any value is NaN or infinite
/// * [`WavetableError::DegenerateRange`] if every value is equal
pub fn normalize(values: &[f64]) -> WavetableResult<Vec<i16>> {
    if values.is_empty() {
        return Err(WavetableError::EmptyCurve);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(WavetableError::NonFiniteSample { index });
    }

    let (min, max) = value_range(values);
    if max == min {
        return Err(WavetableError::DegenerateRange { value: min });
    }

    // Finite extremes more than f64::MAX apart overflow the range; halving
    // both sides keeps every offset finite.
    let halve = !(max - min).is_finite();
    let (min, range) = if halve {
        (min / 2.0, max / 2.0 - min / 2.0)
    } else {
        (min, max - min)
    };

    let amplitude = MAX_AMPLITUDE as f64;
    Ok(values
        .iter()
        .map(|&y| {
            let y = if halve { y / 2.0 } else { y };
            let scaled = (((y - min) / range) * 2.0 - 1.0) * amplitude;
            scaled.round().clamp(-amplitude, amplitude) as i16
        })
        .collect())
}

/// Returns `(min, max)` of a non-empty slice of finite values.
pub fn value_range(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
