//! Wavetable parameters and the source-to-wavetable coordinate transform.

use serde::{Deserialize, Serialize};

use crate::document::Frame;

/// Default number of output samples per wavetable.
pub const DEFAULT_SAMPLE_RATE: u32 = 256;

/// Default number of dense curve evaluations per wavetable.
pub const DEFAULT_OVERSAMPLE: u32 = 10_000;

/// Default record delimiter.
pub const DEFAULT_DELIMITER: &str = ";";

/// Separator placed between the index and the value of each output record.
///
/// Shells make it awkward to pass tab and newline characters, so the single
/// letters `t` and `n` stand for `\t` and `\n`. Any other string is used
/// literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Delimiter(String);

impl Delimiter {
    /// Resolves a delimiter argument, expanding the `t` and `n` aliases.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "t" => Self("\t".to_string()),
            "n" => Self("\n".to_string()),
            other => Self(other.to_string()),
        }
    }

    /// Returns the resolved separator.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self(DEFAULT_DELIMITER.to_string())
    }
}

impl From<String> for Delimiter {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Delimiter> for String {
    fn from(delimiter: Delimiter) -> Self {
        delimiter.0
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do with a dense point whose x falls outside `[0, sample_rate)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Fail the curve on the first out-of-range point.
    #[default]
    Abort,
    /// Drop out-of-range points and count them.
    Skip,
}

impl OutOfRangePolicy {
    /// Returns the policy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutOfRangePolicy::Abort => "abort",
            OutOfRangePolicy::Skip => "skip",
        }
    }
}

/// Parameters controlling how each curve becomes a wavetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavetableParams {
    /// Number of output samples (buckets) per wavetable.
    pub sample_rate: u32,
    /// Number of dense curve evaluations per wavetable.
    pub oversample: u32,
    /// Separator between index and value in output records.
    pub delimiter: Delimiter,
    /// Horizontal translation applied after scaling.
    pub x_origin: f64,
    /// Vertical translation applied after flipping.
    pub y_origin: f64,
    /// Horizontal scale factor.
    pub x_scale: f64,
    /// Vertical scale factor.
    pub y_scale: f64,
    /// Height of the vertical flip. Defaults to `sample_rate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<f64>,
    /// Source-space x subtracted before scaling.
    pub source_x: f64,
    /// Source-space y subtracted before scaling.
    pub source_y: f64,
    /// Handling of dense points outside the bucket range.
    pub out_of_range: OutOfRangePolicy,
}

impl Default for WavetableParams {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            oversample: DEFAULT_OVERSAMPLE,
            delimiter: Delimiter::default(),
            x_origin: 0.0,
            y_origin: 0.0,
            x_scale: 1.0,
            y_scale: 1.0,
            span: None,
            source_x: 0.0,
            source_y: 0.0,
            out_of_range: OutOfRangePolicy::Abort,
        }
    }
}

impl WavetableParams {
    /// Returns the vertical flip height, falling back to the sample rate.
    pub fn effective_span(&self) -> f64 {
        self.span.unwrap_or(self.sample_rate as f64)
    }

    /// Returns the coordinate transform described by these parameters.
    pub fn transform(&self) -> Transform {
        Transform {
            source_x: self.source_x,
            source_y: self.source_y,
            x_scale: self.x_scale,
            y_scale: self.y_scale,
            x_origin: self.x_origin,
            y_origin: self.y_origin,
            span: self.effective_span(),
        }
    }

    /// Returns the transform that maps `frame` onto `delta_x` by `delta_y`.
    ///
    /// Both deltas default to the sample rate. Origins and span are kept.
    pub fn fitted_transform(
        &self,
        frame: &Frame,
        delta_x: Option<f64>,
        delta_y: Option<f64>,
    ) -> Transform {
        let delta_x = delta_x.unwrap_or(self.sample_rate as f64);
        let delta_y = delta_y.unwrap_or(self.sample_rate as f64);

        Transform {
            source_x: frame.x,
            source_y: frame.y,
            x_scale: delta_x / frame.width,
            y_scale: delta_y / frame.height,
            ..self.transform()
        }
    }
}

/// Maps source coordinates (y down) to wavetable coordinates (y up).
///
/// ```text
/// x = (cx - source_x) * x_scale + x_origin
/// y = span - (cy - source_y) * y_scale + y_origin
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Source-space x subtracted before scaling.
    pub source_x: f64,
    /// Source-space y subtracted before scaling.
    pub source_y: f64,
    /// Horizontal scale factor.
    pub x_scale: f64,
    /// Vertical scale factor.
    pub y_scale: f64,
    /// Horizontal translation.
    pub x_origin: f64,
    /// Vertical translation.
    pub y_origin: f64,
    /// Height of the vertical flip.
    pub span: f64,
}

impl Transform {
    /// Applies the transform to a source point.
    pub fn apply(&self, cx: f64, cy: f64) -> (f64, f64) {
        let x = (cx - self.source_x) * self.x_scale + self.x_origin;
        let y = self.span - (cy - self.source_y) * self.y_scale + self.y_origin;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delimiter_aliases() {
        assert_eq!(Delimiter::parse("t").as_str(), "\t");
        assert_eq!(Delimiter::parse("n").as_str(), "\n");
        assert_eq!(Delimiter::parse(",").as_str(), ",");
        assert_eq!(Delimiter::parse("tab").as_str(), "tab");
        assert_eq!(Delimiter::default().as_str(), ";");
    }

    #[test]
    fn test_delimiter_alias_in_json() {
        let params: WavetableParams = serde_json::from_str(r#"{ "delimiter": "t" }"#).unwrap();
        assert_eq!(params.delimiter.as_str(), "\t");
    }

    #[test]
    fn test_params_defaults_from_empty_json() {
        let params: WavetableParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, WavetableParams::default());
        assert_eq!(params.effective_span(), 256.0);
        assert_eq!(params.out_of_range, OutOfRangePolicy::Abort);
    }

    #[test]
    fn test_out_of_range_policy_serde() {
        let params: WavetableParams =
            serde_json::from_str(r#"{ "out_of_range": "skip" }"#).unwrap();
        assert_eq!(params.out_of_range, OutOfRangePolicy::Skip);
        assert_eq!(params.out_of_range.as_str(), "skip");
    }

    #[test]
    fn test_identity_transform_flips_y() {
        let transform = WavetableParams::default().transform();
        assert_eq!(transform.apply(10.0, 0.0), (10.0, 256.0));
        assert_eq!(transform.apply(10.0, 256.0), (10.0, 0.0));
    }

    #[test]
    fn test_transform_translates_and_scales() {
        let params = WavetableParams {
            x_origin: 5.0,
            y_origin: -1.0,
            x_scale: 2.0,
            y_scale: 0.5,
            span: Some(100.0),
            source_x: 1.0,
            source_y: 10.0,
            ..WavetableParams::default()
        };
        let (x, y) = params.transform().apply(3.0, 30.0);
        assert_eq!(x, (3.0 - 1.0) * 2.0 + 5.0);
        assert_eq!(y, 100.0 - (30.0 - 10.0) * 0.5 - 1.0);
    }

    #[test]
    fn test_fitted_transform_stretches_frame() {
        let params = WavetableParams::default();
        let frame = Frame::new(10.0, 20.0, 512.0, 128.0);
        let transform = params.fitted_transform(&frame, None, None);

        assert_eq!(transform.x_scale, 0.5);
        assert_eq!(transform.y_scale, 2.0);
        assert_eq!(transform.apply(10.0, 20.0), (0.0, 256.0));
        assert_eq!(transform.apply(522.0, 148.0), (256.0, 0.0));
    }
}
