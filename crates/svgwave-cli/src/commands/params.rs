//! Command-line parameter overrides.
//!
//! Every flag is optional. A flag that is present replaces the matching
//! document parameter; an absent flag leaves the document value (or its
//! default) untouched.

use clap::Args;
use svgwave_backend_wavetable::GenerateOptions;
use svgwave_spec::{
    validate_document, validate_fit_targets, CurveDocument, Delimiter, OutOfRangePolicy,
    ValidationResult, WavetableParams,
};

/// Conversion parameters shared by `convert` and `inspect`.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Number of wavetable samples (default: 256)
    #[arg(short = 'n', long = "sample-rate")]
    pub sample_rate: Option<u32>,

    /// Dense evaluations of each curve (default: 10000)
    #[arg(long)]
    pub oversample: Option<u32>,

    /// Record delimiter; `t` means tab and `n` means newline (default: ";")
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Horizontal translation after scaling
    #[arg(long = "xorigin", visible_alias = "xo", allow_hyphen_values = true)]
    pub x_origin: Option<f64>,

    /// Vertical translation after flipping
    #[arg(long = "yorigin", visible_alias = "yo", allow_hyphen_values = true)]
    pub y_origin: Option<f64>,

    /// Horizontal scale factor
    #[arg(long = "xscale", allow_hyphen_values = true)]
    pub x_scale: Option<f64>,

    /// Vertical scale factor
    #[arg(long = "yscale", allow_hyphen_values = true)]
    pub y_scale: Option<f64>,

    /// Height of the vertical flip (default: the sample rate)
    #[arg(long, allow_hyphen_values = true)]
    pub span: Option<f64>,

    /// Drop points that fall outside the wavetable instead of failing
    #[arg(long)]
    pub skip_out_of_range: bool,

    /// Fit each curve's frame onto deltax by deltay
    #[arg(long)]
    pub fit_frame: bool,

    /// Target width of a fitted frame (default: the sample rate)
    #[arg(long = "deltax")]
    pub delta_x: Option<f64>,

    /// Target height of a fitted frame (default: the sample rate)
    #[arg(long = "deltay")]
    pub delta_y: Option<f64>,
}

impl ParamArgs {
    /// Applies the flags that were given on top of `params`.
    pub fn apply(&self, params: &mut WavetableParams) {
        if let Some(sample_rate) = self.sample_rate {
            params.sample_rate = sample_rate;
        }
        if let Some(oversample) = self.oversample {
            params.oversample = oversample;
        }
        if let Some(ref delimiter) = self.delimiter {
            params.delimiter = Delimiter::parse(delimiter);
        }
        if let Some(x_origin) = self.x_origin {
            params.x_origin = x_origin;
        }
        if let Some(y_origin) = self.y_origin {
            params.y_origin = y_origin;
        }
        if let Some(x_scale) = self.x_scale {
            params.x_scale = x_scale;
        }
        if let Some(y_scale) = self.y_scale {
            params.y_scale = y_scale;
        }
        if self.span.is_some() {
            params.span = self.span;
        }
        if self.skip_out_of_range {
            params.out_of_range = OutOfRangePolicy::Skip;
        }
    }

    /// Applies the overrides to `document`, then validates the document
    /// together with the frame-fitting targets.
    pub fn prepare(&self, mut document: CurveDocument) -> (CurveDocument, ValidationResult) {
        self.apply(&mut document.params);
        let mut validation = validate_document(&document);
        for error in validate_fit_targets(self.delta_x, self.delta_y).errors {
            validation.add_error(error);
        }
        (document, validation)
    }

    /// Document-wide conversion options.
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            fit_frame: self.fit_frame,
            delta_x: self.delta_x,
            delta_y: self.delta_y,
        }
    }
}
