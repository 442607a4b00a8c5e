//! Curve-to-wavetable conversion.
//!
//! One conversion is a single synchronous pass: sample the curve densely,
//! bin the points into indices, normalize the winners, and hand the result
//! to a [`RecordFormatter`]. Any failure aborts that curve only; the other
//! curves of a document are converted independently.

use std::io::Write;

use svgwave_spec::{
    BackendError, CurveDocument, CurveEntry, OutOfRangePolicy, Transform, WavetableParams,
};

use crate::binner::bin_points;
use crate::curve::{CurveSource, PathCurve};
use crate::error::{WavetableError, WavetableResult};
use crate::format::RecordFormatter;
use crate::normalize::{normalize, value_range};
use crate::sampler::DenseSampler;

/// A finished wavetable.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    /// Normalized samples in index order.
    pub samples: Vec<i16>,
    /// Smallest bucket y-value before normalization.
    pub y_min: f64,
    /// Largest bucket y-value before normalization.
    pub y_max: f64,
    /// Dense points dropped as out of range.
    pub skipped: usize,
}

impl Wavetable {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the wavetable has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Converts one curve into a wavetable.
///
/// # Errors
/// * [`WavetableError::InvalidParameter`] if `sample_rate` is below 2 or a
///   transform scale is zero or not finite
/// * [`WavetableError::OutOfRangeIndex`] under the abort policy
/// * [`WavetableError::EmptyCurve`] if no point was binned
/// * [`WavetableError::UnfilledBucket`] if some index received no point
/// * [`WavetableError::DegenerateRange`] if the curve is flat
pub fn generate_curve<C>(
    curve: &C,
    params: &WavetableParams,
    transform: &Transform,
) -> WavetableResult<Wavetable>
where
    C: CurveSource + ?Sized,
{
    check_inputs(params, transform)?;

    let sampler = DenseSampler::new(params.oversample as usize, *transform);
    let table = bin_points(
        params.sample_rate as usize,
        params.out_of_range,
        sampler.points(curve),
    )?;

    let ys = table.y_values()?;
    let samples = normalize(&ys)?;
    let (y_min, y_max) = value_range(&ys);

    Ok(Wavetable {
        samples,
        y_min,
        y_max,
        skipped: table.skipped(),
    })
}

fn check_inputs(params: &WavetableParams, transform: &Transform) -> WavetableResult<()> {
    if params.sample_rate < 2 {
        return Err(WavetableError::invalid_param(
            "sample_rate",
            format!("must be at least 2, got {}", params.sample_rate),
        ));
    }
    for (name, scale) in [("x_scale", transform.x_scale), ("y_scale", transform.y_scale)] {
        if !scale.is_finite() || scale == 0.0 {
            return Err(WavetableError::invalid_param(
                name,
                format!("must be finite and non-zero, got {}", scale),
            ));
        }
    }
    Ok(())
}

/// Diagnostics for one curve, gathered without failing on coverage gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveInspection {
    /// Dense points evaluated.
    pub points: usize,
    /// Smallest and largest transformed x over all dense points.
    pub x_extent: Option<(f64, f64)>,
    /// Smallest and largest transformed y over all dense points.
    pub y_extent: Option<(f64, f64)>,
    /// Dense points outside `[0, sample_rate)`.
    pub out_of_range: usize,
    /// Buckets that received a point.
    pub filled: usize,
    /// Number of buckets.
    pub sample_rate: usize,
    /// First bucket without a point.
    pub first_unfilled: Option<usize>,
    /// Largest winning distance.
    pub max_distance: Option<f64>,
    /// Smallest and largest y-value among the filled buckets.
    pub bucket_y_range: Option<(f64, f64)>,
}

impl CurveInspection {
    /// Returns true if every bucket received a point.
    pub fn is_fully_covered(&self) -> bool {
        self.first_unfilled.is_none()
    }
}

/// Samples and bins a curve, reporting coverage instead of failing on it.
///
/// Out-of-range points are always skipped here so the whole curve is seen.
pub fn inspect_curve<C>(
    curve: &C,
    params: &WavetableParams,
    transform: &Transform,
) -> WavetableResult<CurveInspection>
where
    C: CurveSource + ?Sized,
{
    check_inputs(params, transform)?;

    let sampler = DenseSampler::new(params.oversample as usize, *transform);
    let points = sampler.sample(curve);

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let extent = |values: &[f64]| (!values.is_empty()).then(|| value_range(values));

    let table = bin_points(params.sample_rate as usize, OutOfRangePolicy::Skip, points)?;
    let winners: Vec<f64> = table.buckets().iter().flatten().map(|c| c.y).collect();

    Ok(CurveInspection {
        points: table.offered(),
        x_extent: extent(xs.as_slice()),
        y_extent: extent(ys.as_slice()),
        out_of_range: table.skipped(),
        filled: table.filled(),
        sample_rate: table.len(),
        first_unfilled: table.first_unfilled(),
        max_distance: table.max_distance(),
        bucket_y_range: extent(winners.as_slice()),
    })
}

/// Options that apply across a whole document.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Fit each curve's frame (when it has one) onto `delta_x` by `delta_y`.
    pub fit_frame: bool,
    /// Target width of a fitted frame. Defaults to the sample rate.
    pub delta_x: Option<f64>,
    /// Target height of a fitted frame. Defaults to the sample rate.
    pub delta_y: Option<f64>,
}

/// Returns the transform used for one curve of a document.
pub fn curve_transform(
    entry: &CurveEntry,
    params: &WavetableParams,
    options: &GenerateOptions,
) -> Transform {
    match entry.frame {
        Some(ref frame) if options.fit_frame => {
            params.fitted_transform(frame, options.delta_x, options.delta_y)
        }
        _ => params.transform(),
    }
}

/// Outcome of converting one curve of a document.
#[derive(Debug)]
pub struct CurveOutcome {
    /// Position of the curve in the document.
    pub position: usize,
    /// The curve's id, if it has one.
    pub id: Option<String>,
    /// Report label from [`CurveEntry::label`].
    pub label: String,
    /// The wavetable, or why it could not be produced.
    pub result: WavetableResult<Wavetable>,
}

impl CurveOutcome {
    /// The failure, if the curve failed.
    pub fn failure(&self) -> Option<CurveFailure<'_>> {
        self.result.as_ref().err().map(|error| CurveFailure {
            position: self.position,
            label: &self.label,
            error,
        })
    }
}

/// A failed curve, identified for reporting.
#[derive(Debug)]
pub struct CurveFailure<'a> {
    /// Position of the curve in the document.
    pub position: usize,
    /// Id or `#<position>`.
    pub label: &'a str,
    /// The error that aborted the curve.
    pub error: &'a WavetableError,
}

impl std::fmt::Display for CurveFailure<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "curve {} ({}): [{}] {}",
            self.position,
            self.label,
            self.error.code(),
            self.error
        )
    }
}

/// Per-curve outcomes of a document, in document order.
#[derive(Debug)]
pub struct DocumentResult {
    /// One outcome per curve.
    pub outcomes: Vec<CurveOutcome>,
    formatter: RecordFormatter,
}

impl DocumentResult {
    /// Successful wavetables with their outcome.
    pub fn succeeded(&self) -> impl Iterator<Item = (&CurveOutcome, &Wavetable)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|w| (o, w)))
    }

    /// Failed curves.
    pub fn failures(&self) -> impl Iterator<Item = CurveFailure<'_>> {
        self.outcomes.iter().filter_map(CurveOutcome::failure)
    }

    /// Number of curves that converted.
    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    /// Returns true if at least one curve converted.
    pub fn any_succeeded(&self) -> bool {
        self.success_count() > 0
    }

    /// Records of every successful curve, block after block.
    pub fn records(&self) -> Vec<String> {
        self.succeeded()
            .flat_map(|(_, w)| self.formatter.records(&w.samples))
            .collect()
    }

    /// Writes every successful block to `writer`.
    pub fn write_records<W: Write>(&self, writer: &mut W) -> WavetableResult<()> {
        for (_, wavetable) in self.succeeded() {
            self.formatter.write_block(writer, &wavetable.samples)?;
        }
        Ok(())
    }
}

/// Converts every curve of a document.
///
/// Curves are processed in order, each with a fresh set of buckets.
pub fn generate_document(doc: &CurveDocument, options: &GenerateOptions) -> DocumentResult {
    let outcomes = doc
        .curves
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let transform = curve_transform(entry, &doc.params, options);
            let result = PathCurve::from_svg(&entry.d)
                .and_then(|curve| generate_curve(&curve, &doc.params, &transform));
            CurveOutcome {
                position,
                id: entry.id.clone(),
                label: entry.label(position),
                result,
            }
        })
        .collect();

    DocumentResult {
        outcomes,
        formatter: RecordFormatter::new(doc.params.delimiter.clone()),
    }
}
