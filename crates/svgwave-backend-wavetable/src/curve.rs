//! Curve sources.
//!
//! The pipeline only needs one capability from a curve: evaluate it at a
//! normalized parameter `t` in `[0, 1]` and get a 2-D point back. Anything
//! implementing [`CurveSource`] can be converted, including plain closures.

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point};

use crate::error::{WavetableError, WavetableResult};

/// Accuracy used when measuring segment arc lengths, in source units.
const ARCLEN_ACCURACY: f64 = 1e-4;

/// A continuous 2-D path over the parameter domain `[0, 1]`.
pub trait CurveSource {
    /// Evaluates the curve at `t`.
    fn evaluate(&self, t: f64) -> Point;
}

impl<F> CurveSource for F
where
    F: Fn(f64) -> Point,
{
    fn evaluate(&self, t: f64) -> Point {
        self(t)
    }
}

/// A segment together with the span of the global parameter it covers.
#[derive(Debug, Clone, Copy)]
struct WeightedSegment {
    seg: PathSeg,
    start: f64,
    end: f64,
}

/// A path built from SVG path data.
///
/// The global parameter is distributed over segments in proportion to their
/// arc length, so equal steps in `t` cover roughly equal distances along the
/// path regardless of how it was drawn.
#[derive(Debug, Clone)]
pub struct PathCurve {
    segments: Vec<WeightedSegment>,
    length: f64,
}

impl PathCurve {
    /// Parses path data (the SVG `d` attribute mini-language).
    ///
    /// # Errors
    /// * [`WavetableError::InvalidPath`] if the data does not parse
    /// * [`WavetableError::EmptyCurve`] if the path has no drawable segment
    pub fn from_svg(d: &str) -> WavetableResult<Self> {
        let path = BezPath::from_svg(d).map_err(|e| WavetableError::invalid_path(e.to_string()))?;
        Self::from_bez_path(&path)
    }

    /// Builds a curve from an existing path.
    pub fn from_bez_path(path: &BezPath) -> WavetableResult<Self> {
        let segs: Vec<PathSeg> = path.segments().collect();
        if segs.is_empty() {
            return Err(WavetableError::EmptyCurve);
        }

        let lengths: Vec<f64> = segs.iter().map(|s| s.arclen(ARCLEN_ACCURACY)).collect();
        let length: f64 = lengths.iter().sum();

        let mut segments = Vec::with_capacity(segs.len());
        let mut travelled = 0.0;
        for (seg, seg_len) in segs.into_iter().zip(lengths) {
            let (start, end) = if length > 0.0 {
                (travelled / length, (travelled + seg_len) / length)
            } else {
                (0.0, 0.0)
            };
            travelled += seg_len;
            segments.push(WeightedSegment { seg, start, end });
        }

        // Guard the last boundary against accumulated rounding.
        if let Some(last) = segments.last_mut() {
            if length > 0.0 {
                last.end = 1.0;
            }
        }

        Ok(Self { segments, length })
    }

    /// Total arc length of the path in source units.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of drawable segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl CurveSource for PathCurve {
    fn evaluate(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);

        // First segment whose span reaches t; zero-length segments are skipped
        // because their end never exceeds their start.
        let idx = self
            .segments
            .partition_point(|s| s.end < t)
            .min(self.segments.len() - 1);
        let ws = &self.segments[idx];

        let span = ws.end - ws.start;
        let local = if span > 0.0 {
            ((t - ws.start) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        ws.seg.eval(local)
    }
}
