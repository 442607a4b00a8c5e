//! Dense curve sampling.

use svgwave_spec::Transform;

use crate::curve::CurveSource;

/// One curve evaluation, already mapped into wavetable coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensePoint {
    /// Horizontal position; the integer part selects a bucket.
    pub x: f64,
    /// Amplitude before normalization (y up).
    pub y: f64,
}

impl DensePoint {
    /// Creates a new dense point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Walks a curve's parameter domain at a fixed resolution.
///
/// The curve is evaluated at `t = i / oversample` for `i` in `0..oversample`,
/// so `t = 1` itself is never visited.
#[derive(Debug, Clone, Copy)]
pub struct DenseSampler {
    oversample: usize,
    transform: Transform,
}

impl DenseSampler {
    /// Creates a sampler.
    pub fn new(oversample: usize, transform: Transform) -> Self {
        Self {
            oversample,
            transform,
        }
    }

    /// Number of points each pass produces.
    pub fn oversample(&self) -> usize {
        self.oversample
    }

    /// Lazily evaluates the curve, yielding points in parameter order.
    pub fn points<'a, C>(&'a self, curve: &'a C) -> impl Iterator<Item = DensePoint> + 'a
    where
        C: CurveSource + ?Sized,
    {
        let m = self.oversample as f64;
        (0..self.oversample).map(move |i| {
            let p = curve.evaluate(i as f64 / m);
            let (x, y) = self.transform.apply(p.x, p.y);
            DensePoint { x, y }
        })
    }

    /// Evaluates the whole curve into a vector.
    pub fn sample<C>(&self, curve: &C) -> Vec<DensePoint>
    where
        C: CurveSource + ?Sized,
    {
        self.points(curve).collect()
    }
}
