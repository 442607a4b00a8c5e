//! Nearest-wins binning of dense points into wavetable indices.
//!
//! Every dense point competes for two buckets: the one at `floor(x)` (at
//! distance `x - floor(x)`) and the one above it (at distance
//! `1 - (x - floor(x))`). A bucket only changes hands when a challenger is
//! strictly closer, so after the pass each bucket holds the point whose x is
//! nearest to its index no matter in which order the curve visited them.
//! Equal distances keep the earlier point.

use svgwave_spec::OutOfRangePolicy;

use crate::error::{WavetableError, WavetableResult};
use crate::sampler::DensePoint;

/// The best point found so far for one bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// x-coordinate of the winning point.
    pub x: f64,
    /// y-coordinate of the winning point.
    pub y: f64,
    /// Absolute offset between `x` and the bucket index.
    pub distance: f64,
}

/// A bucket is unfilled until some point lands within one unit of its index.
pub type Bucket = Option<Candidate>;

/// Accumulates dense points into a fixed number of buckets.
#[derive(Debug, Clone)]
pub struct IndexBinner {
    buckets: Vec<Bucket>,
    policy: OutOfRangePolicy,
    offered: usize,
    skipped: usize,
}

impl IndexBinner {
    /// Creates a binner with `sample_rate` empty buckets.
    pub fn new(sample_rate: usize, policy: OutOfRangePolicy) -> Self {
        Self {
            buckets: vec![None; sample_rate],
            policy,
            offered: 0,
            skipped: 0,
        }
    }

    /// Number of buckets.
    pub fn sample_rate(&self) -> usize {
        self.buckets.len()
    }

    /// Offers one dense point to its two neighbouring buckets.
    ///
    /// # Errors
    /// [`WavetableError::OutOfRangeIndex`] if `x` is not in `[0, sample_rate)`
    /// and the policy is [`OutOfRangePolicy::Abort`]. With
    /// [`OutOfRangePolicy::Skip`] the point is counted and dropped.
    pub fn offer(&mut self, point: DensePoint) -> WavetableResult<()> {
        let sample = self.offered;
        self.offered += 1;

        let n = self.buckets.len();
        let in_range = point.x.is_finite() && point.x >= 0.0 && point.x < n as f64;
        if !in_range {
            return match self.policy {
                OutOfRangePolicy::Abort => Err(WavetableError::OutOfRangeIndex {
                    sample,
                    x: point.x,
                    sample_rate: n,
                }),
                OutOfRangePolicy::Skip => {
                    self.skipped += 1;
                    Ok(())
                }
            };
        }

        let index = point.x.floor() as usize;
        let dist_current = point.x - index as f64;
        let dist_next = 1.0 - dist_current;

        self.challenge(index, point, dist_current);
        if index + 1 < n {
            self.challenge(index + 1, point, dist_next);
        }
        Ok(())
    }

    fn challenge(&mut self, index: usize, point: DensePoint, distance: f64) {
        let bucket = &mut self.buckets[index];
        let closer = match bucket {
            Some(current) => distance < current.distance,
            None => true,
        };
        if closer {
            *bucket = Some(Candidate {
                x: point.x,
                y: point.y,
                distance,
            });
        }
    }

    /// Offers every point of an iterator in order.
    pub fn offer_all<I>(&mut self, points: I) -> WavetableResult<()>
    where
        I: IntoIterator<Item = DensePoint>,
    {
        for point in points {
            self.offer(point)?;
        }
        Ok(())
    }

    /// Ends the pass and freezes the buckets.
    pub fn finish(self) -> BinnedTable {
        BinnedTable {
            buckets: self.buckets,
            offered: self.offered,
            skipped: self.skipped,
        }
    }
}

/// The read-only result of one binning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedTable {
    buckets: Vec<Bucket>,
    offered: usize,
    skipped: usize,
}

impl BinnedTable {
    /// All buckets in index order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of points offered during the pass.
    pub fn offered(&self) -> usize {
        self.offered
    }

    /// Number of out-of-range points dropped under the skip policy.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of buckets that received a point.
    pub fn filled(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_some()).count()
    }

    /// Index of the first bucket that received no point.
    pub fn first_unfilled(&self) -> Option<usize> {
        self.buckets.iter().position(|b| b.is_none())
    }

    /// Largest winning distance over the filled buckets.
    pub fn max_distance(&self) -> Option<f64> {
        self.buckets
            .iter()
            .flatten()
            .map(|c| c.distance)
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))))
    }

    /// Returns the winning y-values in index order.
    ///
    /// # Errors
    /// * [`WavetableError::EmptyCurve`] if no point was offered at all
    /// * [`WavetableError::UnfilledBucket`] for the first bucket without a point
    pub fn y_values(&self) -> WavetableResult<Vec<f64>> {
        if self.offered == self.skipped {
            return Err(WavetableError::EmptyCurve);
        }
        self.buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| {
                bucket.map(|c| c.y).ok_or(WavetableError::UnfilledBucket {
                    index,
                    sample_rate: self.buckets.len(),
                })
            })
            .collect()
    }
}

/// Bins a sequence of points in one pass.
pub fn bin_points<I>(
    sample_rate: usize,
    policy: OutOfRangePolicy,
    points: I,
) -> WavetableResult<BinnedTable>
where
    I: IntoIterator<Item = DensePoint>,
{
    let mut binner = IndexBinner::new(sample_rate, policy);
    binner.offer_all(points)?;
    Ok(binner.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(x: f64, y: f64) -> DensePoint {
        DensePoint::new(x, y)
    }

    fn binner(n: usize) -> IndexBinner {
        IndexBinner::new(n, OutOfRangePolicy::Abort)
    }

    #[test]
    fn test_point_fills_own_and_next_bucket() {
        let mut b = binner(4);
        b.offer(p(1.25, 7.0)).unwrap();
        let table = b.finish();

        assert_eq!(table.buckets()[0], None);
        assert_eq!(
            table.buckets()[1],
            Some(Candidate { x: 1.25, y: 7.0, distance: 0.25 })
        );
        assert_eq!(
            table.buckets()[2],
            Some(Candidate { x: 1.25, y: 7.0, distance: 0.75 })
        );
        assert_eq!(table.buckets()[3], None);
        assert_eq!(table.filled(), 2);
        assert_eq!(table.first_unfilled(), Some(0));
    }

    #[test]
    fn test_nearest_wins_regardless_of_order() {
        for order in [[0.4, 0.1], [0.1, 0.4]] {
            let mut b = binner(4);
            for (i, offset) in order.iter().enumerate() {
                b.offer(p(2.0 + offset, i as f64)).unwrap();
            }
            let table = b.finish();
            let winner = table.buckets()[2].unwrap();
            assert_eq!(winner.x, 2.0 + 0.1);
            assert!((winner.distance - 0.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_spill_updates_next_bucket_even_when_own_bucket_is_taken() {
        let mut b = binner(4);
        b.offer(p(1.0, 1.0)).unwrap(); // bucket 1 at distance 0
        b.offer(p(1.9, 2.0)).unwrap(); // loses bucket 1, wins bucket 2 at 0.1
        let table = b.finish();

        assert_eq!(table.buckets()[1].unwrap().y, 1.0);
        let spilled = table.buckets()[2].unwrap();
        assert_eq!(spilled.y, 2.0);
        assert!((spilled.distance - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_the_earlier_point() {
        let mut b = binner(4);
        b.offer(p(1.5, 10.0)).unwrap();
        b.offer(p(1.5, 20.0)).unwrap();
        let table = b.finish();
        assert_eq!(table.buckets()[1].unwrap().y, 10.0);
        assert_eq!(table.buckets()[2].unwrap().y, 10.0);
    }

    #[test]
    fn test_last_bucket_does_not_spill() {
        let mut b = binner(2);
        b.offer(p(1.5, 3.0)).unwrap();
        let table = b.finish();
        assert_eq!(table.len(), 2);
        assert_eq!(table.buckets()[1].unwrap().distance, 0.5);
    }

    #[test]
    fn test_out_of_range_aborts_by_default() {
        let mut b = binner(4);
        b.offer(p(0.5, 0.0)).unwrap();
        let err = b.offer(p(4.0, 0.0)).unwrap_err();
        match err {
            WavetableError::OutOfRangeIndex { sample, x, sample_rate } => {
                assert_eq!(sample, 1);
                assert_eq!(x, 4.0);
                assert_eq!(sample_rate, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_and_non_finite_x_are_out_of_range() {
        let mut b = binner(4);
        assert!(b.offer(p(-0.5, 0.0)).is_err());
        assert!(b.offer(p(f64::NAN, 0.0)).is_err());
        assert!(b.offer(p(f64::INFINITY, 0.0)).is_err());
    }

    #[test]
    fn test_skip_policy_counts_dropped_points() {
        let table = bin_points(
            2,
            OutOfRangePolicy::Skip,
            vec![p(-1.0, 0.0), p(0.0, 1.0), p(1.0, 2.0), p(2.0, 3.0)],
        )
        .unwrap();

        assert_eq!(table.offered(), 4);
        assert_eq!(table.skipped(), 2);
        assert_eq!(table.y_values().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_unfilled_bucket_is_reported() {
        let table = bin_points(4, OutOfRangePolicy::Abort, vec![p(0.0, 1.0), p(1.0, 2.0)]).unwrap();
        // 1.0 spills into bucket 2 but nothing reaches bucket 3.
        match table.y_values().unwrap_err() {
            WavetableError::UnfilledBucket { index, sample_rate } => {
                assert_eq!(index, 3);
                assert_eq!(sample_rate, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_points_is_empty_curve() {
        let table = bin_points(4, OutOfRangePolicy::Abort, Vec::new()).unwrap();
        assert!(matches!(table.y_values(), Err(WavetableError::EmptyCurve)));

        let all_skipped =
            bin_points(4, OutOfRangePolicy::Skip, vec![p(9.0, 0.0)]).unwrap();
        assert!(matches!(all_skipped.y_values(), Err(WavetableError::EmptyCurve)));
    }

    #[test]
    fn test_max_distance() {
        let table =
            bin_points(3, OutOfRangePolicy::Abort, vec![p(0.0, 0.0), p(1.25, 0.0)]).unwrap();
        // bucket 0: 0.0, bucket 1: 0.25, bucket 2: 0.75
        assert_eq!(table.max_distance(), Some(0.75));
        assert_eq!(bin_points(3, OutOfRangePolicy::Abort, Vec::new()).unwrap().max_distance(), None);
    }
}
