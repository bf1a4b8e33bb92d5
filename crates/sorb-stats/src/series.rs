//! Integer time series keyed by attempt count.

/// Ordered `(attempts, value)` samples for one metric.
///
/// Timestamps are non-decreasing. A fresh series holds the single
/// baseline point `(0, 0)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSeries {
    points: Vec<(u64, u64)>,
}

impl TimeSeries {
    /// A series holding only the baseline point.
    pub fn baseline() -> Self {
        Self {
            points: vec![(0, 0)],
        }
    }

    /// Build from raw points. Used when restoring checkpoints.
    pub fn from_points(points: Vec<(u64, u64)>) -> Self {
        Self { points }
    }

    /// Append a sample.
    pub fn push(&mut self, attempts: u64, value: u64) {
        debug_assert!(
            self.points.last().is_none_or(|&(t, _)| t <= attempts),
            "timestamps must not decrease"
        );
        self.points.push((attempts, value));
    }

    /// All samples in order.
    pub fn points(&self) -> &[(u64, u64)] {
        &self.points
    }

    /// Number of samples, including the baseline.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no samples at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample timestamps in order.
    pub fn timestamps(&self) -> impl Iterator<Item = u64> + '_ {
        self.points.iter().map(|&(t, _)| t)
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<(u64, u64)> {
        self.points.last().copied()
    }

    /// Drop every sample and reinstate the baseline.
    pub fn reset(&mut self) {
        self.points.clear();
        self.points.push((0, 0));
    }

    /// Add `other`'s values elementwise. Caller has verified timestamps.
    pub(crate) fn accumulate(&mut self, other: &TimeSeries) {
        for (mine, theirs) in self.points.iter_mut().zip(&other.points) {
            mine.1 += theirs.1;
        }
    }
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self::baseline()
    }
}
