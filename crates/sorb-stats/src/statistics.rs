//! Per-repetition statistics accumulator.

use std::num::NonZeroU64;

use indexmap::IndexMap;
use sorb_lattice::Lattice;

use crate::error::StatsError;
use crate::metric::Metric;
use crate::series::TimeSeries;

/// Counters and decimated time series for one repetition.
///
/// # Examples
///
/// ```
/// use smallvec::smallvec;
/// use sorb_core::Boundary;
/// use sorb_lattice::Lattice;
/// use sorb_stats::{Metric, Statistics};
///
/// let mut lattice = Lattice::line(5, Boundary::Open).unwrap();
/// let mut stats = Statistics::for_lattice(&lattice, true);
///
/// // Five sites: a sample every attempt with (10 * n) % 5 == 0.
/// let ok = lattice.particle_adsorb(&[smallvec![0]]);
/// stats.record(&lattice, ok);
///
/// let coverage = stats.series(Metric::Coverage).unwrap();
/// assert_eq!(coverage.points(), &[(0, 0), (1, 1)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statistics {
    site_count: NonZeroU64,
    attempts: u64,
    successful: u64,
    series: IndexMap<Metric, TimeSeries>,
}

impl Statistics {
    /// Fresh statistics for a lattice of `site_count` sites.
    ///
    /// Successful-attempt and coverage series are always kept; the three
    /// empty-run series only when `track_empty_runs` is set.
    pub fn new(site_count: NonZeroU64, track_empty_runs: bool) -> Self {
        let metrics: &[Metric] = if track_empty_runs {
            &[
                Metric::Successful,
                Metric::Coverage,
                Metric::EmptySingle,
                Metric::EmptyDouble,
                Metric::EmptyTriple,
            ]
        } else {
            &Metric::BASE
        };
        Self {
            site_count,
            attempts: 0,
            successful: 0,
            series: metrics
                .iter()
                .map(|&m| (m, TimeSeries::baseline()))
                .collect(),
        }
    }

    /// Fresh statistics sized for `lattice`.
    pub fn for_lattice(lattice: &Lattice, track_empty_runs: bool) -> Self {
        let sites = NonZeroU64::new(lattice.site_count() as u64).unwrap_or(NonZeroU64::MIN);
        Self::new(sites, track_empty_runs)
    }

    /// Rebuild statistics captured mid-repetition.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidState`] if the metric set is not one this type
    /// produces, a series is empty, the series disagree on timestamps, or
    /// a timestamp lies beyond `attempts`.
    pub fn restore(
        site_count: NonZeroU64,
        attempts: u64,
        successful: u64,
        series: IndexMap<Metric, TimeSeries>,
    ) -> Result<Self, StatsError> {
        let metrics: Vec<Metric> = series.keys().copied().collect();
        let base_only = metrics.as_slice() == Metric::BASE.as_slice();
        let with_runs = metrics.len() == 5
            && metrics[..2] == Metric::BASE
            && metrics[2..] == Metric::EMPTY_RUNS;
        if !base_only && !with_runs {
            return Err(StatsError::InvalidState {
                reason: format!("unsupported metric set {metrics:?}"),
            });
        }
        if successful > attempts {
            return Err(StatsError::InvalidState {
                reason: format!("{successful} successes exceed {attempts} attempts"),
            });
        }
        let mut first: Option<&TimeSeries> = None;
        for (&metric, s) in &series {
            if s.is_empty() {
                return Err(StatsError::InvalidState {
                    reason: format!("{metric} series is empty"),
                });
            }
            if s.last().is_some_and(|(t, _)| t > attempts) {
                return Err(StatsError::InvalidState {
                    reason: format!("{metric} series runs past attempt {attempts}"),
                });
            }
            match first {
                None => first = Some(s),
                Some(reference) => {
                    if !reference.timestamps().eq(s.timestamps()) {
                        return Err(StatsError::InvalidState {
                            reason: format!("{metric} timestamps differ from {}", metrics[0]),
                        });
                    }
                }
            }
        }
        Ok(Self {
            site_count,
            attempts,
            successful,
            series,
        })
    }

    /// Whether attempt number `attempts` is a sampling point.
    pub fn is_sample_point(&self, attempts: u64) -> bool {
        (u128::from(attempts) * 10) % u128::from(self.site_count.get()) == 0
    }

    /// Count one attempt and, at sampling points, sample `lattice`.
    ///
    /// `lattice` must already reflect the outcome of the attempt.
    pub fn record(&mut self, lattice: &Lattice, successful: bool) {
        self.attempts += 1;
        if successful {
            self.successful += 1;
        }
        if !self.is_sample_point(self.attempts) {
            return;
        }
        let attempts = self.attempts;
        let successes = self.successful;
        for (&metric, series) in self.series.iter_mut() {
            let value = match metric.run_length() {
                Some(k) => lattice.empty_runs(k) as u64,
                None if metric == Metric::Successful => successes,
                None => lattice.coverage() as u64,
            };
            series.push(attempts, value);
        }
    }

    /// Zero the counters and return every series to its baseline.
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.successful = 0;
        for series in self.series.values_mut() {
            series.reset();
        }
    }

    /// Number of sites on the lattice being sampled.
    pub fn site_count(&self) -> u64 {
        self.site_count.get()
    }

    /// Attempts recorded since the last reset.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Successful attempts recorded since the last reset.
    pub fn successful(&self) -> u64 {
        self.successful
    }

    /// Whether empty-run series are kept.
    pub fn tracks_empty_runs(&self) -> bool {
        self.series.contains_key(&Metric::EmptySingle)
    }

    /// Series for `metric`, if tracked.
    pub fn series(&self, metric: Metric) -> Option<&TimeSeries> {
        self.series.get(&metric)
    }

    /// Tracked metrics in recording order.
    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.series.keys().copied()
    }

    /// All series in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &TimeSeries)> {
        self.series.iter().map(|(&m, s)| (m, s))
    }

    pub(crate) fn series_map(&self) -> &IndexMap<Metric, TimeSeries> {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;
    use sorb_core::{Boundary, Site};

    fn sites(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    #[test]
    fn fresh_series_hold_baseline() {
        let stats = Statistics::new(sites(10), true);
        assert_eq!(stats.metrics().count(), 5);
        for (_, s) in stats.iter() {
            assert_eq!(s.points(), &[(0, 0)]);
        }
        let plain = Statistics::new(sites(10), false);
        assert_eq!(plain.metrics().collect::<Vec<_>>(), Metric::BASE.to_vec());
        assert!(!plain.tracks_empty_runs());
    }

    #[test]
    fn decimation_for_fifty_sites_samples_every_fifth_attempt() {
        let lattice = Lattice::line(50, Boundary::Periodic).unwrap();
        let mut stats = Statistics::for_lattice(&lattice, false);
        for _ in 0..20 {
            stats.record(&lattice, false);
        }
        let ts: Vec<u64> = stats.series(Metric::Coverage).unwrap().timestamps().collect();
        assert_eq!(ts, vec![0, 5, 10, 15, 20]);
    }

    #[test]
    fn decimation_for_coprime_site_count() {
        let lattice = Lattice::line(7, Boundary::Open).unwrap();
        let mut stats = Statistics::for_lattice(&lattice, false);
        for _ in 0..15 {
            stats.record(&lattice, false);
        }
        let ts: Vec<u64> = stats.series(Metric::Successful).unwrap().timestamps().collect();
        assert_eq!(ts, vec![0, 7, 14]);
    }

    #[test]
    fn successful_series_is_cumulative() {
        let mut lattice = Lattice::line(10, Boundary::Open).unwrap();
        let mut stats = Statistics::for_lattice(&lattice, true);
        for i in 0..4i64 {
            let site: Site = smallvec![i];
            let ok = lattice.particle_adsorb(&[site]);
            stats.record(&lattice, ok);
        }
        // Failed retries still count as attempts.
        let site: Site = smallvec![0];
        let ok = lattice.particle_adsorb(&[site]);
        stats.record(&lattice, ok);
        assert_eq!(stats.attempts(), 5);
        assert_eq!(stats.successful(), 4);
        // Ten sites: sample every attempt.
        let succ = stats.series(Metric::Successful).unwrap();
        assert_eq!(succ.last(), Some((5, 4)));
        let single = stats.series(Metric::EmptySingle).unwrap();
        assert_eq!(single.last(), Some((5, 6)));
        let double = stats.series(Metric::EmptyDouble).unwrap();
        assert_eq!(double.last(), Some((5, 5)));
    }

    #[test]
    fn run_series_follow_window_lengths() {
        let mut lattice = Lattice::grid(2, 5, Boundary::Open, Boundary::Periodic).unwrap();
        let mut stats = Statistics::for_lattice(&lattice, true);
        for site in [[0i64, 1], [1, 0], [1, 3]] {
            let site: Site = smallvec![site[0], site[1]];
            let ok = lattice.particle_adsorb(&[site]);
            stats.record(&lattice, ok);
        }
        stats.record(&lattice, false);
        stats.record(&lattice, false);
        // Ten sites: every attempt is sampled.
        for metric in Metric::EMPTY_RUNS {
            let k = metric.run_length().unwrap();
            let last = stats.series(metric).unwrap().last();
            assert_eq!(last, Some((5, lattice.empty_runs(k) as u64)), "{metric}");
        }
        // Row 0 ring `0 1 0 0 0` has windows 4, 3, 2; row 1 `1 0 0 1 0` has 3, 1, 0.
        assert_eq!(stats.series(Metric::EmptySingle).unwrap().last(), Some((5, 7)));
        assert_eq!(stats.series(Metric::EmptyDouble).unwrap().last(), Some((5, 4)));
        assert_eq!(stats.series(Metric::EmptyTriple).unwrap().last(), Some((5, 2)));
    }

    #[test]
    fn reset_returns_to_baseline() {
        let lattice = Lattice::line(5, Boundary::Open).unwrap();
        let mut stats = Statistics::for_lattice(&lattice, true);
        for _ in 0..3 {
            stats.record(&lattice, true);
        }
        stats.reset();
        assert_eq!(stats, Statistics::for_lattice(&lattice, true));
    }

    #[test]
    fn restore_rejects_diverging_timestamps() {
        let mut series = IndexMap::new();
        series.insert(Metric::Successful, TimeSeries::from_points(vec![(0, 0), (5, 1)]));
        series.insert(Metric::Coverage, TimeSeries::from_points(vec![(0, 0), (6, 1)]));
        let err = Statistics::restore(sites(50), 6, 1, series).unwrap_err();
        assert!(matches!(err, StatsError::InvalidState { .. }));
    }

    #[test]
    fn restore_rejects_unknown_metric_layout() {
        let mut series = IndexMap::new();
        series.insert(Metric::Coverage, TimeSeries::baseline());
        let err = Statistics::restore(sites(50), 0, 0, series).unwrap_err();
        assert!(matches!(err, StatsError::InvalidState { .. }));
    }

    #[test]
    fn restore_accepts_recorded_state() {
        let lattice = Lattice::line(5, Boundary::Open).unwrap();
        let mut stats = Statistics::for_lattice(&lattice, true);
        for _ in 0..7 {
            stats.record(&lattice, false);
        }
        let restored = Statistics::restore(
            sites(5),
            stats.attempts(),
            stats.successful(),
            stats.series_map().clone(),
        )
        .unwrap();
        assert_eq!(restored, stats);
    }
}
