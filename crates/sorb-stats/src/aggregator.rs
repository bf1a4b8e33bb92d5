//! Cross-repetition summation and final normalization.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::StatsError;
use crate::metric::Metric;
use crate::report::Report;
use crate::series::TimeSeries;
use crate::statistics::Statistics;

/// Running sums of every repetition's series.
///
/// Adding is commutative and associative: values are summed as integers,
/// and every repetition must share the same timestamps.
///
/// Finalization consumes the aggregator, so it cannot be normalized twice:
///
/// ```compile_fail
/// use sorb_stats::ResultsAggregator;
///
/// let aggregator = ResultsAggregator::new();
/// let _ = aggregator.process();
/// let _ = aggregator.process();
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultsAggregator {
    site_count: u64,
    simulations: u64,
    sums: IndexMap<Metric, TimeSeries>,
}

impl ResultsAggregator {
    /// An aggregator with nothing added yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an aggregator from checkpointed sums.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidState`] if sums are present without
    /// simulations (or the reverse), or if the sums disagree on timestamps.
    pub fn restore(
        site_count: u64,
        simulations: u64,
        sums: IndexMap<Metric, TimeSeries>,
    ) -> Result<Self, StatsError> {
        if (simulations == 0) != sums.is_empty() {
            return Err(StatsError::InvalidState {
                reason: format!(
                    "{simulations} simulations recorded with {} summed series",
                    sums.len()
                ),
            });
        }
        if let Some((_, first)) = sums.first() {
            for (&metric, s) in &sums {
                compare_timestamps(metric, first, s).map_err(|e| StatsError::InvalidState {
                    reason: e.to_string(),
                })?;
            }
        }
        Ok(Self {
            site_count,
            simulations,
            sums,
        })
    }

    /// Number of repetitions added.
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    /// Site count shared by every added repetition, once one was added.
    pub fn site_count(&self) -> Option<u64> {
        (self.simulations > 0).then_some(self.site_count)
    }

    /// Summed series for `metric`.
    pub fn sums(&self, metric: Metric) -> Option<&TimeSeries> {
        self.sums.get(&metric)
    }

    /// All summed series in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &TimeSeries)> {
        self.sums.iter().map(|(&m, s)| (m, s))
    }

    /// Add one finished repetition.
    ///
    /// The first repetition defines the site count, metric set and
    /// timestamps; every later one must match them exactly.
    pub fn add(&mut self, statistics: &Statistics) -> Result<(), StatsError> {
        self.absorb(statistics.site_count(), statistics.series_map(), 1)?;
        debug!(simulations = self.simulations, "repetition statistics added");
        Ok(())
    }

    /// Fold another partial aggregate into this one.
    pub fn merge(&mut self, other: &ResultsAggregator) -> Result<(), StatsError> {
        if other.simulations == 0 {
            return Ok(());
        }
        self.absorb(other.site_count, &other.sums, other.simulations)?;
        debug!(
            simulations = self.simulations,
            merged = other.simulations,
            "partial aggregates merged"
        );
        Ok(())
    }

    fn absorb(
        &mut self,
        site_count: u64,
        sums: &IndexMap<Metric, TimeSeries>,
        simulations: u64,
    ) -> Result<(), StatsError> {
        if self.simulations == 0 {
            self.site_count = site_count;
            self.sums = sums.clone();
            self.simulations = simulations;
            return Ok(());
        }
        self.check_compatible(site_count, sums)?;
        for (metric, mine) in self.sums.iter_mut() {
            if let Some(theirs) = sums.get(metric) {
                mine.accumulate(theirs);
            }
        }
        self.simulations += simulations;
        Ok(())
    }

    fn check_compatible(
        &self,
        site_count: u64,
        sums: &IndexMap<Metric, TimeSeries>,
    ) -> Result<(), StatsError> {
        if site_count != self.site_count {
            return Err(StatsError::SiteCountMismatch {
                expected: self.site_count,
                found: site_count,
            });
        }
        if !self.sums.keys().eq(sums.keys()) {
            return Err(StatsError::MetricMismatch {
                expected: self.sums.keys().copied().collect(),
                found: sums.keys().copied().collect(),
            });
        }
        for (&metric, mine) in &self.sums {
            if let Some(theirs) = sums.get(&metric) {
                compare_timestamps(metric, mine, theirs)?;
            }
        }
        Ok(())
    }

    /// Normalize the sums into per-site, per-repetition averages.
    ///
    /// For each point `(t, v)`:
    /// - successful attempts become `v / (t * simulations)` (a zero
    ///   denominator is replaced by 1), the fraction of attempts that
    ///   succeeded;
    /// - every other metric becomes `v / (simulations * site_count)`;
    /// - the timestamp becomes `t / site_count`, attempts per site.
    ///
    /// # Errors
    ///
    /// [`StatsError::NoSimulations`] if nothing was added.
    pub fn process(self) -> Result<Report, StatsError> {
        if self.simulations == 0 {
            return Err(StatsError::NoSimulations);
        }
        let sims = self.simulations as f64;
        let sites = self.site_count as f64;
        let series = self
            .sums
            .iter()
            .map(|(&metric, sums)| {
                let points = sums
                    .points()
                    .iter()
                    .map(|&(t, v)| {
                        let value = match metric {
                            Metric::Successful => {
                                let denominator = t as f64 * sims;
                                v as f64 / if t == 0 { 1.0 } else { denominator }
                            }
                            _ => v as f64 / (sims * sites),
                        };
                        (t as f64 / sites, value)
                    })
                    .collect();
                (metric, points)
            })
            .collect();
        debug!(simulations = self.simulations, "results normalized");
        Ok(Report::new(self.site_count, self.simulations, series))
    }
}

fn compare_timestamps(
    metric: Metric,
    expected: &TimeSeries,
    found: &TimeSeries,
) -> Result<(), StatsError> {
    let longest = expected.len().max(found.len());
    for index in 0..longest {
        let e = expected.points().get(index).map(|p| p.0);
        let f = found.points().get(index).map(|p| p.0);
        if e != f {
            return Err(StatsError::InconsistentTimeSeries {
                metric,
                index,
                expected: e,
                found: f,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorb_core::Boundary;
    use sorb_lattice::Lattice;
    use std::num::NonZeroU64;

    fn recorded(len: u32, attempts: u64, successes: &[bool]) -> Statistics {
        let lattice = Lattice::line(len, Boundary::Open).unwrap();
        let mut stats = Statistics::for_lattice(&lattice, false);
        for i in 0..attempts as usize {
            stats.record(&lattice, successes.get(i).copied().unwrap_or(false));
        }
        stats
    }

    #[test]
    fn process_without_additions_fails() {
        assert_eq!(
            ResultsAggregator::new().process().unwrap_err(),
            StatsError::NoSimulations
        );
    }

    #[test]
    fn different_lengths_are_inconsistent() {
        let mut agg = ResultsAggregator::new();
        agg.add(&recorded(10, 3, &[])).unwrap();
        let err = agg.add(&recorded(10, 2, &[])).unwrap_err();
        assert_eq!(
            err,
            StatsError::InconsistentTimeSeries {
                metric: Metric::Successful,
                index: 3,
                expected: Some(3),
                found: None,
            }
        );
        // The failed add left the sums untouched.
        assert_eq!(agg.simulations(), 1);
    }

    #[test]
    fn different_site_counts_rejected() {
        let mut agg = ResultsAggregator::new();
        agg.add(&recorded(10, 10, &[])).unwrap();
        let err = agg.add(&recorded(5, 10, &[])).unwrap_err();
        assert_eq!(
            err,
            StatsError::SiteCountMismatch {
                expected: 10,
                found: 5
            }
        );
    }

    #[test]
    fn different_metric_sets_rejected() {
        let lattice = Lattice::line(10, Boundary::Open).unwrap();
        let mut agg = ResultsAggregator::new();
        agg.add(&Statistics::for_lattice(&lattice, false)).unwrap();
        let err = agg
            .add(&Statistics::for_lattice(&lattice, true))
            .unwrap_err();
        assert!(matches!(err, StatsError::MetricMismatch { .. }));
    }

    #[test]
    fn process_normalizes_by_attempts_sites_and_simulations() {
        let mut agg = ResultsAggregator::new();
        // Ten sites, sample every attempt. Two repetitions of two attempts.
        agg.add(&recorded(10, 2, &[true, true])).unwrap();
        agg.add(&recorded(10, 2, &[true, false])).unwrap();
        let report = agg.process().unwrap();

        let succ = report.series(Metric::Successful).unwrap();
        assert_eq!(succ[0], (0.0, 0.0));
        // t=1: successes 1 + 1 over 1 * 2.
        assert_eq!(succ[1], (0.1, 1.0));
        // t=2: successes 2 + 1 over 2 * 2.
        assert_eq!(succ[2], (0.2, 0.75));

        // Coverage is never touched by `recorded` (lattice stays empty).
        let cov = report.series(Metric::Coverage).unwrap();
        assert!(cov.iter().all(|&(_, v)| v == 0.0));
    }

    #[test]
    fn merge_matches_sequential_adds() {
        let a = recorded(10, 5, &[true, false, true]);
        let b = recorded(10, 5, &[false, true]);
        let c = recorded(10, 5, &[true]);

        let mut sequential = ResultsAggregator::new();
        for s in [&a, &b, &c] {
            sequential.add(s).unwrap();
        }

        let mut left = ResultsAggregator::new();
        left.add(&a).unwrap();
        let mut right = ResultsAggregator::new();
        right.add(&b).unwrap();
        right.add(&c).unwrap();
        left.merge(&right).unwrap();

        assert_eq!(left, sequential);
        assert_eq!(left.simulations(), 3);
    }

    #[test]
    fn merging_empty_is_a_no_op() {
        let mut agg = ResultsAggregator::new();
        agg.add(&recorded(10, 3, &[])).unwrap();
        let before = agg.clone();
        agg.merge(&ResultsAggregator::new()).unwrap();
        assert_eq!(agg, before);
    }

    #[test]
    fn restore_checks_simulation_count() {
        let stats = Statistics::new(NonZeroU64::new(4).unwrap(), false);
        let err =
            ResultsAggregator::restore(4, 0, stats.series_map().clone()).unwrap_err();
        assert!(matches!(err, StatsError::InvalidState { .. }));
        assert!(ResultsAggregator::restore(4, 0, IndexMap::new()).is_ok());
    }
}
