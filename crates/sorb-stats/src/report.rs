//! Finalized, normalized results.

use std::fmt;

use indexmap::IndexMap;

use crate::metric::Metric;

/// Normalized `(time, value)` series for every tracked metric.
///
/// Time is measured in attempts per site. See
/// [`ResultsAggregator::process`](crate::ResultsAggregator::process) for
/// how each value is normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    site_count: u64,
    simulations: u64,
    series: IndexMap<Metric, Vec<(f64, f64)>>,
}

impl Report {
    pub(crate) fn new(
        site_count: u64,
        simulations: u64,
        series: IndexMap<Metric, Vec<(f64, f64)>>,
    ) -> Self {
        Self {
            site_count,
            simulations,
            series,
        }
    }

    /// Sites on the simulated lattice.
    pub fn site_count(&self) -> u64 {
        self.site_count
    }

    /// Repetitions averaged into this report.
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    /// Normalized series for `metric`, if tracked.
    pub fn series(&self, metric: Metric) -> Option<&[(f64, f64)]> {
        self.series.get(&metric).map(Vec::as_slice)
    }

    /// Tracked metrics in recording order.
    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.series.keys().copied()
    }

    /// Last normalized value of `metric`.
    pub fn final_value(&self, metric: Metric) -> Option<f64> {
        self.series.get(&metric)?.last().map(|&(_, v)| v)
    }

    /// `(metric name, points)` rows for external sinks.
    pub fn table(&self) -> impl Iterator<Item = (&'static str, &[(f64, f64)])> {
        self.series.iter().map(|(m, s)| (m.name(), s.as_slice()))
    }
}

const TIME_HEADING: &str = "Time Elapsed";

impl fmt::Display for Report {
    /// One right-aligned two-column table per metric.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simulations: {} | Sites: {}",
            self.simulations, self.site_count
        )?;
        for (metric, points) in &self.series {
            writeln!(f)?;
            writeln!(f, "{}:", metric.label())?;
            writeln!(f)?;
            if points.is_empty() {
                writeln!(f, "No data to show.")?;
                continue;
            }
            let rows: Vec<(String, String)> = points
                .iter()
                .map(|(t, v)| (format!("{t:.4}"), format!("{v:.6}")))
                .collect();
            let tw = rows
                .iter()
                .map(|(t, _)| t.len())
                .chain([TIME_HEADING.len()])
                .max()
                .unwrap_or(0);
            let vw = rows
                .iter()
                .map(|(_, v)| v.len())
                .chain([metric.name().len()])
                .max()
                .unwrap_or(0);
            writeln!(f, "{TIME_HEADING:>tw$} | {:>vw$}", metric.name())?;
            writeln!(f, "{}-+-{}", "-".repeat(tw), "-".repeat(vw))?;
            for (t, v) in rows {
                writeln!(f, "{t:>tw$} | {v:>vw$}")?;
            }
        }
        Ok(())
    }
}
