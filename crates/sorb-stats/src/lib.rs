//! Time-resolved statistics and cross-repetition aggregation.
//!
//! A [`Statistics`] accumulator follows one repetition. On every attempt
//! it counts; on decimated attempts it samples the lattice into one
//! [`TimeSeries`] per [`Metric`]. When the repetition ends, its series
//! are summed into a [`ResultsAggregator`], which finally normalizes the
//! sums into a [`Report`].
//!
//! All accumulation is integer arithmetic, so the order in which
//! repetitions are added never changes the result.
//!
//! # Decimation
//!
//! A sample is taken after attempt `n` whenever `(10 * n) % site_count == 0`,
//! giving ten samples per unit of time (one unit = `site_count` attempts)
//! when `site_count` divides evenly, and fewer otherwise.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod error;
pub mod metric;
pub mod report;
pub mod series;
pub mod statistics;

pub use aggregator::ResultsAggregator;
pub use error::StatsError;
pub use metric::Metric;
pub use report::Report;
pub use series::TimeSeries;
pub use statistics::Statistics;
