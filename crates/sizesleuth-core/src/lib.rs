/// SizeSleuth Core — loading, bucketing and densest-window analysis.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends.
///
/// # Modules
///
/// - [`model`] — Sorted sizes, frequency table, totals, and unit helpers.
/// - [`loader`] — Reads a line-oriented size list into a [`model::SizeTable`].
/// - [`analysis`] — Bucket distributions and the densest size-range search.
/// - [`config`] — Widths, stride, bucket sets and worker count, with JSON loading.
/// - [`export`] — CSV and JSON output of an analysis report.
pub mod analysis;
pub mod config;
pub mod export;
pub mod loader;
pub mod model;
