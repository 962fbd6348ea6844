/// Complete analysis of one size list, as handed to exporters and to the
/// CLI summary.
use super::buckets::BucketDistribution;
use super::window::{SearchError, WindowResult};
use crate::config::AnalysisConfig;
use crate::loader::{LoadOutcome, SkippedLine};
use crate::model::TotalStats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Input path as given by the caller.
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub totals: TotalStats,
    pub distinct_sizes: usize,
    pub skipped_lines: Vec<SkippedLine>,
    pub stride: usize,
    pub distributions: Vec<BucketDistribution>,
    /// One entry per configured width. Empty when there was nothing to search.
    pub windows: Vec<WindowResult>,
}

impl AnalysisReport {
    /// Bucket the loaded sizes and run the window search on `pool`.
    ///
    /// An empty input is not an error here: the report simply carries zero
    /// totals and no window results.
    pub fn build(
        source: &Path,
        outcome: &LoadOutcome,
        config: &AnalysisConfig,
        pool: &rayon::ThreadPool,
    ) -> Result<Self, SearchError> {
        let table = &outcome.table;

        let distributions = config
            .bucket_sets
            .iter()
            .map(|set| set.distribute(&table.frequencies))
            .collect();

        let search = config.window_search()?;

        info!(
            "Searching densest windows for {} widths on {} threads",
            search.widths().len(),
            pool.current_num_threads()
        );
        let windows = match pool.install(|| search.run(&table.sorted)) {
            Ok(windows) => windows,
            Err(SearchError::EmptyInput) => {
                warn!("No sizes loaded; skipping window search");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            source: source.display().to_string(),
            generated_at: Utc::now(),
            totals: table.totals,
            distinct_sizes: table.frequencies.distinct_sizes(),
            skipped_lines: outcome.skipped.clone(),
            stride: search.stride(),
            distributions,
            windows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SizeTable;

    fn single_thread_pool() -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap()
    }

    #[test]
    fn build_collects_buckets_and_windows() {
        let outcome = LoadOutcome {
            table: SizeTable::from_sizes(vec![0, 0, 100, 200, 300, 1000]),
            skipped: Vec::new(),
        };
        let config = AnalysisConfig {
            widths: vec![300, 1000],
            stride: 1,
            ..AnalysisConfig::default()
        };
        let report =
            AnalysisReport::build(Path::new("res.txt"), &outcome, &config, &single_thread_pool())
                .unwrap();

        assert_eq!(report.source, "res.txt");
        assert_eq!(report.stride, 1);
        assert_eq!(
            report.windows.iter().map(|w| w.width).collect::<Vec<_>>(),
            config.window_search().unwrap().widths()
        );
        assert_eq!(report.totals.total_files, 6);
        assert_eq!(report.totals.total_bytes, 1600);
        assert_eq!(report.distinct_sizes, 5);
        assert_eq!(report.distributions.len(), 3);
        assert_eq!(report.windows.len(), 2);
        assert_eq!(report.windows[0].end_index, 4);
        assert_eq!(report.windows[1].end_index, 5);
    }

    #[test]
    fn empty_input_yields_no_windows() {
        let outcome = LoadOutcome::default();
        let report = AnalysisReport::build(
            Path::new("missing.txt"),
            &outcome,
            &AnalysisConfig::default(),
            &single_thread_pool(),
        )
        .unwrap();
        assert!(report.windows.is_empty());
        assert_eq!(report.totals, TotalStats::default());
        assert!(report.distributions.iter().all(|d| d.is_empty()));
    }

    #[test]
    fn zero_stride_is_still_an_error() {
        let outcome = LoadOutcome {
            table: SizeTable::from_sizes(vec![1, 2, 3]),
            skipped: Vec::new(),
        };
        let config = AnalysisConfig {
            stride: 0,
            ..AnalysisConfig::default()
        };
        let err = AnalysisReport::build(Path::new("x"), &outcome, &config, &single_thread_pool())
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidStride);
    }
}
