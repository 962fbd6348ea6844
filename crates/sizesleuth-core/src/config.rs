/// Analysis configuration.
///
/// Every field has a default, so an empty JSON object (or no file at all)
/// reproduces the standard run: widths 1KB–15KB in 1KB steps, stride 1000,
/// malformed lines skipped, and the three default bucket sets.
///
/// ```json
/// {
///   "widths": [4096, 8192],
///   "stride": 100,
///   "malformed_lines": "abort",
///   "bucket_sets": [
///     { "name": "small", "buckets": [ { "lower": 0, "upper": 1024 },
///                                     { "lower": 1024, "upper": 4096, "label": "1-4K" } ] }
///   ],
///   "threads": 4
/// }
/// ```
use crate::analysis::buckets::{default_bucket_sets, BucketError, BucketSet};
use crate::analysis::window::{DensestWindowSearch, SearchError, DEFAULT_STRIDE};
use crate::loader::MalformedLinePolicy;
use crate::model::size::KB;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("at least one window width is required")]
    NoWidths,

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Bucket(#[from] BucketError),

    #[error("worker thread count must be at least 1")]
    ZeroThreads,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Window widths tested when none are configured: 1KB to 15KB in 1KB steps.
pub fn default_widths() -> Vec<u64> {
    (1..=15).map(|k| k * KB).collect()
}

/// Everything a run needs besides the input path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Window widths in bytes, searched in this order.
    pub widths: Vec<u64>,
    /// Distance between sampled start indices.
    pub stride: usize,
    pub malformed_lines: MalformedLinePolicy,
    pub bucket_sets: Vec<BucketSet>,
    /// Worker threads for the window search. `None` uses one per CPU.
    pub threads: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            widths: default_widths(),
            stride: DEFAULT_STRIDE,
            malformed_lines: MalformedLinePolicy::default(),
            bucket_sets: default_bucket_sets(),
            threads: None,
        }
    }
}

impl AnalysisConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.widths.is_empty() {
            return Err(ConfigError::NoWidths);
        }
        if self.stride == 0 {
            return Err(SearchError::InvalidStride.into());
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        for set in &self.bucket_sets {
            set.validate()?;
        }
        Ok(())
    }

    /// Number of rayon workers to use.
    pub fn worker_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Search over the configured widths and stride.
    pub fn window_search(&self) -> Result<DensestWindowSearch, SearchError> {
        DensestWindowSearch::new(self.widths.clone()).with_stride(self.stride)
    }

    /// Dedicated pool for the window search.
    pub fn build_thread_pool(&self) -> Result<rayon::ThreadPool, ConfigError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_threads())
            .thread_name(|i| format!("sizesleuth-search-{i}"))
            .build()?;
        Ok(pool)
    }
}
