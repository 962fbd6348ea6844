/// Densest size-range search.
///
/// For a window width `d` (bytes) and the ascending size sequence `S`, find
/// the index range `[start, end]` with the most files such that
/// `S[end] - S[start] <= d`.
///
/// # Sampling
///
/// Only every `stride`-th start index is probed (`0, stride, 2*stride, …`,
/// clamped to `N-1`). With the default stride of 1000 a million-record list
/// needs a thousand probes per width instead of a million, at the cost of
/// possibly missing a slightly denser window that starts between two samples.
/// A stride of 1 makes the search exhaustive.
///
/// # Probing
///
/// For each sampled start the farthest in-range end is found by a monotonic
/// binary search over `[start, N-1]`: because `S` is sorted, the predicate
/// `S[i] - S[start] <= d` is true up to some index and false after it.
///
/// # Determinism
///
/// Starts are visited in ascending order and a later start only replaces the
/// best window when it is strictly larger, so ties keep the smallest start.
/// Widths are evaluated in parallel with an order-preserving collect, giving
/// the same results as a sequential run.
use crate::model::SortedSizes;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Default distance between sampled start indices.
pub const DEFAULT_STRIDE: usize = 1000;

/// Errors that can occur during the densest-window search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// There are no sizes to search.
    #[error("no sizes to search")]
    EmptyInput,

    /// A stride of zero would never advance past the first start.
    #[error("sampling stride must be at least 1")]
    InvalidStride,
}

/// The densest window found for one width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowResult {
    /// Window width in bytes.
    pub width: u64,
    pub start_index: usize,
    pub end_index: usize,
    /// `S[start_index]` in bytes.
    pub start_size: u64,
    /// `S[end_index]` in bytes.
    pub end_size: u64,
    /// `(end_index - start_index) / total_files * 100`.
    pub percentage: f64,
    /// Length of the searched sequence.
    pub total_files: u64,
}

impl WindowResult {
    /// Number of files inside the window, both ends included.
    pub fn file_count(&self) -> u64 {
        (self.end_index - self.start_index) as u64 + 1
    }

    /// Share of all files inside the window, both ends included.
    ///
    /// Unlike [`percentage`](Self::percentage), which counts index steps,
    /// this reaches 100% when the window spans the whole sequence.
    pub fn coverage_percentage(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        self.file_count() as f64 / self.total_files as f64 * 100.0
    }
}

/// Largest `end` in `[start, N-1]` with `sizes[end] - sizes[start] <= width`.
///
/// `sizes` must be ascending and `start` must be a valid index.
pub fn farthest_end(sizes: &[u64], start: usize, width: u64) -> usize {
    debug_assert!(start < sizes.len(), "start index out of range");

    let base = sizes[start];
    let mut lo = start;
    let mut hi = sizes.len() - 1;

    // Invariant: sizes[lo] is in range; everything past hi is out of range.
    while lo < hi {
        // Round up so that `lo = mid` always makes progress.
        let mid = lo + (hi - lo + 1) / 2;
        if sizes[mid] - base <= width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Densest window of `width` bytes, probing every `stride`-th start.
pub fn densest_window(
    sizes: &SortedSizes,
    width: u64,
    stride: usize,
) -> Result<WindowResult, SearchError> {
    if stride == 0 {
        return Err(SearchError::InvalidStride);
    }
    if sizes.is_empty() {
        return Err(SearchError::EmptyInput);
    }

    let s = sizes.as_slice();
    let n = s.len();

    // (start, end) of the best window so far. Seeded from start 0 so that a
    // result exists even when every window is a single file.
    let mut best = (0, farthest_end(s, 0, width));

    for start in (0..n).step_by(stride).skip(1) {
        let end = farthest_end(s, start, width);
        if end - start > best.1 - best.0 {
            best = (start, end);
        }
    }

    let (start_index, end_index) = best;
    let result = WindowResult {
        width,
        start_index,
        end_index,
        start_size: s[start_index],
        end_size: s[end_index],
        percentage: (end_index - start_index) as f64 / n as f64 * 100.0,
        total_files: n as u64,
    };

    debug!(
        "Width {width}: [{}, {}] -> {} .. {} bytes, {:.2}%",
        result.start_index, result.end_index, result.start_size, result.end_size, result.percentage
    );
    Ok(result)
}

/// Densest-window search over a fixed set of widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensestWindowSearch {
    widths: Vec<u64>,
    stride: usize,
}

impl DensestWindowSearch {
    /// Search `widths` (in the given order) with the default stride.
    pub fn new(widths: Vec<u64>) -> Self {
        Self {
            widths,
            stride: DEFAULT_STRIDE,
        }
    }

    /// Override the sampling stride. Must be at least 1.
    pub fn with_stride(mut self, stride: usize) -> Result<Self, SearchError> {
        if stride == 0 {
            return Err(SearchError::InvalidStride);
        }
        self.stride = stride;
        Ok(self)
    }

    pub fn widths(&self) -> &[u64] {
        &self.widths
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// One result per configured width, in configuration order.
    ///
    /// Runs on the current rayon pool; wrap in `ThreadPool::install` to pick
    /// a specific one.
    pub fn run(&self, sizes: &SortedSizes) -> Result<Vec<WindowResult>, SearchError> {
        if sizes.is_empty() {
            return Err(SearchError::EmptyInput);
        }

        debug!(
            "Searching {} widths over {} sizes (stride {})",
            self.widths.len(),
            sizes.len(),
            self.stride
        );

        self.widths
            .par_iter()
            .map(|&width| densest_window(sizes, width, self.stride))
            .collect()
    }
}
