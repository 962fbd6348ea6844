/// Size-bucket distribution.
///
/// A [`BucketSet`] is an ordered list of half-open byte ranges
/// `[lower, upper)`. Distributing a [`FrequencyTable`] over a set adds each
/// size's count to the first bucket that contains it; sizes that fall in no
/// bucket are tallied separately as `unbucketed` rather than dropped.
///
/// The resulting label → count mapping is what a histogram renderer consumes.
use crate::model::size::{format_bound, KB, MB, TB};
use crate::model::FrequencyTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found when validating a bucket set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BucketError {
    #[error("bucket set {name:?} has no buckets")]
    EmptySet { name: String },

    #[error("bucket {label:?} in set {set:?} has lower bound >= upper bound")]
    EmptyRange { set: String, label: String },
}

/// One half-open byte range `[lower, upper)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub lower: u64,
    pub upper: u64,
    /// Display label; derived from the bounds when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Bucket {
    pub fn new(lower: u64, upper: u64) -> Self {
        Self {
            lower,
            upper,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The explicit label, or `"{lower}-{upper}"` in compact units (`1KB-2KB`).
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{}-{}", format_bound(self.lower), format_bound(self.upper)),
        }
    }

    #[inline]
    pub fn contains(&self, size: u64) -> bool {
        size >= self.lower && size < self.upper
    }
}

/// A named, ordered list of buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSet {
    pub name: String,
    pub buckets: Vec<Bucket>,
}

impl BucketSet {
    /// Build a set from `(lower, upper)` pairs with derived labels.
    pub fn from_bounds(name: impl Into<String>, bounds: &[(u64, u64)]) -> Self {
        Self {
            name: name.into(),
            buckets: bounds
                .iter()
                .map(|&(lower, upper)| Bucket::new(lower, upper))
                .collect(),
        }
    }

    /// Reject empty sets and empty ranges. Overlapping ranges are allowed;
    /// the first matching bucket wins.
    pub fn validate(&self) -> Result<(), BucketError> {
        if self.buckets.is_empty() {
            return Err(BucketError::EmptySet {
                name: self.name.clone(),
            });
        }
        if let Some(bad) = self.buckets.iter().find(|b| b.lower >= b.upper) {
            return Err(BucketError::EmptyRange {
                set: self.name.clone(),
                label: bad.label(),
            });
        }
        Ok(())
    }

    /// Count files per bucket.
    pub fn distribute(&self, table: &FrequencyTable) -> BucketDistribution {
        let mut counts = vec![0u64; self.buckets.len()];
        let mut unbucketed = 0u64;

        for (&size, &count) in table.iter() {
            match self.buckets.iter().position(|b| b.contains(size)) {
                Some(i) => counts[i] += count,
                None => unbucketed += count,
            }
        }

        let total_files = table.total_files();
        let buckets = self
            .buckets
            .iter()
            .zip(counts)
            .map(|(bucket, count)| BucketCount {
                label: bucket.label(),
                lower: bucket.lower,
                upper: bucket.upper,
                count,
                percentage: percentage_of(count, total_files),
            })
            .collect();

        BucketDistribution {
            name: self.name.clone(),
            buckets,
            unbucketed,
            total_files,
        }
    }
}

/// File count for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub label: String,
    pub lower: u64,
    pub upper: u64,
    pub count: u64,
    /// Share of all files, in percent.
    pub percentage: f64,
}

/// Result of distributing one frequency table over one bucket set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketDistribution {
    pub name: String,
    pub buckets: Vec<BucketCount>,
    /// Files whose size matched no bucket.
    pub unbucketed: u64,
    pub total_files: u64,
}

impl BucketDistribution {
    /// `true` when there were no files to distribute.
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// `(label, count)` pairs in bucket order.
    pub fn label_counts(&self) -> impl Iterator<Item = (&str, u64)> {
        self.buckets.iter().map(|b| (b.label.as_str(), b.count))
    }
}

fn percentage_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// The three standard distributions: fine-grained small files, power-of-two
/// doubling, and 1KB steps up to 16KB.
pub fn default_bucket_sets() -> Vec<BucketSet> {
    let fine = BucketSet::from_bounds(
        "fine",
        &[
            (0, 128),
            (128, 256),
            (256, 512),
            (512, KB),
            (KB, 2 * KB),
            (2 * KB, 8 * KB),
            (8 * KB, 16 * KB),
            (16 * KB, 64 * KB),
            (64 * KB, 256 * KB),
            (256 * KB, MB),
            (MB, 16 * MB),
            (16 * MB, 128 * MB),
            (128 * MB, 512 * MB),
            (512 * MB, 16 * TB),
        ],
    );

    let mut doubling_bounds = vec![(0, 512)];
    let mut lower = 512;
    while lower < 8 * MB {
        doubling_bounds.push((lower, lower * 2));
        lower *= 2;
    }
    doubling_bounds.push((8 * MB, 16 * TB));
    let doubling = BucketSet::from_bounds("doubling", &doubling_bounds);

    let mut step_bounds: Vec<(u64, u64)> = (0..16).map(|k| (k * KB, (k + 1) * KB)).collect();
    step_bounds.extend_from_slice(&[
        (16 * KB, 64 * KB),
        (64 * KB, 256 * KB),
        (256 * KB, MB),
        (MB, 16 * MB),
        (16 * MB, 512 * MB),
        (512 * MB, 16 * TB),
    ]);
    let kilobyte_steps = BucketSet::from_bounds("kilobyte-steps", &step_bounds);

    vec![fine, doubling, kilobyte_steps]
}
