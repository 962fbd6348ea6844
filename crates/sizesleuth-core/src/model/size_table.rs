/// In-memory aggregates built from a loaded size list.
///
/// A `SizeTable` bundles the three views the analysis needs:
/// - [`SortedSizes`] — every record, ascending, for windowed search.
/// - [`FrequencyTable`] — distinct size → occurrence count, for bucketing.
/// - [`TotalStats`] — file count and byte volume.
///
/// All three are derived from the same records, so they always agree.
use serde::Serialize;
use std::collections::BTreeMap;

/// Ascending sequence of file sizes in bytes, duplicates allowed.
///
/// The only constructors sort their input, so the ordering invariant
/// cannot be violated by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedSizes(Vec<u64>);

impl SortedSizes {
    /// Sort `sizes` in place and wrap them.
    pub fn from_unsorted(mut sizes: Vec<u64>) -> Self {
        sizes.sort_unstable();
        Self(sizes)
    }

    /// Expand a frequency table back into the full sorted sequence.
    pub fn from_frequencies(table: &FrequencyTable) -> Self {
        let mut sizes = Vec::with_capacity(table.total_files() as usize);
        for (&size, &count) in table.iter() {
            sizes.extend(std::iter::repeat(size).take(count as usize));
        }
        // BTreeMap iteration is already ascending.
        Self(sizes)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Distinct size → number of files with exactly that size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable(BTreeMap<u64, u64>);

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more file of `size` bytes.
    pub fn record(&mut self, size: u64) {
        *self.0.entry(size).or_insert(0) += 1;
    }

    /// Rebuild the table from a sorted sequence.
    ///
    /// Equal sizes are adjacent, so this is a single run-length pass.
    pub fn from_sorted(sizes: &SortedSizes) -> Self {
        let mut table = BTreeMap::new();
        for chunk in sizes.as_slice().chunk_by(|a, b| a == b) {
            table.insert(chunk[0], chunk.len() as u64);
        }
        Self(table)
    }

    /// Occurrence count for `size` (0 if never seen).
    pub fn count(&self, size: u64) -> u64 {
        self.0.get(&size).copied().unwrap_or(0)
    }

    /// Iterate `(size, count)` pairs in ascending size order.
    pub fn iter(&self) -> impl Iterator<Item = (&u64, &u64)> {
        self.0.iter()
    }

    /// Number of distinct sizes.
    pub fn distinct_sizes(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total_files(&self) -> u64 {
        self.0.values().sum()
    }

    /// Sum of `size * count`, saturating at `u64::MAX`.
    pub fn total_bytes(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, (&size, &count)| {
                acc.saturating_add(size.saturating_mul(count))
            })
    }
}

/// File count and byte volume of a loaded size list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TotalStats {
    pub total_files: u64,
    pub total_bytes: u64,
}

impl TotalStats {
    pub fn from_frequencies(table: &FrequencyTable) -> Self {
        Self {
            total_files: table.total_files(),
            total_bytes: table.total_bytes(),
        }
    }
}

/// Sorted sequence, frequency table and totals for one input source.
#[derive(Debug, Clone, Default)]
pub struct SizeTable {
    pub sorted: SortedSizes,
    pub frequencies: FrequencyTable,
    pub totals: TotalStats,
}

impl SizeTable {
    /// Build all aggregates from raw sizes in any order.
    pub fn from_sizes(sizes: Vec<u64>) -> Self {
        let mut frequencies = FrequencyTable::new();
        for &size in &sizes {
            frequencies.record(size);
        }
        let totals = TotalStats::from_frequencies(&frequencies);
        Self {
            sorted: SortedSizes::from_unsorted(sizes),
            frequencies,
            totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_unsorted_sorts_ascending_with_duplicates() {
        let sorted = SortedSizes::from_unsorted(vec![300, 0, 100, 0, 1000, 200]);
        assert_eq!(sorted.as_slice(), &[0, 0, 100, 200, 300, 1000]);
        assert_eq!(sorted.len(), 6);
    }

    #[test]
    fn frequency_table_counts_duplicates() {
        let mut table = FrequencyTable::new();
        for size in [10, 20, 10, 10, 30] {
            table.record(size);
        }
        assert_eq!(table.count(10), 3);
        assert_eq!(table.count(20), 1);
        assert_eq!(table.count(99), 0);
        assert_eq!(table.distinct_sizes(), 3);
        assert_eq!(table.total_files(), 5);
        assert_eq!(table.total_bytes(), 10 * 3 + 20 + 30);
    }

    /// Rebuilding the table from the sorted sequence must reproduce the
    /// exact counts, and the counts must sum to N.
    #[test]
    fn frequency_table_round_trips_through_sorted_sizes() {
        let table = SizeTable::from_sizes(vec![5, 1, 5, 9, 1, 1, 0, 5]);
        let rebuilt = FrequencyTable::from_sorted(&table.sorted);
        assert_eq!(rebuilt, table.frequencies);
        assert_eq!(rebuilt.total_files(), table.sorted.len() as u64);

        let expanded = SortedSizes::from_frequencies(&rebuilt);
        assert_eq!(expanded, table.sorted);
    }

    #[test]
    fn totals_match_frequency_table() {
        let table = SizeTable::from_sizes(vec![100, 200, 100]);
        assert_eq!(table.totals.total_files, 3);
        assert_eq!(table.totals.total_bytes, 400);
        assert_eq!(
            table.totals.total_files,
            table.frequencies.iter().map(|(_, &c)| c).sum::<u64>()
        );
    }

    /// Byte totals beyond `u64::MAX` saturate instead of wrapping.
    #[test]
    fn total_bytes_saturates() {
        let table = SizeTable::from_sizes(vec![u64::MAX, u64::MAX]);
        assert_eq!(table.totals.total_bytes, u64::MAX);
        assert_eq!(table.totals.total_files, 2);
    }

    #[test]
    fn empty_table_has_zero_totals() {
        let table = SizeTable::default();
        assert!(table.is_empty());
        assert!(table.frequencies.is_empty());
        assert_eq!(table.totals, TotalStats::default());
        assert_eq!(FrequencyTable::from_sorted(&table.sorted), FrequencyTable::new());
    }
}
