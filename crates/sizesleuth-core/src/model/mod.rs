/// Data model for SizeSleuth.
///
/// Re-exports the size aggregates and unit helpers.
pub mod size;
pub mod size_table;

pub use size_table::{FrequencyTable, SizeTable, SortedSizes, TotalStats};
