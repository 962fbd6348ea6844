/// Analysis modules — bucket distributions and the densest-window search.

pub mod buckets;
pub mod report;
pub mod window;

pub use buckets::{default_bucket_sets, Bucket, BucketCount, BucketDistribution, BucketSet};
pub use report::AnalysisReport;
pub use window::{densest_window, farthest_end, DensestWindowSearch, SearchError, WindowResult};
