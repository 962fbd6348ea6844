/// Malformed-line handling for the size loader.
use serde::{Deserialize, Serialize};

/// What the loader does with a line whose first token is not a size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Log a warning, count the line in the load report, and keep going.
    #[default]
    Skip,
    /// Fail the whole load at the first malformed line.
    Abort,
}
