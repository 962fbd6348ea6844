/// Size loader — reads a line-oriented size list into a [`SizeTable`].
///
/// Each record is one line whose first whitespace-delimited token is a
/// non-negative integer byte size. Any further tokens (typically a path)
/// are ignored. Blank lines carry no record and are always ignored.
///
/// Lines are split on raw `\n` bytes and decoded lossily, so a path that is
/// not valid UTF-8 never affects the size in front of it.
///
/// Lines whose first token is not a size are handled according to a
/// [`MalformedLinePolicy`]: skipped with a warning (the default) or
/// treated as fatal.
///
/// The source is read exactly once, in full, into memory.
pub mod policy;

pub use policy::MalformedLinePolicy;

use crate::model::SizeTable;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while loading a size list.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file does not exist.
    ///
    /// Callers may treat this as recoverable and continue with an empty
    /// [`LoadOutcome`].
    #[error("size list {} not found", .path.display())]
    SourceNotFound { path: PathBuf },

    /// A line's first token is not a non-negative integer
    /// (only returned under [`MalformedLinePolicy::Abort`]).
    #[error("line {line_number}: {content:?} does not start with a byte size")]
    MalformedLine { line_number: usize, content: String },

    #[error("failed to read size list: {0}")]
    Io(#[from] io::Error),
}

/// A line dropped under [`MalformedLinePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the source.
    pub line_number: usize,
    pub content: String,
}

/// Result of a successful load.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub table: SizeTable,
    /// Malformed lines that were skipped, in source order.
    pub skipped: Vec<SkippedLine>,
}

/// Load a size list from `path`.
///
/// A missing file yields [`LoadError::SourceNotFound`]; any other open or
/// read failure yields [`LoadError::Io`].
pub fn load_sizes(path: &Path, policy: MalformedLinePolicy) -> Result<LoadOutcome, LoadError> {
    info!("Loading size list from {}", path.display());

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io(e),
    })?;

    load_sizes_from_reader(BufReader::new(file), policy)
}

/// Load a size list from any buffered reader.
pub fn load_sizes_from_reader<R: BufRead>(
    reader: R,
    policy: MalformedLinePolicy,
) -> Result<LoadOutcome, LoadError> {
    let mut sizes: Vec<u64> = Vec::new();
    let mut skipped: Vec<SkippedLine> = Vec::new();

    for (i, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = String::from_utf8_lossy(&raw);
        let line_number = i + 1;

        let Some(token) = line.split_whitespace().next() else {
            continue;
        };

        match token.parse::<u64>() {
            Ok(size) => sizes.push(size),
            Err(_) => match policy {
                MalformedLinePolicy::Abort => {
                    return Err(LoadError::MalformedLine {
                        line_number,
                        content: line.into_owned(),
                    });
                }
                MalformedLinePolicy::Skip => {
                    warn!("Skipping malformed line {line_number}: {line:?}");
                    skipped.push(SkippedLine {
                        line_number,
                        content: line.into_owned(),
                    });
                }
            },
        }
    }

    let table = SizeTable::from_sizes(sizes);
    debug!(
        "Loaded {} records ({} distinct sizes, {} bytes), skipped {} lines",
        table.totals.total_files,
        table.frequencies.distinct_sizes(),
        table.totals.total_bytes,
        skipped.len()
    );

    Ok(LoadOutcome { table, skipped })
}
