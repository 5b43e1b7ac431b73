use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors surfaced to the user
// ---------------------------------------------------------------------------

/// Everything a session operation can fail with.
///
/// None of these are fatal: the UI shows the message and the session stays
/// usable.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to load {}: File not found.", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to load {}: Invalid data format (line {line}: {reason}).", .path.display())]
    FileFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("No text files found in {}.", .dir.display())]
    NoDataFiles { dir: PathBuf },

    #[error("No data loaded. Please load data first.")]
    NoData,

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Snapped integration window is empty or inverted.
    #[error("Invalid range selected (snapped to samples {start} and {end}).")]
    InvalidRange { start: usize, end: usize },

    #[error("A point selection is already in progress.")]
    SelectionInProgress,

    #[error("Failed to save figure to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
