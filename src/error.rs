use std::path::PathBuf;

/// Error type for the library, surfaced at API boundaries per the
/// construction-time-abort / intra-evaluation-warning split.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("sub-graph vertex {0} has no edge inside its own vertex set")]
    InconsistentSubGraph(usize),

    #[error("output file already exists: {0}")]
    OutputExists(PathBuf),

    #[error("source vertex {0} not found in graph")]
    SourceNotFound(usize),
}

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
