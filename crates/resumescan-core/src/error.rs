//! Error types for the resumescan-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the resumescan library.
#[derive(Error, Debug)]
pub enum AtsError {
    /// Document text extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Keyword scoring error.
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Input exceeded a configured size, page or time bound.
    #[error("resource limit exceeded: {0}")]
    ResourceLimit(#[from] ResourceLimitExceeded),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to turning a stored document into plain text.
///
/// Extraction is all-or-nothing: none of these carries partial text.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The resource could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document parsed but has no extractable text (e.g. a scanned image).
    #[error("document has no extractable text layer")]
    NoTextLayer,

    /// Content is not a document format we can read.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The blocking extraction task died before producing a result.
    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Errors related to keyword scoring.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// There is nothing to divide by.
    #[error("keyword set is empty")]
    EmptyKeywordSet,

    /// A stored score outside 0..=100.
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(u8),
}

/// Input was larger or slower than the configured bounds allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceLimitExceeded {
    /// File is larger than `max_file_size_bytes`.
    #[error("file is {size} bytes, limit is {limit}")]
    FileSize { size: u64, limit: u64 },

    /// Document has more pages than `max_pages`.
    #[error("document has {pages} pages, limit is {limit}")]
    PageCount { pages: u32, limit: u32 },

    /// Extraction did not finish within `timeout_ms`.
    #[error("extraction did not finish within {limit_ms}ms")]
    Timeout { limit_ms: u64 },
}

/// Result type for the resumescan library.
pub type Result<T> = std::result::Result<T, AtsError>;
