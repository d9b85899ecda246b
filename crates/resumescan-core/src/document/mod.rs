//! Document text extraction.
//!
//! Turns a stored resume into plain text. The format is sniffed from the
//! content first and the file extension second; PDFs go through
//! [`PdfExtractor`], plain text is decoded as UTF-8.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractionError, ResourceLimitExceeded, Result};
use crate::models::config::ExtractionConfig;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// PDF readers accept the header anywhere in the first 1024 bytes.
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_HEADER_WINDOW: usize = 1024;

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Portable document with an embedded text layer.
    Pdf,
    /// UTF-8 text (`.txt`, `.text`, `.md`).
    PlainText,
}

impl DocumentFormat {
    /// Map a file extension to a format, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Decide the format of `data`, using `name` only when the content is
    /// not self-identifying.
    pub fn detect(data: &[u8], name: Option<&Path>) -> std::result::Result<Self, ExtractionError> {
        let window = &data[..data.len().min(PDF_HEADER_WINDOW)];
        if window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
            return Ok(Self::Pdf);
        }

        let ext = name
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .unwrap_or("");

        Self::from_extension(ext).ok_or_else(|| {
            if ext.is_empty() {
                ExtractionError::UnsupportedFormat("unrecognized content".to_string())
            } else {
                ExtractionError::UnsupportedFormat(format!(".{}", ext))
            }
        })
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::PlainText => write!(f, "text"),
        }
    }
}

/// Plain text pulled out of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    /// Text content in text-layer order.
    pub text: String,
    /// Detected source format.
    pub format: DocumentFormat,
    /// Page count, for paged formats.
    pub page_count: Option<u32>,
}

/// Stateless text extractor with input bounds.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    max_file_size_bytes: u64,
    max_pages: u32,
}

impl TextExtractor {
    /// Create an extractor with the default limits.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor with limits taken from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            max_pages: config.max_pages,
        }
    }

    /// Read and extract a stored file.
    pub fn extract_file(&self, path: &Path) -> Result<ExtractedDocument> {
        let read_err = |source| ExtractionError::Read {
            path: path.to_path_buf(),
            source,
        };

        let size = fs::metadata(path).map_err(read_err)?.len();
        self.check_size(size)?;

        let data = fs::read(path).map_err(read_err)?;
        self.extract_bytes(&data, Some(path))
    }

    /// Extract text from an in-memory document. `name` is consulted for its
    /// extension when the content does not identify its own format.
    pub fn extract_bytes(&self, data: &[u8], name: Option<&Path>) -> Result<ExtractedDocument> {
        self.check_size(data.len() as u64)?;

        let format = DocumentFormat::detect(data, name)?;
        debug!("Detected {} document ({} bytes)", format, data.len());

        match format {
            DocumentFormat::Pdf => {
                let mut extractor = PdfExtractor::new().with_max_pages(self.max_pages);
                extractor.load(data)?;
                let text = extractor.extract_text()?;
                Ok(ExtractedDocument {
                    text,
                    format,
                    page_count: Some(extractor.page_count()),
                })
            }
            DocumentFormat::PlainText => {
                let text = std::str::from_utf8(data).map_err(|_| {
                    ExtractionError::UnsupportedFormat("text is not valid UTF-8".to_string())
                })?;
                if text.chars().any(is_binary_control) {
                    return Err(ExtractionError::UnsupportedFormat(
                        "text contains binary control characters".to_string(),
                    )
                    .into());
                }
                Ok(ExtractedDocument {
                    text: text.to_string(),
                    format,
                    page_count: None,
                })
            }
        }
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_file_size_bytes {
            return Err(ResourceLimitExceeded::FileSize {
                size,
                limit: self.max_file_size_bytes,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// Tab, line feed, carriage return and form feed occur in real text files.
fn is_binary_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x0c')
}

/// Extract the text of a stored file with default limits.
pub fn extract_text(path: &Path) -> Result<ExtractedDocument> {
    TextExtractor::new().extract_file(path)
}
