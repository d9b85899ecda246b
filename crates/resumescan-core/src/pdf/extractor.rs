//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace};

use super::PdfProcessor;
use crate::error::{ExtractionError, ResourceLimitExceeded, Result};

/// PDF text-layer extractor.
///
/// lopdf validates the structure and handles encryption; pdf-extract walks
/// the content streams for text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    max_pages: Option<u32>,
}

impl PdfExtractor {
    /// Create a new PDF extractor with no page limit.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_pages: None,
        }
    }

    /// Reject documents with more than `max_pages` pages on load.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc =
            Document::load_mem(data).map_err(|e| ExtractionError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(ExtractionError::Encrypted.into());
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads bytes, not the lopdf document
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data).map_err(|e| {
                ExtractionError::Parse(format!("failed to save decrypted PDF: {}", e))
            })?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(ExtractionError::NoPages.into());
        }
        if let Some(limit) = self.max_pages {
            if page_count > limit {
                return Err(ResourceLimitExceeded::PageCount {
                    pages: page_count,
                    limit,
                }
                .into());
            }
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(ExtractionError::Parse("no document loaded".to_string()).into());
        }

        // pdf-extract panics on some malformed content streams
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&self.raw_data)
        }));

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(ExtractionError::Parse(e.to_string()).into()),
            Err(_) => {
                return Err(
                    ExtractionError::Parse("text layer could not be decoded".to_string()).into(),
                );
            }
        };

        trace!("pdf-extract returned {} chars", text.len());

        if text.trim().is_empty() {
            return Err(ExtractionError::NoTextLayer.into());
        }

        Ok(text)
    }
}
