//! PDF processing module.

mod extractor;

#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::PdfExtractor;

use crate::error::Result;

/// Trait for PDF text-layer readers.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the loaded PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF, in text-layer order.
    fn extract_text(&self) -> Result<String>;
}
