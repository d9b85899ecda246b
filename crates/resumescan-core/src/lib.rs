//! Core library for resume scanning.
//!
//! This crate provides:
//! - Document text extraction (PDF text layer, plain text)
//! - Keyword match scoring against a caller-supplied policy
//! - Scanned-application records and ranking
//! - A blocking and an async extract-then-score pipeline

pub mod document;
pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod scoring;

pub use document::{DocumentFormat, ExtractedDocument, TextExtractor, extract_text};
pub use error::{AtsError, ExtractionError, ResourceLimitExceeded, Result, ScoringError};
pub use models::application::{ScannedApplication, rank};
pub use models::config::AtsConfig;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::{ScanOutcome, scan_file, scan_file_async};
pub use scoring::{KeywordSet, MatchReport, MatchScore, compute_score, score_document};
