//! Extract-then-score pipeline for a single stored resume.
//!
//! `scan_file` is fully blocking. `scan_file_async` moves extraction onto
//! tokio's blocking pool and bounds it by `timeout_ms`, so a server's request
//! loop is never stalled by a slow document; scoring runs inline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::document::{ExtractedDocument, TextExtractor};
use crate::error::{ExtractionError, ResourceLimitExceeded, Result, ScoringError};
use crate::models::config::ExtractionConfig;
use crate::scoring::{KeywordSet, MatchReport, score_document};

/// Extracted document and its score.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub document: ExtractedDocument,
    pub report: MatchReport,
}

/// Extract `path` and score it against `keywords`, blocking the caller.
pub fn scan_file(
    path: &Path,
    keywords: &KeywordSet,
    config: &ExtractionConfig,
) -> Result<ScanOutcome> {
    ensure_keywords(keywords)?;

    let document = TextExtractor::from_config(config).extract_file(path)?;
    let report = score_document(&document.text, keywords)?;
    debug!("{}: score {}", path.display(), report.score);

    Ok(ScanOutcome { document, report })
}

/// Extract `path` off the async executor, then score it.
pub async fn scan_file_async(
    path: PathBuf,
    keywords: &KeywordSet,
    config: &ExtractionConfig,
) -> Result<ScanOutcome> {
    ensure_keywords(keywords)?;

    let document = extract_file_async(path.clone(), config).await?;
    let report = score_document(&document.text, keywords)?;
    debug!("{}: score {}", path.display(), report.score);

    Ok(ScanOutcome { document, report })
}

/// Extract `path` on the blocking pool, bounded by `config.timeout_ms`.
pub async fn extract_file_async(
    path: PathBuf,
    config: &ExtractionConfig,
) -> Result<ExtractedDocument> {
    let extractor = TextExtractor::from_config(config);
    let task = tokio::task::spawn_blocking(move || extractor.extract_file(&path));
    within_limit(config.timeout_ms, task).await
}

// An elapsed task keeps running on the blocking pool; only its result is dropped.
async fn within_limit<T>(limit_ms: u64, task: JoinHandle<Result<T>>) -> Result<T> {
    match tokio::time::timeout(Duration::from_millis(limit_ms), task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(ExtractionError::Task(join_err.to_string()).into()),
        Err(_) => Err(ResourceLimitExceeded::Timeout { limit_ms }.into()),
    }
}

// Checked up front so a bad policy never pays for extraction.
fn ensure_keywords(keywords: &KeywordSet) -> Result<()> {
    if keywords.is_empty() {
        return Err(ScoringError::EmptyKeywordSet.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtsError;
    use crate::pdf::fixtures::build_text_pdf;
    use pretty_assertions::assert_eq;

    fn web_stack() -> KeywordSet {
        KeywordSet::new(["react", "node", "javascript", "mysql", "html", "css", "api"])
    }

    fn write_resume(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, build_text_pdf(&[lines])).unwrap();
        path
    }

    #[test]
    fn test_scan_pdf_resume() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_resume(
            dir.path(),
            "resume.pdf",
            &["Experienced React and Node developer, skilled in MySQL"],
        );

        let outcome = scan_file(&path, &web_stack(), &ExtractionConfig::default()).unwrap();
        assert_eq!(outcome.report.matched, vec!["react", "node", "mysql"]);
        assert_eq!(outcome.report.score.value(), 43);
    }

    #[test]
    fn test_scan_rejects_empty_policy_before_reading() {
        // The file does not exist; the policy error must win.
        let err = scan_file(
            Path::new("/nonexistent.pdf"),
            &KeywordSet::default(),
            &ExtractionConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AtsError::Scoring(ScoringError::EmptyKeywordSet)));
    }

    #[test]
    fn test_scan_corrupt_file_reports_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let err = scan_file(&path, &web_stack(), &ExtractionConfig::default()).unwrap_err();
        assert!(matches!(err, AtsError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_scan_file_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_resume(dir.path(), "resume.pdf", &["HTML, CSS and JavaScript"]);

        let outcome = scan_file_async(path, &web_stack(), &ExtractionConfig::default())
            .await
            .unwrap();
        assert_eq!(outcome.report.matched, vec!["javascript", "html", "css"]);
        assert_eq!(outcome.document.page_count, Some(1));
    }

    #[tokio::test]
    async fn test_async_missing_file() {
        let err = extract_file_async(
            PathBuf::from("/nonexistent/resume.pdf"),
            &ExtractionConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AtsError::Extraction(ExtractionError::Read { .. })));
    }

    #[tokio::test]
    async fn test_within_limit_times_out() {
        let task = tokio::task::spawn_blocking(|| {
            std::thread::sleep(Duration::from_millis(500));
            Ok(())
        });
        let err = within_limit(10, task).await.unwrap_err();
        assert!(matches!(
            err,
            AtsError::ResourceLimit(ResourceLimitExceeded::Timeout { limit_ms: 10 })
        ));
    }

    #[tokio::test]
    async fn test_within_limit_passes_result_through() {
        let task = tokio::task::spawn_blocking(|| Ok(7));
        assert_eq!(within_limit(1_000, task).await.unwrap(), 7);
    }
}
