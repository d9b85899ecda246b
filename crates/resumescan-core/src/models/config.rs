//! Configuration structures for the scanning pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AtsError, Result};
use crate::scoring::KeywordSet;

/// Main configuration for resumescan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsConfig {
    /// Text extraction bounds.
    pub extraction: ExtractionConfig,

    /// Keyword policy.
    pub scoring: ScoringConfig,
}

/// Text extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Largest document accepted, in bytes.
    pub max_file_size_bytes: u64,

    /// Most pages accepted in a paged document.
    pub max_pages: u32,

    /// Wall-clock bound on a single extraction, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            max_pages: 50,
            timeout_ms: 30_000,
        }
    }
}

/// Keyword scoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Default keyword policy, used when a job posting has none of its own.
    pub keywords: KeywordSet,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keywords: KeywordSet::new(["react", "node", "javascript", "mysql", "html", "css", "api"]),
        }
    }
}

impl AtsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AtsError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| AtsError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| AtsError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| AtsError::Config(format!("{}: {}", path.display(), e)))
    }
}
