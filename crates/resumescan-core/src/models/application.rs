//! Scanned application records.

use std::cmp::Ordering;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{MatchReport, MatchScore};

/// One scored resume, as the submission handler would persist it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedApplication {
    /// Applicant name or email, if known.
    pub applicant: Option<String>,
    /// Job posting the resume was scored for.
    pub job: Option<String>,
    /// Where the resume is stored.
    pub resume_path: PathBuf,
    /// Match percentage.
    pub score: MatchScore,
    /// Keywords found.
    pub matched: Vec<String>,
    /// Keywords not found.
    pub missing: Vec<String>,
    /// When the resume was scored.
    pub scanned_at: DateTime<Utc>,
}

impl ScannedApplication {
    /// Build a record from a finished match report, stamped now.
    pub fn new(resume_path: impl Into<PathBuf>, report: MatchReport) -> Self {
        Self {
            applicant: None,
            job: None,
            resume_path: resume_path.into(),
            score: report.score,
            matched: report.matched,
            missing: report.missing,
            scanned_at: Utc::now(),
        }
    }

    pub fn with_applicant(mut self, applicant: impl Into<String>) -> Self {
        self.applicant = Some(applicant.into());
        self
    }

    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Listing order: highest score first, then by path.
    pub fn rank_order(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.resume_path.cmp(&other.resume_path))
    }
}

/// Sort applications for listing, best match first.
pub fn rank(applications: &mut [ScannedApplication]) {
    applications.sort_by(ScannedApplication::rank_order);
}
