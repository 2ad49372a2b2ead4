use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewKind {
    Ai,
    Human,
}

/// A scheduled interview for a job application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub applicant_id: String,
    pub applicant_name: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: String,

    /// Planned length in minutes
    pub duration_minutes: u32,

    pub status: InterviewStatus,
    pub kind: InterviewKind,

    /// Score recorded for a completed AI interview. Not derived from session answers.
    pub ai_score: Option<u8>,
    pub ai_summary: Option<String>,
}

impl Interview {
    /// Path of the results view a completed session hands over to
    pub fn results_path(&self) -> String {
        format!("/job-seeker/interviews/{}/results", self.id)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Interview {0} not found")]
    NotFound(String),
}

/// Read-only lookup of interview records by id
#[derive(Debug, Clone, Default)]
pub struct InterviewCatalog {
    interviews: Vec<Interview>,
}

impl InterviewCatalog {
    pub fn new(interviews: Vec<Interview>) -> Self {
        Self { interviews }
    }

    pub fn find(&self, id: &str) -> Result<&Interview, CatalogError> {
        self.interviews
            .iter()
            .find(|interview| interview.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Interviews scheduled for an applicant
    pub fn for_applicant<'a>(&'a self, applicant_id: &'a str) -> impl Iterator<Item = &'a Interview> {
        self.interviews
            .iter()
            .filter(move |interview| interview.applicant_id == applicant_id)
    }

    pub fn len(&self) -> usize {
        self.interviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interviews.is_empty()
    }
}
