use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::IdentityId;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Posting stored in the `jobs` collection. The employer's contact email and
/// the company label are denormalized onto the record so listings render
/// without a join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub employer_id: IdentityId,
    pub employer_email: String,
    pub company: String,
    pub title: String,
    pub description: String,
    pub salary: String,
    pub skills: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields collected from the posting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub description: String,
    pub salary: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobDraft {
    pub fn validate(&self) -> Result<(), JobViolation> {
        if self.title.trim().is_empty()
            || self.company.trim().is_empty()
            || self.description.trim().is_empty()
            || self.salary.trim().is_empty()
        {
            return Err(JobViolation::IncompleteForm);
        }
        Ok(())
    }
}

/// Validation errors raised before a posting write is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobViolation {
    #[error("please fill in title, company, description, and salary")]
    IncompleteForm,
    #[error("only employer accounts can manage job postings")]
    NotAnEmployer,
}

/// Split a comma-separated skills field into trimmed, non-empty entries.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty())
        .collect()
}
