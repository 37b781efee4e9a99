use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::IdentityId;
use crate::marketplace::jobs::JobId;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Review status set by the owning employer. Transitions are not
/// state-machine enforced; an employer may overwrite any status with any
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Record stored in the `applications` collection. Job and student fields
/// are denormalized at submission time so both inboxes render without joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub company_name: String,
    pub employer_id: IdentityId,
    pub student_id: IdentityId,
    pub student_name: String,
    pub student_email: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Employer-side row for a posting's applicant list, with the student's
/// current profile joined in where available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantView {
    pub application: Application,
    pub student_name: String,
    pub student_email: String,
}

/// Validation errors raised before an application write is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationViolation {
    #[error("please write a short note or cover letter")]
    MissingCoverLetter,
    #[error("an application for this job already exists")]
    AlreadyApplied,
    #[error("this job is no longer accepting applications")]
    JobClosed,
    #[error("only student accounts can apply to jobs")]
    NotAStudent,
    #[error("only pending applications can be withdrawn")]
    NotPending,
}
