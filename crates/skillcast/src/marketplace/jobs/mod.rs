//! Job postings: employer-owned listings with a soft active/inactive
//! lifecycle.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{parse_skill_list, JobDraft, JobId, JobPosting, JobViolation};
pub use repository::JobStore;
pub use router::job_router;
pub use service::{JobService, JobServiceError};
