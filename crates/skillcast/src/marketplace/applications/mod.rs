//! Application intake and review: students apply to postings, employers
//! accept or reject, students may withdraw while pending.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantView, Application, ApplicationId, ApplicationStatus, ApplicationViolation,
};
pub use repository::ApplicationStore;
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError};
