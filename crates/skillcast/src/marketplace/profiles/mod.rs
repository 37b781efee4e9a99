//! User profile records: the per-identity document gating the screen flows.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{EmployerProfileForm, Profile, ProfileViolation, Role, StudentProfileForm};
pub use repository::ProfileStore;
pub use router::profile_router;
pub use service::{ProfileService, ProfileServiceError};
