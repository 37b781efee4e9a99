//! Marketplace workflows over the hosted document store: user profiles, job
//! postings, and applications. Each workflow follows the same shape: domain
//! records, a storage contract, a service composing the rules, and an HTTP
//! router exposing the screen-facing operations.

pub mod applications;
pub mod jobs;
pub mod profiles;

/// Error enumeration for document-store failures, shared by the collection
/// stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("this account is not allowed to perform that action")]
    PermissionDenied,
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}
