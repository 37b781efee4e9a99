//! In-process implementations of the external collaborators.
//!
//! The hosted auth provider and document database stay behind the traits in
//! [`crate::auth`] and [`crate::marketplace`]; this module provides the
//! in-memory backend used by the dev server, the CLI demo, and the test
//! suites. [`MemoryAuthProvider::verify_email`] stands in for the account
//! owner clicking the link in the verification email.

mod auth;
mod store;

pub use auth::MemoryAuthProvider;
pub use store::{MemoryApplicationStore, MemoryJobStore, MemoryProfileStore};
