//! The client-side session core.
//!
//! [`Session`] holds the authoritative, reactive view of who is signed in
//! and which profile record backs them; [`Flow`] maps each snapshot of that
//! view to exactly one screen flow. Everything else in the application hangs
//! off these two pieces.

pub mod flow;
mod holder;
pub mod router;
mod snapshot;

#[cfg(test)]
mod tests;

pub use flow::Flow;
pub use holder::{Session, SessionError};
pub use router::session_router;
pub use snapshot::SessionSnapshot;
