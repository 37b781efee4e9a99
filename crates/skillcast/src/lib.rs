//! Core library for the SkillCast student job board.
//!
//! The hosted authentication provider and document database are external
//! collaborators, reached only through the traits in [`auth`] and the
//! per-collection stores under [`marketplace`]. Everything reactive in the
//! client (who is signed in, which screen flow to show) funnels through
//! [`session`].

pub mod auth;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod memory;
pub mod session;
pub mod subscription;
pub mod telemetry;
