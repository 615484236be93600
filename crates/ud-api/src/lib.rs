//! # ud-api
//!
//! REST handlers for the user endpoint.
//!
//! Serves the same contract the remote store consumes, backed by whichever
//! [`UserStore`](ud_store::UserStore) the caller hands in.

pub mod error;
pub mod handlers;
pub mod routes;

pub use routes::{router, AppState};
