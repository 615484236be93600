//! # ud-models
//!
//! Domain models for UserDirectory RS.

pub mod user;

pub use user::*;
