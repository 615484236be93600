//! # ud-core
//!
//! Core types and utilities for UserDirectory RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The error taxonomy (`UdError`) and field-scoped `ValidationErrors`
//! - Result type aliases
//! - Configuration loading

pub mod config;
pub mod error;
pub mod result;

pub use error::*;
pub use result::*;
