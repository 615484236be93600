//! CLI command definitions and terminal plumbing.
//!
//! Uses clap derive macros for argument definitions.

pub mod args;
pub mod console;
