//! Core building blocks for quatt-release
//!
//! - **config**: release.toml parsing, path layout, and the variant table
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod error;
