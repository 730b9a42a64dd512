//! CLI commands for quatt-release
//!
//! - **build**: compile every variant and publish binaries, checksums, and
//!   release descriptors
//! - **metadata**: show the version and project name extracted from the base
//!   configuration

pub mod build;
pub mod metadata;

pub use build::run_build;
pub use metadata::run_metadata;
