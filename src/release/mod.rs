//! Release metadata and descriptors
//!
//! - **metadata**: version/name extraction from the base configuration
//! - **descriptor**: release descriptor template rendering

pub mod descriptor;
pub mod metadata;
