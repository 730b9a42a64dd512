//! Artifact publishing: binary copies and checksum sidecars
//!
//! - **artifact**: versioned + latest binary copies into the publish layout
//! - **checksum**: streaming MD5 and `.md5` sidecar stamping

pub mod artifact;
pub mod checksum;
