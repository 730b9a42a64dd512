//! Publishing compiled binaries into the release layout
//!
//! Copies the compiler's output binary to two destinations under the
//! variant's publish folder: a versioned filename (dots in the version
//! replaced by hyphens) and a rolling `-latest` filename that is overwritten
//! on every successful run.

use crate::core::config::Variant;
use crate::core::error::{ReleaseResult, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the two published copies of a variant's binary
#[derive(Debug, Clone)]
pub struct PublishedArtifact {
  pub versioned: PathBuf,
  pub latest: PathBuf,
  /// Bare versioned filename, as referenced from the release descriptor
  pub versioned_filename: String,
}

/// Versioned binary filename for a variant, e.g. `quatt-duo-4relay-v1-2-3.bin`
pub fn versioned_filename(variant_id: &str, version: &str) -> String {
  format!("{}-v{}.bin", variant_id, version.replace('.', "-"))
}

/// Rolling latest binary filename for a variant
pub fn latest_filename(variant_id: &str) -> String {
  format!("{}-latest.bin", variant_id)
}

/// Copy the compiled binary into the variant's publish folder.
///
/// Fails if the compiled file does not exist, e.g. when the compiler reported
/// success but produced no output.
pub fn publish(
  compiled: &Path,
  publish_root: &Path,
  variant: &Variant,
  version: &str,
) -> ReleaseResult<PublishedArtifact> {
  let folder = publish_root.join(&variant.folder);
  fs::create_dir_all(&folder)
    .with_context(|| format!("Failed to create publish folder {}", folder.display()))?;

  let versioned_name = versioned_filename(&variant.id, version);
  let versioned = folder.join(&versioned_name);
  let latest = folder.join(latest_filename(&variant.id));

  fs::copy(compiled, &versioned).with_context(|| {
    format!(
      "Failed to copy {} to {}",
      compiled.display(),
      versioned.display()
    )
  })?;
  fs::copy(compiled, &latest).with_context(|| {
    format!(
      "Failed to copy {} to {}",
      compiled.display(),
      latest.display()
    )
  })?;

  Ok(PublishedArtifact {
    versioned,
    latest,
    versioned_filename: versioned_name,
  })
}
