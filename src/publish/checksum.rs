//! Checksum stamping for published binaries
//!
//! The `.md5` sidecar next to each `-latest.bin` is an external contract:
//! update clients fetch it to verify the binary they downloaded. MD5, lowercase
//! hex, no trailing newline.

use crate::core::error::{ReleaseResult, ResultExt};
use md5::{Digest, Md5};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

const CHUNK_SIZE: usize = 4096;

/// Streaming MD5 over a file, fixed-size chunked reads.
pub fn md5_checksum(path: &Path) -> ReleaseResult<String> {
  let mut file =
    File::open(path).with_context(|| format!("Failed to open {} for hashing", path.display()))?;

  let mut hasher = Md5::new();
  let mut chunk = [0u8; CHUNK_SIZE];
  loop {
    let n = file
      .read(&mut chunk)
      .with_context(|| format!("Failed to read {}", path.display()))?;
    if n == 0 {
      break;
    }
    hasher.update(&chunk[..n]);
  }

  Ok(format!("{:x}", hasher.finalize()))
}

/// Sidecar checksum path for a published binary (`foo-latest.bin` -> `foo-latest.md5`)
pub fn sidecar_path(binary: &Path) -> PathBuf {
  binary.with_extension("md5")
}

/// Hash the latest binary and write the digest to its sidecar file.
///
/// Overwrites any prior checksum. Returns the digest for descriptor rendering.
pub fn stamp(latest: &Path) -> ReleaseResult<String> {
  let digest = md5_checksum(latest)?;
  let sidecar = sidecar_path(latest);
  fs::write(&sidecar, &digest)
    .with_context(|| format!("Failed to write checksum to {}", sidecar.display()))?;
  Ok(digest)
}
