//! External firmware compiler invocation
//!
//! Runs `<compiler> compile <config.yaml>` synchronously and blocks until it
//! exits. Success is determined solely by a zero exit code; stderr is
//! captured and surfaced only on failure. No retries and no timeout, a hung
//! compiler hangs the run.

use crate::core::error::{ReleaseError, ReleaseResult};
use std::path::Path;
use std::process::Command;

/// Compile one variant's configuration with the external compiler.
pub fn compile_variant(compiler: &str, config: &Path) -> ReleaseResult<()> {
  let output = Command::new(compiler)
    .arg("compile")
    .arg(config)
    .output()
    .map_err(|e| ReleaseError::message(format!("failed to run `{}`: {}", compiler, e)))?;

  if !output.status.success() {
    return Err(ReleaseError::Compiler {
      command: format!("{} compile {}", compiler, config.display()),
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    });
  }

  Ok(())
}
