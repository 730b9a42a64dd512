//! Metadata command: inspect the scalars the pipeline extracts

use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::release::metadata;
use std::env;
use std::fs;

/// Run the metadata command
pub fn run_metadata(json: bool) -> ReleaseResult<()> {
  let cwd = env::current_dir()?;
  let config = ReleaseConfig::load(&cwd)?;

  let base_text = fs::read_to_string(&config.paths.base_config).with_context(|| {
    format!(
      "Failed to read base configuration {}",
      config.paths.base_config.display()
    )
  })?;
  let meta = metadata::extract(&base_text);

  if json {
    println!(
      "{}",
      serde_json::to_string_pretty(&serde_json::json!({
        "version": meta.version,
        "name": meta.name,
      }))?
    );
  } else {
    println!("📄 {}", config.paths.base_config.display());
    println!(
      "   Version: {}",
      meta.version.as_deref().unwrap_or("(not found)")
    );
    println!(
      "   Name:    {}",
      meta.name.as_deref().unwrap_or("(not found)")
    );
  }

  Ok(())
}
