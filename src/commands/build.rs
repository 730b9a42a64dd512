//! Build command: the full compile-and-publish pipeline
//!
//! Extracts metadata once, then processes each variant strictly in table
//! order: compile, publish binaries, stamp checksum, write the release
//! descriptor. Variants are isolated from each other: any per-variant error
//! (compiler or filesystem) is recorded as that variant's outcome and the
//! remaining variants still run. The command exits non-zero if any variant
//! failed.

use crate::compile;
use crate::core::config::{ReleaseConfig, Variant};
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::publish::{artifact, checksum};
use crate::release::{descriptor, metadata};
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of processing one variant, as reported to the operator
#[derive(Debug, Clone, Serialize)]
pub struct VariantOutcome {
  pub variant: String,
  pub folder: String,
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub checksum: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub versioned_file: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// Artifacts produced for a successfully processed variant
#[derive(Debug)]
struct PublishedVariant {
  checksum: String,
  versioned_filename: String,
  /// Full path of the versioned copy, for operator output
  versioned: PathBuf,
}

/// Run the build command
pub fn run_build(only: Option<String>, json: bool) -> ReleaseResult<()> {
  let cwd = env::current_dir()?;
  let config = ReleaseConfig::load(&cwd)?;

  // Metadata is extracted once per run and read-only thereafter
  let base_text = fs::read_to_string(&config.paths.base_config).with_context(|| {
    format!(
      "Failed to read base configuration {}",
      config.paths.base_config.display()
    )
  })?;
  let meta = metadata::extract(&base_text);
  let version = meta.version.ok_or_else(|| missing_field("version", &config))?;
  let project_name = meta.name.ok_or_else(|| missing_field("name", &config))?;

  // Template is read once and rendered per variant as a pure function
  let template = fs::read_to_string(&config.paths.template).with_context(|| {
    format!(
      "Failed to read descriptor template {}",
      config.paths.template.display()
    )
  })?;

  // One compiled-artifact path for all variants, derived from the project
  // name. Stale-artifact hazard if the compile step is skipped; see
  // ReleaseConfig::compiled_artifact.
  let compiled = config.compiled_artifact(&project_name);

  let variants: Vec<&Variant> = match &only {
    Some(id) => vec![config.find_variant(id).ok_or_else(|| {
      ReleaseError::with_help(
        format!("unknown variant '{}'", id),
        format!(
          "Known variants: {}",
          config
            .variants
            .iter()
            .map(|v| v.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
        ),
      )
    })?],
    None => config.variants.iter().collect(),
  };

  if !json {
    println!("📦 {} v{}", project_name, version);
    println!();
  }

  let mut outcomes = Vec::with_capacity(variants.len());
  for variant in variants {
    if !json {
      println!("🔨 Compiling {}", variant.id);
    }

    match process_variant(&config, variant, &version, &template, &compiled) {
      Ok(published) => {
        if !json {
          println!("✅ {} → {}", variant.id, published.versioned.display());
          println!("   Checksum: {}", published.checksum);
        }
        outcomes.push(VariantOutcome {
          variant: variant.id.clone(),
          folder: variant.folder.clone(),
          success: true,
          checksum: Some(published.checksum),
          versioned_file: Some(published.versioned_filename),
          error: None,
        });
      }
      Err(err) => {
        if !json {
          println!("❌ {} failed", variant.id);
          println!("   {}", err);
        }
        outcomes.push(VariantOutcome {
          variant: variant.id.clone(),
          folder: variant.folder.clone(),
          success: false,
          checksum: None,
          versioned_file: None,
          error: Some(err.to_string()),
        });
      }
    }
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
  }

  let failed = outcomes.iter().filter(|o| !o.success).count();
  if failed > 0 {
    return Err(ReleaseError::message(format!(
      "{} of {} variant(s) failed",
      failed,
      outcomes.len()
    )));
  }

  if !json {
    println!();
    println!("✅ All {} variant(s) published", outcomes.len());
  }
  Ok(())
}

/// Linear per-variant sequence: invoke → publish → stamp → write descriptor
fn process_variant(
  config: &ReleaseConfig,
  variant: &Variant,
  version: &str,
  template: &str,
  compiled: &Path,
) -> ReleaseResult<PublishedVariant> {
  compile::compile_variant(&config.compiler, &config.variant_config(variant))?;

  let published = artifact::publish(compiled, &config.paths.publish_root, variant, version)?;
  let digest = checksum::stamp(&published.latest)?;

  let rendered = descriptor::render(
    template,
    &descriptor::Substitutions {
      checksum: &digest,
      filename: &published.versioned_filename,
      folder: &variant.folder,
      version,
    },
  )?;
  let descriptor_path = descriptor_path(&config.paths.publish_root, variant);
  fs::write(&descriptor_path, rendered).with_context(|| {
    format!(
      "Failed to write release descriptor {}",
      descriptor_path.display()
    )
  })?;

  Ok(PublishedVariant {
    checksum: digest,
    versioned_filename: published.versioned_filename,
    versioned: published.versioned,
  })
}

/// Release descriptors live directly under the publish root, not inside the
/// variant folder
fn descriptor_path(publish_root: &Path, variant: &Variant) -> PathBuf {
  publish_root.join(format!("{}-release.json", variant.id))
}

fn missing_field(field: &str, config: &ReleaseConfig) -> ReleaseError {
  ReleaseError::Config(ConfigError::MissingField {
    field: field.to_string(),
    path: config.paths.base_config.clone(),
  })
}
