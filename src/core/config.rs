use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for quatt-release
///
/// Loaded from `release.toml` in the invocation directory. Every field has a
/// default reproducing the historical layout, so the file is optional: with
/// no config at all the tool compiles the four stock Quatt variants with
/// `esphome` against the `../yaml` tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub paths: PathsConfig,

  /// External compiler command; invoked as `<compiler> compile <config.yaml>`
  #[serde(default = "default_compiler")]
  pub compiler: String,

  /// Build variant table, processed strictly in order
  #[serde(default = "default_variants")]
  pub variants: Vec<Variant>,
}

/// Input and output locations, all relative to the invocation directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
  /// Base configuration document holding the `version:` and `name:` scalars
  #[serde(default = "default_base_config")]
  pub base_config: PathBuf,

  /// Directory containing one `<variant-id>.yaml` per variant
  #[serde(default = "default_config_dir")]
  pub config_dir: PathBuf,

  /// Release descriptor template with `##MD5##` / `##FILE##` / `##FOLDER##` /
  /// `##VERSION##` tokens
  #[serde(default = "default_template")]
  pub template: PathBuf,

  /// Root of the compiler's build tree
  #[serde(default = "default_build_dir")]
  pub build_dir: PathBuf,

  /// Directory the per-variant publish folders live under
  #[serde(default = "default_publish_root")]
  pub publish_root: PathBuf,
}

/// One build variant: a firmware configuration id and its publish folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
  pub id: String,
  pub folder: String,
}

fn default_compiler() -> String {
  "esphome".to_string()
}

fn default_base_config() -> PathBuf {
  PathBuf::from("../yaml/packages/base.yaml")
}

fn default_config_dir() -> PathBuf {
  PathBuf::from("../yaml")
}

fn default_template() -> PathBuf {
  PathBuf::from("release-file-base.json")
}

fn default_build_dir() -> PathBuf {
  PathBuf::from("../yaml/.esphome/build")
}

fn default_publish_root() -> PathBuf {
  PathBuf::from("..")
}

fn default_variants() -> Vec<Variant> {
  [
    ("quatt-single-2relay", "single"),
    ("quatt-duo-2relay", "duo"),
    ("quatt-single-4relay", "single"),
    ("quatt-duo-4relay", "duo"),
  ]
  .into_iter()
  .map(|(id, folder)| Variant {
    id: id.to_string(),
    folder: folder.to_string(),
  })
  .collect()
}

impl Default for PathsConfig {
  fn default() -> Self {
    Self {
      base_config: default_base_config(),
      config_dir: default_config_dir(),
      template: default_template(),
      build_dir: default_build_dir(),
      publish_root: default_publish_root(),
    }
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      paths: PathsConfig::default(),
      compiler: default_compiler(),
      variants: default_variants(),
    }
  }
}

impl ReleaseConfig {
  /// Load config from `release.toml` in the given directory.
  ///
  /// A missing file is not an error; defaults apply.
  pub fn load(dir: &Path) -> ReleaseResult<Self> {
    let config_path = dir.join("release.toml");
    if !config_path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content).map_err(|e| {
      ReleaseError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        reason: e.to_string(),
      })
    })?;

    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> ReleaseResult<()> {
    if self.variants.is_empty() {
      return Err(ReleaseError::with_help(
        "variant table is empty",
        "Add at least one [[variants]] entry with `id` and `folder` to release.toml",
      ));
    }
    if self.compiler.trim().is_empty() {
      return Err(ReleaseError::with_help(
        "compiler command is empty",
        "Set `compiler = \"esphome\"` (or a compatible command) in release.toml",
      ));
    }
    Ok(())
  }

  /// Path of the variant-specific compiler configuration
  pub fn variant_config(&self, variant: &Variant) -> PathBuf {
    self.paths.config_dir.join(format!("{}.yaml", variant.id))
  }

  /// Path where the compiler deposits its output binary.
  ///
  /// Derived from the project name only. All variants read the same path, so
  /// each variant's publish step must run immediately after its own compile.
  pub fn compiled_artifact(&self, project_name: &str) -> PathBuf {
    self
      .paths
      .build_dir
      .join(project_name)
      .join(".pioenvs")
      .join(project_name)
      .join("firmware.bin")
  }

  /// Find a variant by id
  pub fn find_variant(&self, id: &str) -> Option<&Variant> {
    self.variants.iter().find(|v| v.id == id)
  }
}
