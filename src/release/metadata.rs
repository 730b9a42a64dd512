//! Metadata extraction from the base configuration document
//!
//! Pulls the `version:` and `name:` scalars out of the base YAML with a
//! first-match pattern search. This is deliberately not a YAML parser: the
//! base configuration is owned by the firmware compiler and treated as an
//! opaque collaborator, we only need two scalars out of it.

use regex::Regex;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?m)^\s*version:\s*"?([^\s"]+)"?"#).expect("valid regex"));

static NAME_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?m)^\s*name:\s*"?([^\s"]+)"?"#).expect("valid regex"));

/// Version and project name scalars from the base configuration
///
/// Either field may be absent; callers decide whether that is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
  pub version: Option<String>,
  pub name: Option<String>,
}

/// Extract the first `version:` and `name:` scalars from the document text.
///
/// Accepts quoted and bare scalar values.
pub fn extract(text: &str) -> ProjectMetadata {
  ProjectMetadata {
    version: first_capture(&VERSION_RE, text),
    name: first_capture(&NAME_RE, text),
  }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
  re.captures(text).map(|c| c[1].to_string())
}
