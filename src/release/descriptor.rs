//! Release descriptor rendering
//!
//! A release descriptor records where a published version lives and its
//! integrity checksum. Rendering is verbatim token substitution over the
//! template text: order-independent, idempotent, and a pure function of its
//! inputs so nothing is shared between variant iterations.

use crate::core::error::{ReleaseError, ReleaseResult};
use regex::Regex;
use std::sync::LazyLock;

const MD5_TOKEN: &str = "##MD5##";
const FILE_TOKEN: &str = "##FILE##";
const FOLDER_TOKEN: &str = "##FOLDER##";
const VERSION_TOKEN: &str = "##VERSION##";

static TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"##[A-Z0-9_]+##").expect("valid regex"));

/// Values substituted into a descriptor template
#[derive(Debug, Clone)]
pub struct Substitutions<'a> {
  /// Hex MD5 digest of the latest binary
  pub checksum: &'a str,
  /// Versioned binary filename, e.g. `quatt-duo-4relay-v1-2-3.bin`
  pub filename: &'a str,
  /// Publish folder for the variant
  pub folder: &'a str,
  /// Version string as extracted, dots intact
  pub version: &'a str,
}

/// Render a descriptor from the template text.
///
/// Fails if any `##...##` token survives substitution.
pub fn render(template: &str, subs: &Substitutions<'_>) -> ReleaseResult<String> {
  let rendered = template
    .replace(MD5_TOKEN, subs.checksum)
    .replace(FILE_TOKEN, subs.filename)
    .replace(FOLDER_TOKEN, subs.folder)
    .replace(VERSION_TOKEN, subs.version);

  if let Some(stray) = TOKEN_RE.find(&rendered) {
    return Err(ReleaseError::with_help(
      format!("unreplaced token {} in release descriptor template", stray.as_str()),
      "Supported tokens are ##MD5##, ##FILE##, ##FOLDER## and ##VERSION##",
    ));
  }

  Ok(rendered)
}
