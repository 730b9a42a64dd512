//! Integration tests for `quatt-release build`

use crate::helpers::{run_quatt_release, run_quatt_release_raw, TestWorkspace};
use anyhow::Result;
use md5::{Digest, Md5};

fn md5_hex(data: &[u8]) -> String {
  format!("{:x}", Md5::new_with_prefix(data).finalize())
}

#[test]
fn test_single_variant_scenario() -> Result<()> {
  let ws = TestWorkspace::single_variant()?;

  let output = run_quatt_release(&ws.path, &["build"])?;

  // Operator output names the full versioned path
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("publish/single/quatt-single-2relay-v1-2-3.bin"));

  // Versioned + latest binaries under the variant folder
  assert!(ws.file_exists("publish/single/quatt-single-2relay-v1-2-3.bin"));
  assert!(ws.file_exists("publish/single/quatt-single-2relay-latest.bin"));

  // Checksum sidecar holds the digest of the latest binary, no newline
  let latest = ws.read_bytes("publish/single/quatt-single-2relay-latest.bin")?;
  let sidecar = ws.read_file("publish/single/quatt-single-2relay-latest.md5")?;
  assert_eq!(sidecar, md5_hex(&latest));
  assert!(!sidecar.ends_with('\n'));

  // Descriptor under the publish root with every token substituted
  let descriptor = ws.read_file("publish/quatt-single-2relay-release.json")?;
  assert!(descriptor.contains(&md5_hex(&latest)));
  assert!(descriptor.contains("single/quatt-single-2relay-v1-2-3.bin"));
  assert!(descriptor.contains("\"version\": \"1.2.3\""));
  assert!(!descriptor.contains("##"));

  Ok(())
}

#[test]
fn test_full_variant_table() -> Result<()> {
  let ws = TestWorkspace::new(
    "2.0.1",
    &[
      ("quatt-single-2relay", "single"),
      ("quatt-duo-2relay", "duo"),
      ("quatt-single-4relay", "single"),
      ("quatt-duo-4relay", "duo"),
    ],
  )?;

  run_quatt_release(&ws.path, &["build"])?;

  for (id, folder) in [
    ("quatt-single-2relay", "single"),
    ("quatt-duo-2relay", "duo"),
    ("quatt-single-4relay", "single"),
    ("quatt-duo-4relay", "duo"),
  ] {
    assert!(ws.file_exists(&format!("publish/{}/{}-v2-0-1.bin", folder, id)));
    assert!(ws.file_exists(&format!("publish/{}/{}-latest.bin", folder, id)));
    assert!(ws.file_exists(&format!("publish/{}/{}-latest.md5", folder, id)));
    assert!(ws.file_exists(&format!("publish/{}-release.json", id)));
  }

  Ok(())
}

#[test]
fn test_pipeline_is_idempotent() -> Result<()> {
  let ws = TestWorkspace::single_variant()?;

  run_quatt_release(&ws.path, &["build"])?;
  let bin = ws.read_bytes("publish/single/quatt-single-2relay-latest.bin")?;
  let md5 = ws.read_bytes("publish/single/quatt-single-2relay-latest.md5")?;
  let desc = ws.read_bytes("publish/quatt-single-2relay-release.json")?;

  run_quatt_release(&ws.path, &["build"])?;
  assert_eq!(
    ws.read_bytes("publish/single/quatt-single-2relay-latest.bin")?,
    bin
  );
  assert_eq!(
    ws.read_bytes("publish/single/quatt-single-2relay-latest.md5")?,
    md5
  );
  assert_eq!(ws.read_bytes("publish/quatt-single-2relay-release.json")?, desc);

  Ok(())
}

#[test]
fn test_checksum_tracks_payload_changes() -> Result<()> {
  let ws = TestWorkspace::single_variant()?;

  run_quatt_release(&ws.path, &["build"])?;
  let first = ws.read_file("publish/single/quatt-single-2relay-latest.md5")?;

  ws.set_payload(b"firmware payload v2")?;
  run_quatt_release(&ws.path, &["build"])?;
  let second = ws.read_file("publish/single/quatt-single-2relay-latest.md5")?;

  assert_ne!(first, second);
  assert_eq!(second, md5_hex(b"firmware payload v2"));

  Ok(())
}

#[test]
fn test_compiler_failure_does_not_block_other_variants() -> Result<()> {
  let ws = TestWorkspace::new(
    "1.2.3",
    &[
      ("quatt-single-2relay", "single"),
      ("quatt-duo-2relay", "duo"),
      ("quatt-single-4relay", "single"),
      ("quatt-duo-4relay", "duo"),
    ],
  )?;
  ws.fail_variant("quatt-single-2relay")?;

  let output = run_quatt_release_raw(&ws.path, &["build"])?;

  // Failed run exits non-zero but still processes the remaining variants
  assert!(!output.status.success());
  assert!(!ws.file_exists("publish/single/quatt-single-2relay-latest.bin"));
  assert!(ws.file_exists("publish/duo/quatt-duo-2relay-latest.bin"));
  assert!(ws.file_exists("publish/single/quatt-single-4relay-latest.bin"));
  assert!(ws.file_exists("publish/duo/quatt-duo-4relay-latest.bin"));

  // Compiler stderr is surfaced to the operator
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("quatt-single-2relay"));
  assert!(stdout.contains("Compilation failed"));

  Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
  let ws = TestWorkspace::new(
    "1.2.3",
    &[
      ("quatt-single-2relay", "single"),
      ("quatt-duo-2relay", "duo"),
    ],
  )?;
  ws.fail_variant("quatt-duo-2relay")?;

  let output = run_quatt_release_raw(&ws.path, &["build", "--json"])?;
  assert!(!output.status.success());

  let stdout = String::from_utf8_lossy(&output.stdout);
  let outcomes: serde_json::Value = serde_json::from_str(&stdout)?;
  let outcomes = outcomes.as_array().expect("array of outcomes");
  assert_eq!(outcomes.len(), 2);

  assert_eq!(outcomes[0]["variant"], "quatt-single-2relay");
  assert_eq!(outcomes[0]["success"], true);
  assert!(outcomes[0]["checksum"].is_string());

  assert_eq!(outcomes[1]["variant"], "quatt-duo-2relay");
  assert_eq!(outcomes[1]["success"], false);
  assert!(outcomes[1]["error"].is_string());

  Ok(())
}

#[test]
fn test_only_flag_restricts_to_one_variant() -> Result<()> {
  let ws = TestWorkspace::new(
    "1.2.3",
    &[
      ("quatt-single-2relay", "single"),
      ("quatt-duo-2relay", "duo"),
    ],
  )?;

  run_quatt_release(&ws.path, &["build", "--only", "quatt-duo-2relay"])?;

  assert!(ws.file_exists("publish/duo/quatt-duo-2relay-latest.bin"));
  assert!(!ws.file_exists("publish/single/quatt-single-2relay-latest.bin"));

  Ok(())
}

#[test]
fn test_only_flag_rejects_unknown_variant() -> Result<()> {
  let ws = TestWorkspace::single_variant()?;

  let output = run_quatt_release_raw(&ws.path, &["build", "--only", "quatt-trio-8relay"])?;
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("quatt-trio-8relay"));
  assert!(stderr.contains("quatt-single-2relay"), "should list known variants");

  Ok(())
}

#[test]
fn test_missing_version_scalar_is_fatal() -> Result<()> {
  let ws = TestWorkspace::single_variant()?;
  std::fs::write(
    ws.path.join("yaml/packages/base.yaml"),
    "substitutions:\n  name: quatt\n",
  )?;

  let output = run_quatt_release_raw(&ws.path, &["build"])?;
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("version"));
  // nothing was published
  assert!(!ws.file_exists("publish/single"));

  Ok(())
}
