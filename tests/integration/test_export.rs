//! Integration tests for `release-ledger export`

use crate::helpers::{TestLedger, path_arg, run_ledger};
use anyhow::Result;
use release_ledger::{Ledger, read_release_dir};
use std::collections::BTreeMap;

fn entry_counts(ledger: &Ledger) -> BTreeMap<String, usize> {
  ledger
    .releases()
    .iter()
    .map(|r| (r.version.to_string(), r.changelog.len()))
    .collect()
}

fn round_trip(format: &str) -> Result<()> {
  let source = TestLedger::with_fixtures()?;
  let out = TestLedger::new()?;

  let output = run_ledger(&[
    "export",
    &path_arg(&source.path),
    "--out",
    &path_arg(&out.path),
    "--format",
    format,
  ])?;
  assert!(String::from_utf8_lossy(&output.stdout).contains("Exported 2 release(s)"));
  assert!(out.path.join(format!("0.7.1.{}", format)).is_file());

  let original = Ledger::load(read_release_dir(&source.path)?.records)?;
  let reloaded = Ledger::load(read_release_dir(&out.path)?.records)?;
  assert_eq!(entry_counts(&reloaded), entry_counts(&original));

  // Exported records validate as cleanly as the originals
  run_ledger(&["validate", &path_arg(&out.path), "--strict"])?;
  Ok(())
}

#[test]
fn test_export_toml_round_trip() -> Result<()> {
  round_trip("toml")
}

#[test]
fn test_export_json_round_trip() -> Result<()> {
  round_trip("json")
}

#[test]
fn test_to_records_reloads_identically() -> Result<()> {
  let source = TestLedger::with_fixtures()?;
  let ledger = Ledger::load(read_release_dir(&source.path)?.records)?;

  let reloaded = Ledger::load(ledger.to_records())?;
  let versions = |l: &Ledger| l.releases().iter().map(|r| r.version.clone()).collect::<Vec<_>>();
  assert_eq!(versions(&reloaded), versions(&ledger));
  assert_eq!(entry_counts(&reloaded), entry_counts(&ledger));
  Ok(())
}
