//! Integration tests for `release-ledger validate`

use crate::helpers::{TestLedger, path_arg, run_ledger, run_ledger_raw};
use anyhow::Result;
use release_ledger::{ChecksConfig, Ledger, WarningKind, check_record_set, check_records, read_release_dir, validate};

#[test]
fn test_fixture_records_are_clean() -> Result<()> {
  let dir = TestLedger::with_fixtures()?;

  let set = read_release_dir(&dir.path)?;
  assert!(set.errors.is_empty());
  let ledger = Ledger::load(set.records)?;
  let report = validate(&ledger, &ChecksConfig::default());

  assert!(report.errors.is_empty());
  assert!(report.warnings.is_empty(), "{:?}", report.warnings);
  assert_eq!(report.releases, 2);
  Ok(())
}

#[test]
fn test_validate_cli_success() -> Result<()> {
  let dir = TestLedger::with_fixtures()?;

  let output = run_ledger(&["validate", &path_arg(&dir.path)])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("2 release(s) loaded"), "{}", stdout);
  Ok(())
}

#[test]
fn test_duplicate_version_exits_with_validation_code() -> Result<()> {
  let dir = TestLedger::with_fixtures()?;
  dir.write("copies/0.7.1.json", r#"{"version": "0.7.1", "date": "2020-01-23"}"#)?;

  let output = run_ledger_raw(&["validate", &path_arg(&dir.path), "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["errors"][0]["kind"], "duplicate_version");
  assert_eq!(json["errors"][0]["version"], "0.7.1");
  assert_eq!(json["releases"], 0);
  Ok(())
}

#[test]
fn test_every_structural_error_is_reported() -> Result<()> {
  let dir = TestLedger::new()?;
  dir.write_release("0.20.0", "2022-02-10", "")?;
  dir.write("v0.21.0.toml", "version = \"v0.21.0\"\ndate = \"2022-03-22\"\n")?;
  dir.write("0.22.0.toml", "version = \"0.22.0\"\n")?;
  dir.write("broken.json", "{ \"version\": ")?;

  let set = read_release_dir(&dir.path)?;
  let report = check_record_set(set, &ChecksConfig::default());

  let mut kinds: Vec<_> = report.errors.iter().map(|e| e.kind()).collect();
  kinds.sort();
  assert_eq!(kinds, vec!["malformed-record", "malformed-version", "missing-required-field"]);
  Ok(())
}

#[test]
fn test_unreadable_record_suppresses_warnings() -> Result<()> {
  let dir = TestLedger::new()?;
  dir.write_release("0.24.0", "2022-08-15", "known_issues = \"Disk buffers can stall. Fixed in 0.24.1.\"\n")?;
  dir.write("0.24.1.toml", "version = \"0.24.1\"\ndate = \"2022-09-12\"\ndescription = 5\n")?;

  let output = run_ledger_raw(&["validate", &path_arg(&dir.path), "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["errors"].as_array().map(|a| a.len()), Some(1));
  assert_eq!(json["errors"][0]["kind"], "malformed_record");
  assert_eq!(json["warnings"].as_array().map(|a| a.len()), Some(0));
  assert_eq!(json["releases"], 0);
  Ok(())
}

#[test]
fn test_warnings_pass_unless_strict() -> Result<()> {
  let dir = TestLedger::with_fixtures()?;
  dir.write_release(
    "0.24.0",
    "2022-08-15",
    r#"known_issues = "Disk buffers can stall. Fixed in 0.24.1."

[[changelog]]
type = "chore"
scopes = ["codecs"]
description = "remove deprecated codec config"
breaking = true
"#,
  )?;

  let output = run_ledger(&["validate", &path_arg(&dir.path)])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("dangling-fixed-in-reference"), "{}", stdout);

  let strict = run_ledger_raw(&["validate", &path_arg(&dir.path), "--strict"])?;
  assert_eq!(strict.status.code(), Some(3));

  // Once the fixing release exists the reference resolves
  dir.write_release("0.24.1", "2022-09-12", "")?;
  run_ledger(&["validate", &path_arg(&dir.path), "--strict"])?;
  Ok(())
}

#[test]
fn test_config_disables_checks_and_sets_strict() -> Result<()> {
  let dir = TestLedger::with_fixtures()?;
  dir.write_release(
    "0.17.0",
    "2021-10-01",
    r#"
[[commits]]
sha = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
date = "2021-10-05 09:00:00 UTC"
description = "late commit"
pr_number = 9001
type = "chore"
author = "Jane Doe"
files_count = 1
insertions_count = 1
deletions_count = 1
"#,
  )?;
  dir.write("ledger.toml", "[checks]\nstrict = true\n")?;

  let failing = run_ledger_raw(&["validate", &path_arg(&dir.path), "--json"])?;
  assert_eq!(failing.status.code(), Some(3));
  let json: serde_json::Value = serde_json::from_slice(&failing.stdout)?;
  assert_eq!(json["warnings"][0]["kind"], "commit-after-release");

  dir.write("ledger.toml", "[checks]\nstrict = true\ncommit_date_tolerance_days = 7\n")?;
  run_ledger(&["validate", &path_arg(&dir.path)])?;

  dir.write("ledger.toml", "[checks]\nstrict = true\ndisabled = [\"commit-dates\"]\n")?;
  run_ledger(&["validate", &path_arg(&dir.path)])?;
  Ok(())
}

#[test]
fn test_unknown_check_in_config_is_user_error() -> Result<()> {
  let dir = TestLedger::with_fixtures()?;
  dir.write("ledger.toml", "[checks]\ndisabled = [\"spelling\"]\n")?;

  let output = run_ledger_raw(&["validate", &path_arg(&dir.path)])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("spelling"));
  Ok(())
}

#[test]
fn test_missing_directory_is_user_error() -> Result<()> {
  let dir = TestLedger::new()?;
  let missing = dir.path.join("nope");

  let output = run_ledger_raw(&["validate", &path_arg(&missing)])?;
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_irregular_field_order_is_tolerated() -> Result<()> {
  let dir = TestLedger::new()?;
  dir.write(
    "0.28.2.toml",
    r#"
date = "2023-03-29"
version = "0.28.2"

[[commits]]
author = "Jane Doe"
deletions_count = 1
insertions_count = 2
files_count = 1
breaking_change = false
type = "fix"
scopes = []
pr_number = 16870
description = "fix disk buffer metrics"
date = "2023-03-20 10:11:12 UTC"
sha = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
"#,
  )?;

  let set = read_release_dir(&dir.path)?;
  let report = check_records(set.records, &ChecksConfig::default());
  assert!(report.is_clean(), "{:?}", report);
  assert!(!report.warnings.iter().any(|w| w.kind == WarningKind::MissingCountField));
  Ok(())
}
