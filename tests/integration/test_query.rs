//! Integration tests for the query commands and library API

use crate::helpers::{TestLedger, path_arg, run_ledger, run_ledger_raw};
use anyhow::Result;
use release_ledger::{Ledger, QueryError, read_release_dir};

fn upgrade_fixture() -> Result<TestLedger> {
  let dir = TestLedger::with_fixtures()?;
  dir.write_release("0.23.0", "2022-07-11", "")?;
  dir.write_release(
    "0.24.0",
    "2022-08-15",
    r#"
[[changelog]]
type = "chore"
scopes = ["codecs"]
description = "remove deprecated codec config"
breaking = true

[[changelog]]
type = "feat"
scopes = ["codecs"]
description = "add protobuf codec"
"#,
  )?;
  dir.write_release(
    "0.24.2",
    "2022-10-05",
    r#"
[[changelog]]
type = "fix"
scopes = ["codecs", "kafka sink"]
description = "fix framing"
"#,
  )?;
  Ok(dir)
}

fn load(dir: &TestLedger) -> Result<Ledger> {
  let set = read_release_dir(&dir.path)?;
  Ok(Ledger::load(set.records)?)
}

#[test]
fn test_query_by_version_matches_input() -> Result<()> {
  let dir = upgrade_fixture()?;
  let ledger = load(&dir)?;

  for version in ["0.7.1", "0.16.1", "0.23.0", "0.24.0", "0.24.2"] {
    assert_eq!(ledger.query_by_version(version)?.version.to_string(), version);
  }
  assert!(matches!(
    ledger.query_by_version("0.24.1"),
    Err(QueryError::NotFound { .. })
  ));
  Ok(())
}

#[test]
fn test_breaking_changes_for_upgrade_guide() -> Result<()> {
  let dir = upgrade_fixture()?;
  let ledger = load(&dir)?;

  let entries = ledger.query_breaking_changes("0.23.0", "0.25.0")?;
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].version.to_string(), "0.24.0");
  assert_eq!(entries[0].entry.description, "remove deprecated codec config");

  let output = run_ledger(&[
    "breaking",
    &path_arg(&dir.path),
    "--from",
    "0.23.0",
    "--to",
    "0.25.0",
    "--json",
  ])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json.as_array().map(|a| a.len()), Some(1));
  assert_eq!(json[0]["version"], "0.24.0");
  assert_eq!(json[0]["entry"]["breaking"], true);
  Ok(())
}

#[test]
fn test_breaking_reversed_range_is_user_error() -> Result<()> {
  let dir = upgrade_fixture()?;

  let output = run_ledger_raw(&["breaking", &path_arg(&dir.path), "--from", "0.25.0", "--to", "0.23.0"])?;
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_scope_newest_first() -> Result<()> {
  let dir = upgrade_fixture()?;

  let output = run_ledger(&["scope", &path_arg(&dir.path), "codecs", "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let versions: Vec<_> = json
    .as_array()
    .map(|a| a.iter().map(|e| e["version"].as_str().unwrap_or_default().to_string()).collect())
    .unwrap_or_default();
  assert_eq!(versions, vec!["0.24.2", "0.24.0", "0.24.0"]);
  Ok(())
}

#[test]
fn test_author_matches_commits_and_contributors() -> Result<()> {
  let dir = TestLedger::with_fixtures()?;
  let ledger = load(&dir)?;

  let activity = ledger.query_by_author("@JDoe");
  assert_eq!(activity.entries.len(), 1);
  assert_eq!(activity.entries[0].version.to_string(), "0.7.1");

  let output = run_ledger(&["author", &path_arg(&dir.path), "jane doe"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("ack kafka messages"), "{}", stdout);
  Ok(())
}

#[test]
fn test_versions_and_show() -> Result<()> {
  let dir = upgrade_fixture()?;

  let output = run_ledger(&["versions", &path_arg(&dir.path), "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json[0]["version"], "0.7.1");
  assert_eq!(json[4]["version"], "0.24.2");
  assert_eq!(json[3]["breaking"], 1);

  let output = run_ledger(&["show", &path_arg(&dir.path), "0.7.1"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Bug Fixes"), "{}", stdout);
  assert!(stdout.contains("Commits: 1"), "{}", stdout);

  let missing = run_ledger_raw(&["show", &path_arg(&dir.path), "9.9.9"])?;
  assert_eq!(missing.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_queries_refuse_a_broken_ledger() -> Result<()> {
  let dir = TestLedger::with_fixtures()?;
  dir.write("dupe.toml", "version = \"0.16.1\"\ndate = \"2021-09-01\"\n")?;

  let output = run_ledger_raw(&["versions", &path_arg(&dir.path)])?;
  assert_eq!(output.status.code(), Some(3));
  Ok(())
}
