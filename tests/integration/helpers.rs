//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A temporary releases directory
pub struct TestLedger {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestLedger {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Directory seeded with the 0.7.1 (TOML) and 0.16.1 (JSON) records
  pub fn with_fixtures() -> Result<Self> {
    let ledger = Self::new()?;
    ledger.write("0.7.1.toml", RELEASE_0_7_1)?;
    ledger.write("0.16.1.json", RELEASE_0_16_1)?;
    Ok(ledger)
  }

  /// Write a file relative to the releases directory
  pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
    let path = self.path.join(name);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
  }

  /// Write a minimal TOML release with one changelog entry
  pub fn write_release(&self, version: &str, date: &str, body: &str) -> Result<PathBuf> {
    self.write(
      &format!("{}.toml", version),
      &format!("version = \"{}\"\ndate = \"{}\"\n{}", version, date, body),
    )
  }
}

pub const RELEASE_0_7_1: &str = r#"
version = "0.7.1"
date = "2020-01-22"
description = """
This release includes a handful of bug fixes for the file source.
"""

[[changelog]]
type = "fix"
scopes = ["file source"]
description = "Fix a checkpointing bug that caused the file source to re-read files."
pr_numbers = [1582]

[[changelog]]
type = "enhancement"
scopes = ["elasticsearch sink"]
description = "Allow `id_key` to be templated."
contributors = ["jdoe"]

[[commits]]
sha = "0123456789abcdef0123456789abcdef01234567"
date = "2020-01-21 18:02:11 UTC"
description = "fix checkpointing"
pr_number = 1582
scopes = ["file source"]
type = "fix"
breaking_change = false
author = "Luke Steensen"
files_count = 3
insertions_count = 42
deletions_count = 7
"#;

pub const RELEASE_0_16_1: &str = r#"{
  "version": "0.16.1",
  "date": "2021-08-31",
  "known_issues": [],
  "changelog": [
    {
      "type": "fix",
      "scopes": ["kafka sink"],
      "description": "Fix message acknowledgement for the kafka sink.",
      "pr_numbers": [8889]
    }
  ],
  "commits": [
    {
      "sha": "fedcba9876543210fedcba9876543210fedcba98",
      "date": "2021-08-30T16:50:11Z",
      "description": "ack kafka messages",
      "pr_number": 8889,
      "scopes": ["kafka sink"],
      "type": "fix",
      "breaking_change": false,
      "author": "Jane Doe",
      "files_count": 2,
      "insertions_count": 10,
      "deletions_count": 4
    }
  ]
}"#;

/// Run the release-ledger binary, failing unless it exits successfully
pub fn run_ledger(args: &[&str]) -> Result<Output> {
  let output = run_ledger_raw(args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release-ledger command failed: release-ledger {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the release-ledger binary and return its output whatever the exit code
pub fn run_ledger_raw(args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-ledger");
  Command::new(bin)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run release-ledger")
}

pub fn path_arg(path: &Path) -> String {
  path.display().to_string()
}
