use super::{ChangelogEntry, Commit};
use chrono::NaiveDate;
use semver::Version;
use serde::Serialize;
use std::path::PathBuf;

/// One published release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
  pub version: Version,
  pub date: NaiveDate,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub codename: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub known_issues: Vec<String>,
  /// Present only when the release bundles a VRL version bump
  #[serde(skip_serializing_if = "Option::is_none")]
  pub vrl_changelog: Option<String>,
  pub whats_next: Vec<WhatsNext>,
  pub changelog: Vec<ChangelogEntry>,
  pub commits: Vec<Commit>,
  /// File the record was read from
  #[serde(skip)]
  pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhatsNext {
  pub title: String,
  pub description: String,
}

impl Release {
  pub fn breaking_changes(&self) -> impl Iterator<Item = &ChangelogEntry> {
    self.changelog.iter().filter(|e| e.breaking)
  }

  /// Patch releases and pre-releases of `x.y.0` share the `(major, minor)` line
  pub fn line(&self) -> (u64, u64) {
    (self.version.major, self.version.minor)
  }
}
