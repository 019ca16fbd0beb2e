//! User-facing changelog entries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Changelog entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
  /// New feature
  Feat,
  /// Bug fix
  Fix,
  /// Improvement to existing behavior
  Enhancement,
  /// Maintenance
  Chore,
  /// Something scheduled for removal
  Deprecation,
  /// Documentation
  Docs,
}

impl EntryType {
  /// All types, in release-notes section order
  pub const ALL: [EntryType; 6] = [
    EntryType::Feat,
    EntryType::Enhancement,
    EntryType::Fix,
    EntryType::Deprecation,
    EntryType::Chore,
    EntryType::Docs,
  ];

  /// Wire spelling
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Feat => "feat",
      Self::Fix => "fix",
      Self::Enhancement => "enhancement",
      Self::Chore => "chore",
      Self::Deprecation => "deprecation",
      Self::Docs => "docs",
    }
  }

  /// Get the display name for this entry type
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Feat => "New Features",
      Self::Fix => "Bug Fixes",
      Self::Enhancement => "Enhancements",
      Self::Chore => "Chores",
      Self::Deprecation => "Deprecations",
      Self::Docs => "Documentation",
    }
  }
}

impl FromStr for EntryType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    EntryType::ALL
      .into_iter()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| {
        format!(
          "unknown type '{}' (expected one of: {})",
          s,
          EntryType::ALL.map(|t| t.as_str()).join(", ")
        )
      })
  }
}

impl fmt::Display for EntryType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A single user-facing note in a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
  #[serde(rename = "type")]
  pub entry_type: EntryType,
  pub scopes: Vec<String>,
  pub description: String,
  pub breaking: bool,
  /// External contributor handles; absent means internal authorship
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contributors: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pr_numbers: Option<Vec<i64>>,
}

impl ChangelogEntry {
  pub fn has_scope(&self, scope: &str) -> bool {
    self.scopes.iter().any(|s| s == scope)
  }

  /// Case-insensitive contributor match, leading `@` ignored
  pub fn has_contributor(&self, handle: &str) -> bool {
    let handle = handle.trim_start_matches('@');
    self
      .contributors
      .iter()
      .flatten()
      .any(|c| c.trim_start_matches('@').eq_ignore_ascii_case(handle))
  }

  /// First line of the description, for one-line listings
  pub fn summary(&self) -> &str {
    self.description.trim().lines().next().unwrap_or("")
  }
}
