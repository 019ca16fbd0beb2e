//! Check trait for content-quality validations
//!
//! Checks run over a ledger that already passed structural validation, so
//! they only ever produce warnings. Each check is independent and can be
//! disabled by name in `ledger.toml`.

use crate::core::config::ChecksConfig;
use crate::ledger::Ledger;
use crate::model::Release;
use serde::Serialize;
use std::fmt;

/// What a warning is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
  DanglingFixedInReference,
  EmptyBreakingChangeDescription,
  NegativeCountField,
  MissingCountField,
  EmptyWhatsNextTitle,
  InvalidPrNumber,
  ReleaseDateRegression,
  CommitAfterRelease,
  DuplicateShaAcrossReleases,
}

impl WarningKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      WarningKind::DanglingFixedInReference => "dangling-fixed-in-reference",
      WarningKind::EmptyBreakingChangeDescription => "empty-breaking-change-description",
      WarningKind::NegativeCountField => "negative-count-field",
      WarningKind::MissingCountField => "missing-count-field",
      WarningKind::EmptyWhatsNextTitle => "empty-whats-next-title",
      WarningKind::InvalidPrNumber => "invalid-pr-number",
      WarningKind::ReleaseDateRegression => "release-date-regression",
      WarningKind::CommitAfterRelease => "commit-after-release",
      WarningKind::DuplicateShaAcrossReleases => "duplicate-sha-across-releases",
    }
  }
}

impl fmt::Display for WarningKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A non-fatal finding against one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
  pub kind: WarningKind,
  /// Version of the release the finding belongs to
  pub version: String,
  /// Dotted path inside the record, e.g. `known_issues[0]`
  pub field: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub suggestion: Option<String>,
}

impl Warning {
  pub fn new(kind: WarningKind, release: &Release, field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      kind,
      version: release.version.to_string(),
      field: field.into(),
      message: message.into(),
      suggestion: None,
    }
  }

  pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
    self.suggestion = Some(suggestion.into());
    self
  }
}

impl fmt::Display for Warning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}: {}", self.version, self.field, self.message)
  }
}

/// Context passed to checks
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
  pub ledger: &'a Ledger,
  pub config: &'a ChecksConfig,
}

/// Content check
///
/// ```rust,ignore
/// struct NonEmptyCodename;
///
/// impl Check for NonEmptyCodename {
///   fn name(&self) -> &'static str {
///     "codenames"
///   }
///
///   fn description(&self) -> &'static str {
///     "Codenames are not blank"
///   }
///
///   fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
///     Vec::new()
///   }
/// }
/// ```
pub trait Check: Send + Sync {
  /// Unique name for this check (kebab-case), used in `[checks] disabled`
  fn name(&self) -> &'static str;

  /// Human-readable description of what this check validates
  fn description(&self) -> &'static str;

  /// Inspect the ledger and return every finding
  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning>;
}
