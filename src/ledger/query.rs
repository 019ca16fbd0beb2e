//! Read-only views over a loaded ledger
//!
//! Every result borrows from the ledger and carries the owning release's
//! version and date so callers can render "since vX" lines without a second
//! lookup.

use super::Ledger;
use crate::core::error::QueryError;
use crate::model::{ChangelogEntry, Commit, Release};
use chrono::NaiveDate;
use semver::Version;
use serde::Serialize;
use std::cmp::Ordering;

/// A changelog entry together with its release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryRef<'a> {
  pub version: &'a Version,
  pub date: NaiveDate,
  pub entry: &'a ChangelogEntry,
}

/// A commit together with its release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitRef<'a> {
  pub version: &'a Version,
  pub date: NaiveDate,
  pub commit: &'a Commit,
}

/// Everything attributed to one person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorActivity<'a> {
  pub commits: Vec<CommitRef<'a>>,
  pub entries: Vec<EntryRef<'a>>,
}

impl AuthorActivity<'_> {
  pub fn is_empty(&self) -> bool {
    self.commits.is_empty() && self.entries.is_empty()
  }
}

/// One line of the versions list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSummary {
  pub version: Version,
  pub date: NaiveDate,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub codename: Option<String>,
  pub entries: usize,
  pub breaking: usize,
  pub commits: usize,
  pub known_issues: usize,
}

impl<'a> EntryRef<'a> {
  fn new(release: &'a Release, entry: &'a ChangelogEntry) -> Self {
    Self {
      version: &release.version,
      date: release.date,
      entry,
    }
  }
}

/// Parse a version argument
pub fn parse_version(raw: &str) -> Result<Version, QueryError> {
  Version::parse(raw.trim()).map_err(|e| QueryError::InvalidVersion {
    version: raw.to_string(),
    reason: e.to_string(),
  })
}

impl Ledger {
  /// Release with exactly this version
  pub fn query_by_version(&self, version: &str) -> Result<&Release, QueryError> {
    let parsed = parse_version(version)?;
    self.get(&parsed).ok_or_else(|| QueryError::NotFound {
      version: version.to_string(),
    })
  }

  /// Breaking entries of releases in `[from, to)`, in version order
  pub fn query_breaking_changes(&self, from: &str, to: &str) -> Result<Vec<EntryRef<'_>>, QueryError> {
    let from_v = parse_version(from)?;
    let to_v = parse_version(to)?;
    if from_v.cmp_precedence(&to_v) == Ordering::Greater {
      return Err(QueryError::InvalidRange {
        from: from.to_string(),
        to: to.to_string(),
      });
    }
    Ok(self.breaking_between(&from_v, &to_v))
  }

  /// Typed form of [`Ledger::query_breaking_changes`]
  pub fn breaking_between(&self, from: &Version, to: &Version) -> Vec<EntryRef<'_>> {
    self
      .releases()
      .iter()
      .filter(|r| r.version.cmp_precedence(from) != Ordering::Less && r.version.cmp_precedence(to) == Ordering::Less)
      .flat_map(|r| r.breaking_changes().map(move |e| EntryRef::new(r, e)))
      .collect()
  }

  /// Entries tagged with `scope`, newest release first
  ///
  /// Releases sharing a date fall back to descending version; entries keep
  /// their order within a release.
  pub fn query_by_scope(&self, scope: &str) -> Vec<EntryRef<'_>> {
    let mut releases: Vec<&Release> = self.releases().iter().collect();
    releases.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.version.cmp(&a.version)));

    releases
      .into_iter()
      .flat_map(move |r| {
        r.changelog
          .iter()
          .filter(move |e| e.has_scope(scope))
          .map(move |e| EntryRef::new(r, e))
      })
      .collect()
  }

  /// Commits authored by `who` and entries crediting `who`, in version order
  pub fn query_by_author(&self, who: &str) -> AuthorActivity<'_> {
    let mut activity = AuthorActivity::default();
    for release in self.releases() {
      activity.commits.extend(
        release
          .commits
          .iter()
          .filter(|c| c.is_authored_by(who))
          .map(|commit| CommitRef {
            version: &release.version,
            date: release.date,
            commit,
          }),
      );
      activity.entries.extend(
        release
          .changelog
          .iter()
          .filter(|e| e.has_contributor(who))
          .map(|e| EntryRef::new(release, e)),
      );
    }
    activity
  }

  /// All versions, ascending, with per-release counts
  pub fn versions(&self) -> Vec<VersionSummary> {
    self
      .releases()
      .iter()
      .map(|r| VersionSummary {
        version: r.version.clone(),
        date: r.date,
        codename: r.codename.clone(),
        entries: r.changelog.len(),
        breaking: r.breaking_changes().count(),
        commits: r.commits.len(),
        known_issues: r.known_issues.len(),
      })
      .collect()
  }
}
