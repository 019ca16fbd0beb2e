//! The loaded, immutable set of releases
//!
//! # Invariants
//!
//! 1. Versions are unique under semver precedence (build metadata ignored)
//! 2. Commit shas are unique within each release
//! 3. Releases are held in ascending version order
//!
//! A `Ledger` only exists when every record passed structural checks.

pub mod export;
pub mod query;
pub mod source;

pub use export::export_dir;
pub use query::{AuthorActivity, CommitRef, EntryRef, VersionSummary};
pub use source::{RecordFormat, RecordSet, read_release_dir};

use crate::core::error::StructuralError;
use crate::model::{RawRelease, Release};
use semver::Version;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
  releases: Vec<Release>,
}

/// Outcome of a full structural sweep
#[derive(Debug)]
pub struct Scan {
  /// Present only when `errors` is empty
  pub ledger: Option<Ledger>,
  pub errors: Vec<StructuralError>,
}

/// Convert every record and collect all structural errors
pub fn scan(records: impl IntoIterator<Item = RawRelease>) -> Scan {
  let mut errors = Vec::new();
  let mut releases = Vec::new();
  let mut versions = Vec::new();

  for raw in records {
    if let Ok(version) = raw.parse_version() {
      versions.push((version, raw.source.clone()));
    }
    match raw.into_release() {
      Ok(release) => releases.push(release),
      Err(mut errs) => errors.append(&mut errs),
    }
  }

  errors.extend(duplicate_versions(versions));

  if errors.is_empty() {
    releases.sort_by(|a, b| a.version.cmp(&b.version));
    tracing::debug!(releases = releases.len(), "ledger loaded");
    Scan {
      ledger: Some(Ledger { releases }),
      errors,
    }
  } else {
    tracing::debug!(errors = errors.len(), "structural errors found");
    Scan { ledger: None, errors }
  }
}

/// Equal-precedence versions sort next to each other under `Version::cmp`
fn duplicate_versions(mut versions: Vec<(Version, Option<std::path::PathBuf>)>) -> Vec<StructuralError> {
  versions.sort_by(|a, b| a.0.cmp(&b.0));
  versions
    .windows(2)
    .filter(|pair| pair[0].0.cmp_precedence(&pair[1].0) == Ordering::Equal)
    .map(|pair| StructuralError::DuplicateVersion {
      version: pair[1].0.to_string(),
      first: pair[0].1.clone(),
      second: pair[1].1.clone(),
    })
    .collect()
}

impl Ledger {
  /// Load records, failing on the first structural error
  pub fn load(records: impl IntoIterator<Item = RawRelease>) -> Result<Self, StructuralError> {
    let Scan { ledger, mut errors } = scan(records);
    match ledger {
      Some(ledger) => Ok(ledger),
      None => Err(errors.remove(0)),
    }
  }

  /// Releases in ascending version order
  pub fn releases(&self) -> &[Release] {
    &self.releases
  }

  pub fn len(&self) -> usize {
    self.releases.len()
  }

  pub fn is_empty(&self) -> bool {
    self.releases.is_empty()
  }

  /// Look up a release by semver precedence
  pub fn get(&self, version: &Version) -> Option<&Release> {
    self
      .releases
      .binary_search_by(|r| r.version.cmp_precedence(version))
      .ok()
      .map(|idx| &self.releases[idx])
  }

  /// Highest version in the ledger
  pub fn latest(&self) -> Option<&Release> {
    self.releases.last()
  }

  /// Back to input-shaped records, ascending by version
  pub fn to_records(&self) -> Vec<RawRelease> {
    self.releases.iter().map(RawRelease::from).collect()
  }
}
