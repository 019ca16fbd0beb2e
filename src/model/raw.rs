//! Permissive parse layer for release records
//!
//! Every field is optional here so a missing field surfaces as
//! `MissingRequiredField` with a precise path instead of a deserializer error.

use super::changelog::{ChangelogEntry, EntryType};
use super::commit::{self, Commit};
use super::release::{Release, WhatsNext};
use crate::core::error::StructuralError;
use chrono::{NaiveDate, SecondsFormat};
use semver::Version;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Label used when a record has no usable version
pub const UNKNOWN_VERSION: &str = "<unknown>";

/// Zero-or-more strings: `"text"` or `["a", "b"]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
  One(String),
  Many(Vec<String>),
}

impl OneOrMany {
  /// Normalize to an ordered sequence; a single blank string means none
  pub fn into_vec(self) -> Vec<String> {
    match self {
      OneOrMany::One(s) if s.trim().is_empty() => Vec::new(),
      OneOrMany::One(s) => vec![s],
      OneOrMany::Many(v) => v,
    }
  }
}

/// A date written as a string, or as a native TOML date/datetime
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DateField {
  Text(String),
  Toml(toml_datetime::Datetime),
}

impl DateField {
  /// Textual form; TOML values render as RFC 3339
  pub fn into_text(self) -> String {
    match self {
      DateField::Text(s) => s,
      DateField::Toml(dt) => dt.to_string(),
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      DateField::Text(s) => Some(s),
      DateField::Toml(_) => None,
    }
  }
}

impl From<String> for DateField {
  fn from(s: String) -> Self {
    DateField::Text(s)
  }
}

impl From<&str> for DateField {
  fn from(s: &str) -> Self {
    DateField::Text(s.to_string())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRelease {
  pub version: Option<String>,
  pub date: Option<DateField>,
  pub codename: Option<String>,
  pub description: Option<String>,
  pub known_issues: Option<OneOrMany>,
  pub vrl_changelog: Option<String>,
  #[serde(default)]
  pub whats_next: Vec<RawWhatsNext>,
  #[serde(default)]
  pub changelog: Vec<RawChangelogEntry>,
  #[serde(default)]
  pub commits: Vec<RawCommit>,
  #[serde(skip)]
  pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawWhatsNext {
  pub title: Option<String>,
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawChangelogEntry {
  #[serde(rename = "type")]
  pub entry_type: Option<String>,
  #[serde(default)]
  pub scopes: Vec<String>,
  pub description: Option<String>,
  pub breaking: Option<bool>,
  pub contributors: Option<Vec<String>>,
  pub pr_numbers: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCommit {
  pub sha: Option<String>,
  pub date: Option<DateField>,
  pub description: Option<String>,
  pub pr_number: Option<i64>,
  #[serde(default)]
  pub scopes: Vec<String>,
  #[serde(rename = "type")]
  pub commit_type: Option<String>,
  pub breaking_change: Option<bool>,
  pub author: Option<String>,
  pub files_count: Option<i64>,
  pub insertions_count: Option<i64>,
  pub deletions_count: Option<i64>,
}

/// Collects field-level problems for one record
struct FieldErrors {
  version: String,
  source: Option<PathBuf>,
  errors: Vec<StructuralError>,
}

impl FieldErrors {
  fn require<T>(&mut self, value: Option<T>, field: impl Into<String>) -> Option<T> {
    if value.is_none() {
      self.errors.push(StructuralError::MissingRequiredField {
        version: self.version.clone(),
        field: field.into(),
        source: self.source.clone(),
      });
    }
    value
  }

  fn malformed(&mut self, field: impl Into<String>, reason: impl Into<String>) {
    self.errors.push(StructuralError::MalformedField {
      version: self.version.clone(),
      field: field.into(),
      reason: reason.into(),
    });
  }
}

impl RawRelease {
  /// Version string as written, for error messages
  pub fn version_label(&self) -> String {
    self
      .version
      .as_deref()
      .map(|v| v.trim().to_string())
      .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
  }

  /// Parse the version key
  pub fn parse_version(&self) -> Result<Version, StructuralError> {
    let Some(raw) = self.version.as_deref() else {
      return Err(StructuralError::MissingRequiredField {
        version: UNKNOWN_VERSION.to_string(),
        field: "version".to_string(),
        source: self.source.clone(),
      });
    };

    Version::parse(raw.trim()).map_err(|e| StructuralError::MalformedVersion {
      version: raw.to_string(),
      reason: e.to_string(),
      source: self.source.clone(),
    })
  }

  /// Convert into a typed release, reporting every field problem at once
  pub fn into_release(self) -> Result<Release, Vec<StructuralError>> {
    let mut errs = FieldErrors {
      version: self.version_label(),
      source: self.source.clone(),
      errors: Vec::new(),
    };

    let version = match self.parse_version() {
      Ok(v) => Some(v),
      Err(e) => {
        errs.errors.push(e);
        None
      }
    };

    let date = errs
      .require(self.date, "date")
      .map(DateField::into_text)
      .and_then(|raw| match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
          errs.malformed("date", format!("'{}': {}", raw, e));
          None
        }
      });

    let whats_next = self
      .whats_next
      .into_iter()
      .map(|item| WhatsNext {
        title: item.title.unwrap_or_default(),
        description: item.description.unwrap_or_default(),
      })
      .collect();

    let changelog: Vec<_> = self
      .changelog
      .into_iter()
      .enumerate()
      .filter_map(|(idx, raw)| convert_entry(raw, idx, &mut errs))
      .collect();

    let mut seen_shas = HashMap::new();
    let commits: Vec<_> = self
      .commits
      .into_iter()
      .enumerate()
      .filter_map(|(idx, raw)| convert_commit(raw, idx, &mut seen_shas, &mut errs))
      .collect();

    match (version, date) {
      (Some(version), Some(date)) if errs.errors.is_empty() => Ok(Release {
        version,
        date,
        codename: self.codename,
        description: self.description,
        known_issues: self.known_issues.map(OneOrMany::into_vec).unwrap_or_default(),
        vrl_changelog: self.vrl_changelog,
        whats_next,
        changelog,
        commits,
        source: self.source,
      }),
      _ => Err(errs.errors),
    }
  }
}

fn dedup_scopes(scopes: Vec<String>) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(scopes.len());
  for scope in scopes {
    if !out.contains(&scope) {
      out.push(scope);
    }
  }
  out
}

fn convert_entry(raw: RawChangelogEntry, idx: usize, errs: &mut FieldErrors) -> Option<ChangelogEntry> {
  let path = |field: &str| format!("changelog[{}].{}", idx, field);

  let entry_type = errs
    .require(raw.entry_type, path("type"))
    .and_then(|t| match t.trim().parse::<EntryType>() {
      Ok(t) => Some(t),
      Err(reason) => {
        errs.malformed(path("type"), reason);
        None
      }
    });
  let description = errs.require(raw.description, path("description"));

  Some(ChangelogEntry {
    entry_type: entry_type?,
    scopes: dedup_scopes(raw.scopes),
    description: description?,
    breaking: raw.breaking.unwrap_or(false),
    contributors: raw.contributors,
    pr_numbers: raw.pr_numbers,
  })
}

fn convert_commit(
  raw: RawCommit,
  idx: usize,
  seen: &mut HashMap<String, usize>,
  errs: &mut FieldErrors,
) -> Option<Commit> {
  let path = |field: &str| format!("commits[{}].{}", idx, field);

  let sha = errs.require(raw.sha, path("sha")).and_then(|raw_sha| {
    let key = raw_sha.trim().to_ascii_lowercase();
    if let Some(first) = seen.get(&key) {
      errs.errors.push(StructuralError::DuplicateCommitSha {
        version: errs.version.clone(),
        sha: key.clone(),
        first_index: *first,
        second_index: idx,
      });
    } else {
      seen.insert(key, idx);
    }

    match commit::normalize_sha(&raw_sha) {
      Ok(sha) => Some(sha),
      Err(reason) => {
        errs.malformed(path("sha"), reason);
        None
      }
    }
  });

  let date = errs
    .require(raw.date, path("date"))
    .map(DateField::into_text)
    .and_then(|d| match commit::parse_timestamp(&d) {
      Ok(d) => Some(d),
      Err(reason) => {
        errs.malformed(path("date"), reason);
        None
      }
    });
  let description = errs.require(raw.description, path("description"));
  let pr_number = errs.require(raw.pr_number, path("pr_number"));
  let commit_type = errs.require(raw.commit_type, path("type"));
  let author = errs.require(raw.author, path("author"));

  Some(Commit {
    sha: sha?,
    date: date?,
    description: description?,
    pr_number: pr_number?,
    scopes: dedup_scopes(raw.scopes),
    commit_type: commit_type?,
    breaking_change: raw.breaking_change.unwrap_or(false),
    author: author?,
    files_count: raw.files_count,
    insertions_count: raw.insertions_count,
    deletions_count: raw.deletions_count,
  })
}

impl From<&Release> for RawRelease {
  fn from(release: &Release) -> Self {
    Self {
      version: Some(release.version.to_string()),
      date: Some(release.date.format("%Y-%m-%d").to_string().into()),
      codename: release.codename.clone(),
      description: release.description.clone(),
      known_issues: (!release.known_issues.is_empty()).then(|| OneOrMany::Many(release.known_issues.clone())),
      vrl_changelog: release.vrl_changelog.clone(),
      whats_next: release
        .whats_next
        .iter()
        .map(|w| RawWhatsNext {
          title: Some(w.title.clone()),
          description: Some(w.description.clone()),
        })
        .collect(),
      changelog: release
        .changelog
        .iter()
        .map(|e| RawChangelogEntry {
          entry_type: Some(e.entry_type.as_str().to_string()),
          scopes: e.scopes.clone(),
          description: Some(e.description.clone()),
          breaking: Some(e.breaking),
          contributors: e.contributors.clone(),
          pr_numbers: e.pr_numbers.clone(),
        })
        .collect(),
      commits: release
        .commits
        .iter()
        .map(|c| RawCommit {
          sha: Some(c.sha.clone()),
          date: Some(c.date.to_rfc3339_opts(SecondsFormat::Secs, true).into()),
          description: Some(c.description.clone()),
          pr_number: Some(c.pr_number),
          scopes: c.scopes.clone(),
          commit_type: Some(c.commit_type.clone()),
          breaking_change: Some(c.breaking_change),
          author: Some(c.author.clone()),
          files_count: c.files_count,
          insertions_count: c.insertions_count,
          deletions_count: c.deletions_count,
        })
        .collect(),
      source: release.source.clone(),
    }
  }
}
