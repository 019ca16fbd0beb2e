//! Reading release records from disk
//!
//! One file per release. Files are discovered with `walkdir` and parsed in
//! parallel; all reads finish before anything downstream runs.

use crate::core::config::CONFIG_FILE_NAMES;
use crate::core::error::{LedgerError, LedgerResult, ResultExt, StructuralError};
use crate::model::{RawRelease, Release};
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

/// On-disk encoding of a release record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
  Toml,
  Json,
}

impl RecordFormat {
  /// Pick the format from a file extension
  pub fn from_path(path: &Path) -> Option<Self> {
    match path.extension()?.to_str()? {
      "toml" => Some(Self::Toml),
      "json" => Some(Self::Json),
      _ => None,
    }
  }

  pub fn extension(&self) -> &'static str {
    match self {
      Self::Toml => "toml",
      Self::Json => "json",
    }
  }

  /// Parse one record; the error is the deserializer's message
  pub fn parse(&self, content: &str) -> Result<RawRelease, String> {
    match self {
      Self::Toml => toml_edit::de::from_str(content).map_err(|e| e.to_string()),
      Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
  }

  /// Serialize one release in the input schema
  pub fn render(&self, release: &Release) -> LedgerResult<String> {
    let mut out = match self {
      Self::Toml => toml_edit::ser::to_string_pretty(release)?,
      Self::Json => serde_json::to_string_pretty(release)?,
    };
    if !out.ends_with('\n') {
      out.push('\n');
    }
    Ok(out)
  }
}

impl FromStr for RecordFormat {
  type Err = LedgerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "toml" => Ok(Self::Toml),
      "json" => Ok(Self::Json),
      other => Err(LedgerError::with_help(
        format!("Unknown record format '{}'", other),
        "Supported formats: toml, json",
      )),
    }
  }
}

impl fmt::Display for RecordFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.extension())
  }
}

/// Everything read from a releases directory
#[derive(Debug, Default)]
pub struct RecordSet {
  /// Records that parsed, in path order
  pub records: Vec<RawRelease>,
  /// Files that are not release records
  pub errors: Vec<StructuralError>,
  pub files: usize,
}

fn is_config_file(path: &Path) -> bool {
  path
    .file_name()
    .and_then(|n| n.to_str())
    .is_some_and(|name| CONFIG_FILE_NAMES.contains(&name))
}

/// Find release files under `dir`, sorted by path
pub fn discover(dir: &Path) -> LedgerResult<Vec<PathBuf>> {
  if !dir.is_dir() {
    return Err(LedgerError::with_help(
      format!("Release directory not found: {}", dir.display()),
      "Pass the directory that holds one TOML or JSON file per release",
    ));
  }

  let mut paths = Vec::new();
  for entry in WalkDir::new(dir).follow_links(true) {
    let entry = entry?;
    if !entry.file_type().is_file() {
      continue;
    }

    let path = entry.path();
    if is_config_file(path) || RecordFormat::from_path(path).is_none() {
      continue;
    }
    paths.push(path.to_path_buf());
  }

  // Sort for deterministic ordering
  paths.sort();
  Ok(paths)
}

/// Read one file; I/O failures are errors, bad content is a structural error
pub fn read_record(path: &Path) -> LedgerResult<Result<RawRelease, StructuralError>> {
  let Some(format) = RecordFormat::from_path(path) else {
    return Ok(Err(StructuralError::MalformedRecord {
      source: path.to_path_buf(),
      reason: "unsupported file extension".to_string(),
    }));
  };

  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  Ok(
    format
      .parse(&content)
      .map(|mut raw| {
        raw.source = Some(path.to_path_buf());
        raw
      })
      .map_err(|reason| StructuralError::MalformedRecord {
        source: path.to_path_buf(),
        reason,
      }),
  )
}

/// Read every release file under `dir`
pub fn read_release_dir(dir: &Path) -> LedgerResult<RecordSet> {
  let paths = discover(dir)?;
  tracing::debug!(dir = %dir.display(), files = paths.len(), "reading release records");

  let results: Vec<LedgerResult<Result<RawRelease, StructuralError>>> =
    paths.par_iter().map(|path| read_record(path)).collect();

  let mut set = RecordSet {
    files: paths.len(),
    ..Default::default()
  };
  for result in results {
    match result? {
      Ok(raw) => set.records.push(raw),
      Err(err) => {
        tracing::debug!(%err, "skipping malformed record");
        set.errors.push(err);
      }
    }
  }

  Ok(set)
}
