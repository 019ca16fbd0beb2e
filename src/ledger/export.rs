//! Writing a ledger back out as release records

use super::Ledger;
use super::source::RecordFormat;
use crate::core::error::{LedgerError, LedgerResult, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// File name for one release, e.g. `0.24.0.toml`
pub fn record_file_name(version: &semver::Version, format: RecordFormat) -> String {
  format!("{}.{}", version, format.extension())
}

/// Write one file per release into `out`, returning the paths written
///
/// Existing files with the same name are overwritten; nothing else in `out`
/// is touched.
pub fn export_dir(ledger: &Ledger, out: &Path, format: RecordFormat) -> LedgerResult<Vec<PathBuf>> {
  if out.exists() && !out.is_dir() {
    return Err(LedgerError::with_help(
      format!("Export target is not a directory: {}", out.display()),
      "Choose an empty or new directory for exported records",
    ));
  }
  fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

  let mut written = Vec::with_capacity(ledger.len());
  for release in ledger.releases() {
    let content = format.render(release)?;
    let path = out.join(record_file_name(&release.version, format));
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "exported release");
    written.push(path);
  }

  Ok(written)
}

/// Whole ledger as a single JSON array, ascending by version
pub fn to_json(ledger: &Ledger) -> LedgerResult<String> {
  Ok(serde_json::to_string_pretty(ledger.releases())?)
}
