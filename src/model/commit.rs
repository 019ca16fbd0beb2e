//! Source-control commits that make up a release

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// A single commit listed in a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
  /// 40-character lowercase hex sha
  pub sha: String,
  pub date: DateTime<Utc>,
  pub description: String,
  pub pr_number: i64,
  pub scopes: Vec<String>,
  /// Conventional-commit tag (feat, fix, chore, ...); free text
  #[serde(rename = "type")]
  pub commit_type: String,
  pub breaking_change: bool,
  pub author: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub files_count: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub insertions_count: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub deletions_count: Option<i64>,
}

impl Commit {
  /// Abbreviated sha for display
  pub fn short_sha(&self) -> &str {
    &self.sha[..self.sha.len().min(8)]
  }

  /// Case-insensitive author match
  pub fn is_authored_by(&self, who: &str) -> bool {
    self.author.trim().eq_ignore_ascii_case(who.trim())
  }

  /// The three size counters, with their field names
  pub fn counts(&self) -> [(&'static str, Option<i64>); 3] {
    [
      ("files_count", self.files_count),
      ("insertions_count", self.insertions_count),
      ("deletions_count", self.deletions_count),
    ]
  }
}

/// Validate and normalize a commit sha (40 hex chars, lowercased)
pub fn normalize_sha(raw: &str) -> Result<String, String> {
  let sha = raw.trim();
  if sha.len() != 40 {
    return Err(format!("expected 40 hex characters, found {}", sha.len()));
  }
  if !sha.chars().all(|c| c.is_ascii_hexdigit()) {
    return Err("contains non-hex characters".to_string());
  }
  Ok(sha.to_ascii_lowercase())
}

/// Parse a commit timestamp
///
/// Accepted shapes:
/// - RFC 3339: `2020-02-19T16:50:11Z`, `2020-02-19T16:50:11+01:00`
/// - `2020-02-19 16:50:11 UTC`
/// - `2020-02-19 16:50:11 +0000`
/// - `2020-02-19T16:50:11` (UTC)
/// - `2020-02-19` (midnight UTC)
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
  let s = raw.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  if let Some(naive) = s.strip_suffix(" UTC").or_else(|| s.strip_suffix(" Z"))
    && let Ok(dt) = NaiveDateTime::parse_from_str(naive.trim(), "%Y-%m-%d %H:%M:%S")
  {
    return Ok(dt.and_utc());
  }
  if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
    return Ok(dt.with_timezone(&Utc));
  }
  if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
    return Ok(dt.and_utc());
  }
  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
    && let Some(dt) = date.and_hms_opt(0, 0, 0)
  {
    return Ok(dt.and_utc());
  }

  Err(format!("'{}' is not a recognized timestamp", raw))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Datelike, Timelike};

  #[test]
  fn test_normalize_sha() {
    let upper = "ABCDEF0123456789ABCDEF0123456789ABCDEF01";
    assert_eq!(normalize_sha(upper).unwrap(), upper.to_ascii_lowercase());
    assert!(normalize_sha("abc123").unwrap_err().contains("found 6"));
    assert!(normalize_sha(&"g".repeat(40)).unwrap_err().contains("non-hex"));
  }

  #[test]
  fn test_parse_timestamp_shapes() {
    let rfc = parse_timestamp("2020-02-19T16:50:11Z").unwrap();
    let utc = parse_timestamp("2020-02-19 16:50:11 UTC").unwrap();
    let offset = parse_timestamp("2020-02-19 17:50:11 +0100").unwrap();
    let naive = parse_timestamp("2020-02-19T16:50:11").unwrap();
    assert_eq!(rfc, utc);
    assert_eq!(rfc, offset);
    assert_eq!(rfc, naive);

    let day = parse_timestamp("2020-02-19").unwrap();
    assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2020, 2, 19, 0));
  }

  #[test]
  fn test_parse_timestamp_rejects_garbage() {
    assert!(parse_timestamp("last tuesday").is_err());
    assert!(parse_timestamp("2020-13-40 00:00:00 UTC").is_err());
  }

  #[test]
  fn test_short_sha_and_author() {
    let commit = Commit {
      sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
      date: parse_timestamp("2021-01-01").unwrap(),
      description: "bump deps".to_string(),
      pr_number: 42,
      scopes: vec![],
      commit_type: "chore".to_string(),
      breaking_change: false,
      author: "dependabot[bot]".to_string(),
      files_count: Some(1),
      insertions_count: Some(2),
      deletions_count: None,
    };
    assert_eq!(commit.short_sha(), "01234567");
    assert!(commit.is_authored_by("Dependabot[bot]"));
    assert_eq!(commit.counts()[2], ("deletions_count", None));
  }
}
