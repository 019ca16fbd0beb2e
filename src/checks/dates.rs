//! Release and commit date ordering
//!
//! Release dates are compared along each `major.minor` line and across the
//! first release of each line. A patch release cut for an older line after a
//! newer line shipped is a backport and is not compared to newer lines.

use super::trait_def::{Check, CheckContext, Warning, WarningKind};
use crate::model::Release;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Walk `releases` in order and report every date that goes backwards
fn regressions<'a>(releases: impl IntoIterator<Item = &'a Release>, what: &str) -> Vec<Warning> {
  let mut warnings = Vec::new();
  let mut latest: Option<(&Release, NaiveDate)> = None;

  for release in releases {
    match latest {
      Some((prev, date)) if release.date < date => warnings.push(
        Warning::new(
          WarningKind::ReleaseDateRegression,
          release,
          "date",
          format!(
            "released {} but earlier {} {} was released {}",
            release.date, what, prev.version, date
          ),
        )
        .with_suggestion("Check the release date or the version number"),
      ),
      _ => latest = Some((release, release.date)),
    }
  }

  warnings
}

/// Release dates never go backwards as versions go up
pub struct ReleaseDatesCheck;

impl Check for ReleaseDatesCheck {
  fn name(&self) -> &'static str {
    "release-dates"
  }

  fn description(&self) -> &'static str {
    "Release dates are non-decreasing within a minor line and across lines"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    let mut lines: BTreeMap<(u64, u64), Vec<&Release>> = BTreeMap::new();
    for release in ctx.ledger.releases() {
      lines.entry(release.line()).or_default().push(release);
    }

    let mut warnings = regressions(lines.values().filter_map(|line| line.first().copied()), "line");
    for line in lines.values() {
      warnings.extend(regressions(line.iter().copied(), "release"));
    }
    warnings
  }
}

/// Commits are not dated after their release
pub struct CommitDatesCheck;

impl Check for CommitDatesCheck {
  fn name(&self) -> &'static str {
    "commit-dates"
  }

  fn description(&self) -> &'static str {
    "Commits are dated on or before their release date"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    let tolerance = Days::new(ctx.config.commit_date_tolerance_days);
    let mut warnings = Vec::new();

    for release in ctx.ledger.releases() {
      let cutoff = release.date.checked_add_days(tolerance).unwrap_or(NaiveDate::MAX);

      for (idx, commit) in release.commits.iter().enumerate() {
        let day = commit.date.date_naive();
        if day > cutoff {
          warnings.push(Warning::new(
            WarningKind::CommitAfterRelease,
            release,
            format!("commits[{}].date", idx),
            format!(
              "commit {} is dated {} after the release date {}",
              commit.short_sha(),
              day,
              release.date
            ),
          ));
        }
      }
    }

    warnings
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::config::ChecksConfig;
  use crate::ledger::Ledger;
  use crate::ledger::test_support::*;

  fn run(check: &dyn Check, ledger: &Ledger, config: &ChecksConfig) -> Vec<Warning> {
    check.run(&CheckContext { ledger, config })
  }

  #[test]
  fn test_backport_is_not_a_regression() {
    let ledger = Ledger::load(vec![
      release("0.23.0", "2022-07-11"),
      release("0.24.0", "2022-08-15"),
      release("0.23.3", "2022-08-20"),
      release("0.24.1", "2022-09-12"),
    ])
    .unwrap();
    assert!(run(&ReleaseDatesCheck, &ledger, &ChecksConfig::default()).is_empty());
  }

  #[test]
  fn test_regressions() {
    let ledger = Ledger::load(vec![
      release("0.23.0", "2022-07-11"),
      release("0.24.0", "2022-07-01"),
      release("0.24.1", "2022-09-12"),
      release("0.24.2", "2022-09-01"),
    ])
    .unwrap();

    let warnings = run(&ReleaseDatesCheck, &ledger, &ChecksConfig::default());
    let versions: Vec<_> = warnings.iter().map(|w| w.version.as_str()).collect();
    assert_eq!(versions, vec!["0.24.0", "0.24.2"]);
    assert!(warnings.iter().all(|w| w.kind == WarningKind::ReleaseDateRegression));
  }

  #[test]
  fn test_commit_after_release_with_tolerance() {
    let mut raw = release("0.16.1", "2021-08-31");
    raw.commits = vec![
      commit(1, "2021-08-30 10:00:00 UTC"),
      commit(2, "2021-08-31 23:59:59 UTC"),
      commit(3, "2021-09-02 09:00:00 UTC"),
    ];
    let ledger = Ledger::load(vec![raw]).unwrap();

    let warnings = run(&CommitDatesCheck, &ledger, &ChecksConfig::default());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "commits[2].date");

    let lenient = ChecksConfig {
      commit_date_tolerance_days: 2,
      ..Default::default()
    };
    assert!(run(&CommitDatesCheck, &ledger, &lenient).is_empty());
  }
}
