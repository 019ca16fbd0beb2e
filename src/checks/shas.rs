use super::trait_def::{Check, CheckContext, Warning, WarningKind};
use semver::Version;
use std::collections::HashMap;

/// A commit belongs to one release
pub struct UniqueShasCheck;

impl Check for UniqueShasCheck {
  fn name(&self) -> &'static str {
    "unique-shas"
  }

  fn description(&self) -> &'static str {
    "Commit shas are unique across releases"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    let mut first_seen: HashMap<&str, &Version> = HashMap::new();
    let mut warnings = Vec::new();

    for release in ctx.ledger.releases() {
      for (idx, commit) in release.commits.iter().enumerate() {
        match first_seen.get(commit.sha.as_str()) {
          Some(owner) => warnings.push(
            Warning::new(
              WarningKind::DuplicateShaAcrossReleases,
              release,
              format!("commits[{}].sha", idx),
              format!("commit {} is also listed in {}", commit.short_sha(), owner),
            )
            .with_suggestion("Remove the commit from the release it was not part of"),
          ),
          None => {
            first_seen.insert(&commit.sha, &release.version);
          }
        }
      }
    }

    warnings
  }
}
