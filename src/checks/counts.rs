use super::trait_def::{Check, CheckContext, Warning, WarningKind};

/// Commit size counters are present and non-negative
pub struct CommitCountsCheck;

impl Check for CommitCountsCheck {
  fn name(&self) -> &'static str {
    "commit-counts"
  }

  fn description(&self) -> &'static str {
    "Commit files/insertions/deletions counts are present and non-negative"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for release in ctx.ledger.releases() {
      for (idx, commit) in release.commits.iter().enumerate() {
        for (name, value) in commit.counts() {
          let field = format!("commits[{}].{}", idx, name);
          match value {
            None => warnings.push(Warning::new(
              WarningKind::MissingCountField,
              release,
              field,
              format!("commit {} has no {}", commit.short_sha(), name),
            )),
            Some(n) if n < 0 => warnings.push(
              Warning::new(
                WarningKind::NegativeCountField,
                release,
                field,
                format!("commit {} has {} = {}", commit.short_sha(), name, n),
              )
              .with_suggestion("Counts come from `git log --numstat` and are never negative"),
            ),
            Some(_) => {}
          }
        }
      }
    }

    warnings
  }
}
