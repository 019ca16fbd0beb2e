use super::trait_def::{Check, CheckContext, Warning, WarningKind};

/// Pull request numbers are positive
pub struct PrNumbersCheck;

impl Check for PrNumbersCheck {
  fn name(&self) -> &'static str {
    "pr-numbers"
  }

  fn description(&self) -> &'static str {
    "Commit and changelog pull request numbers are positive"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for release in ctx.ledger.releases() {
      for (idx, entry) in release.changelog.iter().enumerate() {
        for (n, pr) in entry.pr_numbers.iter().flatten().enumerate() {
          if *pr <= 0 {
            warnings.push(Warning::new(
              WarningKind::InvalidPrNumber,
              release,
              format!("changelog[{}].pr_numbers[{}]", idx, n),
              format!("pull request number {} is not positive", pr),
            ));
          }
        }
      }

      for (idx, commit) in release.commits.iter().enumerate() {
        if commit.pr_number <= 0 {
          warnings.push(Warning::new(
            WarningKind::InvalidPrNumber,
            release,
            format!("commits[{}].pr_number", idx),
            format!(
              "commit {} has pull request number {}",
              commit.short_sha(),
              commit.pr_number
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

  #[test]
  fn test_non_positive_pr_numbers() {
    let mut raw = release("0.25.0", "2022-11-07");
    let mut fix = entry("fix", &[], "fix acks", false);
    fix.pr_numbers = Some(vec![14001, 0]);
    raw.changelog = vec![fix];
    let mut bad = commit(1, "2022-11-01");
    bad.pr_number = Some(-1);
    raw.commits = vec![bad, commit(2, "2022-11-02")];
    let ledger = Ledger::load(vec![raw]).unwrap();
    let config = ChecksConfig::default();

    let warnings = PrNumbersCheck.run(&CheckContext {
      ledger: &ledger,
      config: &config,
    });
    let fields: Vec<_> = warnings.iter().map(|w| w.field.as_str()).collect();
    assert_eq!(fields, vec!["changelog[0].pr_numbers[1]", "commits[0].pr_number"]);
  }
}
