//! Check runner for executing content checks

use super::trait_def::{Check, CheckContext, Warning};
use std::sync::Arc;

/// Check runner that executes multiple checks
pub struct CheckRunner {
  checks: Vec<Arc<dyn Check>>,
}

impl CheckRunner {
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  pub fn add_check(&mut self, check: Arc<dyn Check>) {
    self.checks.push(check);
  }

  /// Run every enabled check, in registration order
  pub fn run_all(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for check in &self.checks {
      if ctx.config.is_disabled(check.name()) {
        tracing::debug!(check = check.name(), "check disabled by config");
        continue;
      }

      let found = check.run(ctx);
      tracing::debug!(check = check.name(), warnings = found.len(), "check finished");
      warnings.extend(found);
    }

    warnings
  }

  pub fn checks(&self) -> &[Arc<dyn Check>] {
    &self.checks
  }

  /// Names of all registered checks
  pub fn names(&self) -> Vec<&'static str> {
    self.checks.iter().map(|c| c.name()).collect()
  }
}

impl Default for CheckRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a runner with all built-in checks
pub fn create_default_runner() -> CheckRunner {
  let mut runner = CheckRunner::new();

  runner.add_check(Arc::new(super::fixed_in::FixedInCheck));
  runner.add_check(Arc::new(super::breaking::BreakingDescriptionCheck));
  runner.add_check(Arc::new(super::counts::CommitCountsCheck));
  runner.add_check(Arc::new(super::whats_next::WhatsNextCheck));
  runner.add_check(Arc::new(super::pr_numbers::PrNumbersCheck));
  runner.add_check(Arc::new(super::dates::ReleaseDatesCheck));
  runner.add_check(Arc::new(super::dates::CommitDatesCheck));
  runner.add_check(Arc::new(super::shas::UniqueShasCheck));

  runner
}
