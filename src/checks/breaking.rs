use super::trait_def::{Check, CheckContext, Warning, WarningKind};

/// Breaking entries need a description for the upgrade guide
pub struct BreakingDescriptionCheck;

impl Check for BreakingDescriptionCheck {
  fn name(&self) -> &'static str {
    "breaking-descriptions"
  }

  fn description(&self) -> &'static str {
    "Breaking changelog entries have a non-empty description"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    ctx
      .ledger
      .releases()
      .iter()
      .flat_map(|release| {
        release
          .changelog
          .iter()
          .enumerate()
          .filter(|(_, e)| e.breaking && e.description.trim().is_empty())
          .map(move |(idx, e)| {
            Warning::new(
              WarningKind::EmptyBreakingChangeDescription,
              release,
              format!("changelog[{}].description", idx),
              format!("breaking {} entry has no description", e.entry_type),
            )
            .with_suggestion("Describe what users must change when upgrading")
          })
      })
      .collect()
  }
}
