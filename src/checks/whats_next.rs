use super::trait_def::{Check, CheckContext, Warning, WarningKind};

/// "What's next" items need a title
pub struct WhatsNextCheck;

impl Check for WhatsNextCheck {
  fn name(&self) -> &'static str {
    "whats-next"
  }

  fn description(&self) -> &'static str {
    "What's-next items have a non-empty title"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for release in ctx.ledger.releases() {
      for (idx, item) in release.whats_next.iter().enumerate() {
        if item.title.trim().is_empty() {
          warnings.push(Warning::new(
            WarningKind::EmptyWhatsNextTitle,
            release,
            format!("whats_next[{}].title", idx),
            "what's-next item has no title",
          ));
        }
      }
    }
    warnings
  }
}
