use release_ledger::core::context::LedgerContext;
use release_ledger::core::error::LedgerResult;
use release_ledger::ledger::{RecordFormat, export_dir};
use std::path::Path;

/// Run the export command
pub fn run_export(ctx: &LedgerContext, out: &Path, format: &str) -> LedgerResult<()> {
  let format: RecordFormat = format.parse()?;
  let ledger = ctx.load_ledger()?;

  let written = export_dir(&ledger, out, format)?;
  println!(
    "✅ Exported {} release(s) as {} to {}",
    written.len(),
    format,
    out.display()
  );
  Ok(())
}
