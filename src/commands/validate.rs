use release_ledger::checks::ValidationReport;
use release_ledger::core::context::LedgerContext;
use release_ledger::core::error::{LedgerError, LedgerResult};

/// Run the validate command
///
/// Exits with the validation code when structural errors exist, or when
/// warnings exist and `--strict` (or `[checks] strict`) is set.
pub fn run_validate(ctx: &LedgerContext, json: bool, strict: bool) -> LedgerResult<()> {
  let strict = strict || ctx.config.checks.strict;
  let report = ctx.report()?;

  if json {
    println!("{}", report.to_json()?);
  } else {
    println!("🔍 Validating releases in {}\n", ctx.root.display());
    print_report(&report);
  }

  if report.passed(strict) {
    Ok(())
  } else {
    Err(LedgerError::ValidationFailed {
      errors: report.errors.len(),
      warnings: report.warnings.len(),
    })
  }
}

fn print_report(report: &ValidationReport) {
  if report.has_errors() {
    println!("❌ Structural errors ({}):", report.errors.len());
    for error in &report.errors {
      println!("   [{}] {}", error.kind(), error);
      if let Some(help) = error.help_message() {
        println!("      💡 {}", help);
      }
    }
    println!();
  }

  if !report.warnings.is_empty() {
    println!("⚠️  Warnings ({}):", report.warnings.len());
    for warning in &report.warnings {
      println!("   [{}] {}", warning.kind, warning);
      if let Some(suggestion) = &warning.suggestion {
        println!("      💡 {}", suggestion);
      }
    }
    println!();

    for (kind, count) in report.warning_counts() {
      println!("   {:>4}  {}", count, kind);
    }
    println!();
  }

  if report.has_errors() {
    println!(
      "❌ {} error(s), {} warning(s); no ledger was loaded",
      report.errors.len(),
      report.warnings.len()
    );
  } else if report.warnings.is_empty() {
    println!("✅ {} release(s) loaded, no problems found", report.releases);
  } else {
    println!(
      "✅ {} release(s) loaded with {} warning(s)",
      report.releases,
      report.warnings.len()
    );
  }
}
