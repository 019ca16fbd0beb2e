//! Content checks and the validation entry points
//!
//! Structural problems (duplicate versions, malformed semver, duplicate shas
//! inside a release, missing fields) stop a ledger from loading and are
//! reported as errors. Everything else is a warning produced by a [`Check`].
//!
//! # Built-in Checks
//!
//! - **fixed-in**: known-issue "fixed in" references resolve to a later release
//! - **breaking-descriptions**: breaking entries are described
//! - **commit-counts**: commit counters present and non-negative
//! - **whats-next**: what's-next items have titles
//! - **pr-numbers**: pull request numbers are positive
//! - **release-dates**: release dates do not go backwards
//! - **commit-dates**: commits are not dated after their release
//! - **unique-shas**: a commit is listed in one release only

mod breaking;
mod counts;
mod dates;
mod fixed_in;
mod pr_numbers;
mod report;
mod runner;
mod shas;
mod trait_def;
mod whats_next;

pub use fixed_in::fixed_in_versions;
pub use report::ValidationReport;
pub use runner::{CheckRunner, create_default_runner};
pub use trait_def::{Check, CheckContext, Warning, WarningKind};

use crate::core::config::ChecksConfig;
use crate::ledger::{self, Ledger, RecordSet};
use crate::model::RawRelease;

/// Run every enabled check over a loaded ledger
///
/// Never fails. A loaded ledger has no structural errors, so the report only
/// carries warnings.
pub fn validate(ledger: &Ledger, config: &ChecksConfig) -> ValidationReport {
  let runner = create_default_runner();
  let ctx = CheckContext { ledger, config };

  ValidationReport {
    releases: ledger.len(),
    errors: Vec::new(),
    warnings: runner.run_all(&ctx),
  }
}

/// Load and validate raw records in one pass
///
/// Unlike [`Ledger::load`], every structural error is reported. Warnings are
/// only produced when the records load.
pub fn check_records(records: impl IntoIterator<Item = RawRelease>, config: &ChecksConfig) -> ValidationReport {
  let scan = ledger::scan(records);
  match scan.ledger {
    Some(ledger) => validate(&ledger, config),
    None => ValidationReport {
      releases: 0,
      errors: scan.errors,
      warnings: Vec::new(),
    },
  }
}

/// Validate everything read from a releases directory
///
/// A file that is not a release record means the ledger cannot load, so its
/// error is reported alongside any structural errors in the remaining records
/// and no content checks run.
pub fn check_record_set(set: RecordSet, config: &ChecksConfig) -> ValidationReport {
  if set.errors.is_empty() {
    return check_records(set.records, config);
  }

  let mut errors = set.errors;
  errors.extend(ledger::scan(set.records).errors);
  ValidationReport {
    releases: 0,
    errors,
    warnings: Vec::new(),
  }
}
