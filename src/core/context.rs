//! Ledger context - build once, pass to every command
//!
//! ```text
//! main.rs:
//!   LedgerContext::build(dir) -> &LedgerContext
//!   |
//!   v
//! commands/validate.rs, query.rs, export.rs:
//!   fn run_*(ctx: &LedgerContext, ...)
//! ```

use crate::checks::{self, ValidationReport, create_default_runner};
use crate::core::config::LedgerConfig;
use crate::core::error::{LedgerError, LedgerResult};
use crate::ledger::{Ledger, RecordSet, read_release_dir};
use std::path::{Path, PathBuf};

/// Releases directory plus its configuration
#[derive(Debug, Clone)]
pub struct LedgerContext {
  /// Directory holding one file per release
  pub root: PathBuf,

  /// `ledger.toml`, or defaults when absent
  pub config: LedgerConfig,
}

impl LedgerContext {
  /// Load and validate configuration for a releases directory
  pub fn build(root: &Path) -> LedgerResult<Self> {
    let config = LedgerConfig::load(root)?;
    config.checks.validate(&create_default_runner().names())?;

    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Read every release file
  pub fn read_records(&self) -> LedgerResult<RecordSet> {
    read_release_dir(&self.root)
  }

  /// Full sweep: every structural error, or warnings for a loadable ledger
  pub fn report(&self) -> LedgerResult<ValidationReport> {
    let set = self.read_records()?;
    Ok(checks::check_record_set(set, &self.config.checks))
  }

  /// Load the ledger, failing on the first structural error
  pub fn load_ledger(&self) -> LedgerResult<Ledger> {
    let set = self.read_records()?;
    if let Some(err) = set.errors.into_iter().next() {
      return Err(LedgerError::from(err));
    }
    Ok(Ledger::load(set.records)?)
  }
}
