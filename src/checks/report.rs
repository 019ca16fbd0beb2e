//! Validation report: structural errors plus content warnings

use super::trait_def::{Warning, WarningKind};
use crate::core::error::{LedgerResult, StructuralError};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
  /// Number of releases that were loaded (0 when errors exist)
  pub releases: usize,
  pub errors: Vec<StructuralError>,
  pub warnings: Vec<Warning>,
}

impl ValidationReport {
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  /// No errors and no warnings
  pub fn is_clean(&self) -> bool {
    self.errors.is_empty() && self.warnings.is_empty()
  }

  /// Whether a CI run should pass; `strict` fails on warnings too
  pub fn passed(&self, strict: bool) -> bool {
    if strict { self.is_clean() } else { !self.has_errors() }
  }

  /// Warnings per kind, in a stable order
  pub fn warning_counts(&self) -> BTreeMap<WarningKind, usize> {
    let mut counts = BTreeMap::new();
    for warning in &self.warnings {
      *counts.entry(warning.kind).or_insert(0) += 1;
    }
    counts
  }

  pub fn to_json(&self) -> LedgerResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}
