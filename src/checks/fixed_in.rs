//! Known-issue "fixed in" references
//!
//! Known issues are prose. A reference is any case-insensitive `fixed in`
//! followed by an optional `v` and an `X.Y.Z` version, so all of these count:
//!
//! - `Fixed in 0.24.1.`
//! - `fixed in [v0.24.1](https://...)`
//! - `Fixed in Vector 0.24.1`

use super::trait_def::{Check, CheckContext, Warning, WarningKind};
use semver::Version;
use std::cmp::Ordering;
use winnow::ascii::digit1;
use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::take_while;

const MARKER: &str = "fixed in";

fn is_decoration(c: char) -> bool {
  c.is_whitespace() || matches!(c, '[' | '(' | '`' | '*' | '_' | '"')
}

/// Parse the version right after a marker; input is lowercase
fn version_ref(input: &mut &str) -> Result<Version, ()> {
  (
    take_while(0.., is_decoration),
    opt((alt(("vector", "version")), take_while(1.., is_decoration))),
    opt('v'),
    digit1::<_, ()>.parse_to::<u64>(),
    '.',
    digit1.parse_to::<u64>(),
    '.',
    digit1.parse_to::<u64>(),
  )
    .map(|(_, _, _, major, _, minor, _, patch)| Version::new(major, minor, patch))
    .parse_next(input)
}

/// Every version referenced as "fixed in" inside `text`, in order of appearance
pub fn fixed_in_versions(text: &str) -> Vec<Version> {
  let lower = text.to_ascii_lowercase();
  let mut found = Vec::new();
  let mut rest = lower.as_str();

  while let Some(idx) = rest.find(MARKER) {
    rest = &rest[idx + MARKER.len()..];
    let mut input = rest;
    if let Ok(version) = version_ref(&mut input) {
      found.push(version);
    }
  }

  found
}

/// Known issues must point at a later, existing release
pub struct FixedInCheck;

impl Check for FixedInCheck {
  fn name(&self) -> &'static str {
    "fixed-in"
  }

  fn description(&self) -> &'static str {
    "Known-issue \"fixed in\" references resolve to a later release"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for release in ctx.ledger.releases() {
      for (idx, issue) in release.known_issues.iter().enumerate() {
        for target in fixed_in_versions(issue) {
          let problem = match ctx.ledger.get(&target) {
            None => Some(format!("references {} which is not in the ledger", target)),
            Some(fix) if fix.version.cmp_precedence(&release.version) != Ordering::Greater => Some(format!(
              "references {} which is not later than {}",
              target, release.version
            )),
            Some(fix) if fix.date <= release.date => Some(format!(
              "references {} released {}, not after this release ({})",
              target, fix.date, release.date
            )),
            Some(_) => None,
          };

          if let Some(message) = problem {
            warnings.push(
              Warning::new(
                WarningKind::DanglingFixedInReference,
                release,
                format!("known_issues[{}]", idx),
                message,
              )
              .with_suggestion("Update the known issue once the fixing release is recorded"),
            );
          }
        }
      }
    }

    warnings
  }
}
