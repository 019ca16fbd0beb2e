//! release-ledger: schema validation and queries over per-release changelog records
//!
//! A releases directory holds one TOML or JSON record per published version.
//! Records are loaded into an immutable [`Ledger`] once they pass structural
//! checks; content checks then report warnings, and the query API serves
//! read-only views for rendering release notes and upgrade guides.
//!
//! ```rust,ignore
//! use release_ledger::{ChecksConfig, Ledger, read_release_dir, validate};
//!
//! let set = read_release_dir(Path::new("releases"))?;
//! let ledger = Ledger::load(set.records)?;
//! let report = validate(&ledger, &ChecksConfig::default());
//! let upgrade = ledger.query_breaking_changes("0.23.0", "0.25.0")?;
//! ```

pub mod checks;
pub mod core;
pub mod ledger;
pub mod model;

pub use checks::{ValidationReport, Warning, WarningKind, check_record_set, check_records, validate};
pub use crate::core::config::{ChecksConfig, LedgerConfig};
pub use crate::core::context::LedgerContext;
pub use crate::core::error::{ConfigError, ExitCode, LedgerError, LedgerResult, QueryError, StructuralError};
pub use ledger::{Ledger, RecordFormat, RecordSet, export_dir, read_release_dir};
pub use model::{ChangelogEntry, Commit, EntryType, RawRelease, Release};
