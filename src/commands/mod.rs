//! CLI commands for release-ledger
//!
//! ## Validation
//! - **validate**: load every record, print structural errors and warnings
//!
//! ## Queries
//! - **show**, **breaking**, **scope**, **author**, **versions**
//!
//! ## Export
//! - **export**: write the ledger back out as TOML or JSON records
//!
//! All commands accept `&LedgerContext` so configuration is loaded once.

pub mod export;
pub mod query;
pub mod validate;

pub use export::run_export;
pub use query::{run_author, run_breaking, run_scope, run_show, run_versions};
pub use validate::run_validate;
