//! Core building blocks shared by the library and the CLI
//!
//! - **config**: `ledger.toml` parsing and validation
//! - **context**: releases directory plus configuration, built once per run
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;
