//! Integration tests for release-ledger

mod helpers;
mod test_export;
mod test_query;
mod test_validate;
