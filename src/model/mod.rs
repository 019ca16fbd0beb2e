//! Release record data model
//!
//! Records cross the parse boundary as [`raw::RawRelease`] (every field
//! optional, loose shapes accepted) and are converted into the typed
//! [`Release`] once every required field is present and well-formed.

pub mod changelog;
pub mod commit;
pub mod raw;
pub mod release;

pub use changelog::{ChangelogEntry, EntryType};
pub use commit::Commit;
pub use raw::{DateField, OneOrMany, RawChangelogEntry, RawCommit, RawRelease, RawWhatsNext};
pub use release::{Release, WhatsNext};
