//! Error types for release-ledger with contextual messages and exit codes
//!
//! Structural problems in release records are fatal and live in
//! [`StructuralError`]. Everything the CLI can fail with is wrapped in
//! [`LedgerError`], which maps to a process exit code and an optional help line.

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown version)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (structural errors, or warnings in strict mode)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-ledger
#[derive(Debug)]
pub enum LedgerError {
  /// Configuration errors
  Config(ConfigError),

  /// A release record violates a hard invariant
  Structural(StructuralError),

  /// Query errors (unknown version, bad range)
  Query(QueryError),

  /// Validation finished with a failing report
  ValidationFailed { errors: usize, warnings: usize },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl LedgerError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    LedgerError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    LedgerError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      LedgerError::Message { message, context, help } => LedgerError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      LedgerError::Io(err) => LedgerError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      LedgerError::Config(_) => ExitCode::User,
      LedgerError::Structural(_) => ExitCode::Validation,
      LedgerError::Query(_) => ExitCode::User,
      LedgerError::ValidationFailed { .. } => ExitCode::Validation,
      LedgerError::Io(_) => ExitCode::System,
      LedgerError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      LedgerError::Config(e) => e.help_message(),
      LedgerError::Structural(e) => e.help_message(),
      LedgerError::Query(e) => e.help_message(),
      LedgerError::ValidationFailed { errors, .. } if *errors == 0 => {
        Some("Only warnings were found. Drop --strict to let them pass.".to_string())
      }
      LedgerError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for LedgerError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LedgerError::Config(e) => write!(f, "{}", e),
      LedgerError::Structural(e) => write!(f, "{}", e),
      LedgerError::Query(e) => write!(f, "{}", e),
      LedgerError::ValidationFailed { errors, warnings } => {
        write!(f, "Validation failed: {} error(s), {} warning(s)", errors, warnings)
      }
      LedgerError::Io(e) => write!(f, "I/O error: {}", e),
      LedgerError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for LedgerError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      LedgerError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for LedgerError {
  fn from(err: io::Error) -> Self {
    LedgerError::Io(err)
  }
}

impl From<String> for LedgerError {
  fn from(msg: String) -> Self {
    LedgerError::message(msg)
  }
}

impl From<&str> for LedgerError {
  fn from(msg: &str) -> Self {
    LedgerError::message(msg)
  }
}

impl From<StructuralError> for LedgerError {
  fn from(err: StructuralError) -> Self {
    LedgerError::Structural(err)
  }
}

impl From<QueryError> for LedgerError {
  fn from(err: QueryError) -> Self {
    LedgerError::Query(err)
  }
}

impl From<ConfigError> for LedgerError {
  fn from(err: ConfigError) -> Self {
    LedgerError::Config(err)
  }
}

impl From<toml_edit::de::Error> for LedgerError {
  fn from(err: toml_edit::de::Error) -> Self {
    LedgerError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for LedgerError {
  fn from(err: toml_edit::ser::Error) -> Self {
    LedgerError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for LedgerError {
  fn from(err: serde_json::Error) -> Self {
    LedgerError::message(format!("JSON error: {}", err))
  }
}

impl From<walkdir::Error> for LedgerError {
  fn from(err: walkdir::Error) -> Self {
    match err.into_io_error() {
      Some(io_err) => LedgerError::Io(io_err),
      None => LedgerError::message("Directory walk failed: filesystem loop detected"),
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A disabled check name does not match any registered check
  UnknownCheck { name: String, available: Vec<String> },

  /// Config file could not be parsed
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::UnknownCheck { available, .. } => Some(format!("Available checks: {}", available.join(", "))),
      ConfigError::Invalid { .. } => {
        Some("See the [checks] table format: disabled, commit_date_tolerance_days, strict.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::UnknownCheck { name, .. } => {
        write!(f, "Unknown check '{}' in [checks] disabled", name)
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Hard invariant violations found while loading release records.
///
/// Any of these aborts `Ledger::load`; no partial ledger is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralError {
  /// Two records share a version (semver precedence, build metadata ignored)
  DuplicateVersion {
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    second: Option<PathBuf>,
  },

  /// A version string is not valid semver
  MalformedVersion {
    version: String,
    reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<PathBuf>,
  },

  /// The same sha appears twice in one release's commits
  DuplicateCommitSha {
    version: String,
    sha: String,
    first_index: usize,
    second_index: usize,
  },

  /// A required field is absent
  MissingRequiredField {
    version: String,
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<PathBuf>,
  },

  /// A present field cannot be interpreted
  MalformedField { version: String, field: String, reason: String },

  /// A file is not a release record at all
  MalformedRecord { source: PathBuf, reason: String },
}

impl StructuralError {
  /// Stable kebab-case identifier
  pub fn kind(&self) -> &'static str {
    match self {
      StructuralError::DuplicateVersion { .. } => "duplicate-version",
      StructuralError::MalformedVersion { .. } => "malformed-version",
      StructuralError::DuplicateCommitSha { .. } => "duplicate-commit-sha",
      StructuralError::MissingRequiredField { .. } => "missing-required-field",
      StructuralError::MalformedField { .. } => "malformed-field",
      StructuralError::MalformedRecord { .. } => "malformed-record",
    }
  }

  /// Version of the offending record, if one could be identified
  pub fn version(&self) -> Option<&str> {
    match self {
      StructuralError::DuplicateVersion { version, .. }
      | StructuralError::MalformedVersion { version, .. }
      | StructuralError::DuplicateCommitSha { version, .. }
      | StructuralError::MissingRequiredField { version, .. }
      | StructuralError::MalformedField { version, .. } => Some(version),
      StructuralError::MalformedRecord { .. } => None,
    }
  }

  /// Dotted path of the offending field, e.g. `commits[3].sha`
  pub fn field(&self) -> Option<String> {
    match self {
      StructuralError::DuplicateVersion { .. } | StructuralError::MalformedVersion { .. } => {
        Some("version".to_string())
      }
      StructuralError::DuplicateCommitSha { second_index, .. } => Some(format!("commits[{}].sha", second_index)),
      StructuralError::MissingRequiredField { field, .. } | StructuralError::MalformedField { field, .. } => {
        Some(field.clone())
      }
      StructuralError::MalformedRecord { .. } => None,
    }
  }

  pub fn help_message(&self) -> Option<String> {
    match self {
      StructuralError::DuplicateVersion { .. } => {
        Some("Each release must be recorded exactly once. Merge or renumber the duplicate record.".to_string())
      }
      StructuralError::MalformedVersion { .. } => {
        Some("Versions must be plain semver without a leading 'v' (e.g. \"0.24.1\").".to_string())
      }
      StructuralError::DuplicateCommitSha { .. } => Some("Remove the repeated commit from the list.".to_string()),
      StructuralError::MissingRequiredField { field, .. } => Some(format!("Add the `{}` field.", field)),
      StructuralError::MalformedField { .. } => None,
      StructuralError::MalformedRecord { .. } => {
        Some("Release files must be a single TOML or JSON table.".to_string())
      }
    }
  }
}

impl fmt::Display for StructuralError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StructuralError::DuplicateVersion { version, first, second } => {
        write!(f, "Duplicate version {}", version)?;
        if let (Some(first), Some(second)) = (first, second) {
          write!(f, " (in {} and {})", first.display(), second.display())?;
        }
        Ok(())
      }
      StructuralError::MalformedVersion { version, reason, source } => {
        write!(f, "Malformed version '{}': {}", version, reason)?;
        if let Some(source) = source {
          write!(f, " ({})", source.display())?;
        }
        Ok(())
      }
      StructuralError::DuplicateCommitSha {
        version,
        sha,
        first_index,
        second_index,
      } => write!(
        f,
        "{}: commit {} listed twice (commits[{}] and commits[{}])",
        version, sha, first_index, second_index
      ),
      StructuralError::MissingRequiredField { version, field, source } => {
        write!(f, "{}: missing required field `{}`", version, field)?;
        if let Some(source) = source {
          write!(f, " ({})", source.display())?;
        }
        Ok(())
      }
      StructuralError::MalformedField { version, field, reason } => {
        write!(f, "{}: malformed `{}`: {}", version, field, reason)
      }
      StructuralError::MalformedRecord { source, reason } => {
        write!(f, "{}: not a release record: {}", source.display(), reason)
      }
    }
  }
}

impl std::error::Error for StructuralError {}

/// Errors from ledger queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
  /// No release with this version
  NotFound { version: String },

  /// A version argument does not parse
  InvalidVersion { version: String, reason: String },

  /// `from` sorts after `to`
  InvalidRange { from: String, to: String },
}

impl QueryError {
  fn help_message(&self) -> Option<String> {
    match self {
      QueryError::NotFound { .. } => Some("Run `release-ledger versions <dir>` to list known versions.".to_string()),
      QueryError::InvalidRange { .. } => Some("The range is half-open: --from is included, --to is not.".to_string()),
      QueryError::InvalidVersion { .. } => None,
    }
  }
}

impl fmt::Display for QueryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QueryError::NotFound { version } => write!(f, "Release {} not found", version),
      QueryError::InvalidVersion { version, reason } => {
        write!(f, "Invalid version '{}': {}", version, reason)
      }
      QueryError::InvalidRange { from, to } => {
        write!(f, "Invalid version range: {} sorts after {}", from, to)
      }
    }
  }
}

impl std::error::Error for QueryError {}

/// Result type alias for release-ledger
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> LedgerResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> LedgerResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<LedgerError>,
{
  fn context(self, ctx: impl Into<String>) -> LedgerResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> LedgerResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &LedgerError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
