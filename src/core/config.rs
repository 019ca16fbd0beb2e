use crate::core::error::{ConfigError, LedgerResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names that are configuration, never release records
pub const CONFIG_FILE_NAMES: &[&str] = &["ledger.toml", ".ledger.toml"];

/// Configuration for release-ledger
/// Searched in order: ledger.toml, .ledger.toml, .config/ledger.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
  #[serde(default)]
  pub checks: ChecksConfig,
}

/// Content check configuration
///
/// # Example
///
/// ```toml
/// [checks]
/// disabled = ["commit-dates"]
/// commit_date_tolerance_days = 2
/// strict = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecksConfig {
  /// Check names to skip
  #[serde(default)]
  pub disabled: Vec<String>,

  /// How many days after its release a commit may be dated
  #[serde(default)]
  pub commit_date_tolerance_days: u64,

  /// Treat warnings as errors (exit code 3)
  #[serde(default)]
  pub strict: bool,
}

impl ChecksConfig {
  /// Validate against the names of registered checks
  pub fn validate(&self, available: &[&str]) -> Result<(), ConfigError> {
    if let Some(unknown) = self.disabled.iter().find(|name| !available.contains(&name.as_str())) {
      return Err(ConfigError::UnknownCheck {
        name: unknown.clone(),
        available: available.iter().map(|s| s.to_string()).collect(),
      });
    }
    Ok(())
  }

  /// Whether a check is switched off
  pub fn is_disabled(&self, name: &str) -> bool {
    self.disabled.iter().any(|d| d == name)
  }
}

impl LedgerConfig {
  /// Find config file in search order: ledger.toml, .ledger.toml, .config/ledger.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("ledger.toml"),
      path.join(".ledger.toml"),
      path.join(".config").join("ledger.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config from the releases directory, or defaults when none exists
  pub fn load(path: &Path) -> LedgerResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: LedgerConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Invalid {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;

    tracing::debug!(path = %config_path.display(), "loaded ledger config");
    Ok(config)
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }
}
