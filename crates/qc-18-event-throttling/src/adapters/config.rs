use crate::config::ThrottlerConfig;
use crate::domain::{ThrottlerError, ThrottlerResult};
use crate::ports::ConfigProvider;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Enable or disable throttling (`1`/`true`, `0`/`false`)
pub const ENV_ENABLED: &str = "QC_THROTTLER_ENABLED";
/// Dominant stake threshold
pub const ENV_DOMINANT_THRESHOLD: &str = "QC_THROTTLER_DOMINANT_THRESHOLD";
/// Dominating timeout in attempts
pub const ENV_DOMINATING_TIMEOUT: &str = "QC_THROTTLER_DOMINATING_TIMEOUT";
/// Non-dominating timeout in attempts
pub const ENV_NON_DOMINATING_TIMEOUT: &str = "QC_THROTTLER_NON_DOMINATING_TIMEOUT";
/// Frame stall timeout in attempts
pub const ENV_FRAME_STALL_TIMEOUT: &str = "QC_THROTTLER_FRAME_STALL_TIMEOUT";

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Environment variable with an unparsable value.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    /// Values out of their accepted ranges.
    #[error("Invalid throttler config: {0}")]
    Invalid(#[from] ThrottlerError),
}

// ============================================================================
// StaticConfigProvider - Fixed config for testing/development
// ============================================================================

/// Static configuration provider.
///
/// Useful for testing and development. For production, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: ThrottlerConfig,
}

impl StaticConfigProvider {
    /// Create with a validated config.
    pub fn new(config: ThrottlerConfig) -> ThrottlerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Defaults with `QC_THROTTLER_*` overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ThrottlerConfig::default();
        apply_env_overrides(&mut config, lookup)?;
        Ok(Self::new(config)?)
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get_throttler_config(&self) -> ThrottlerConfig {
        self.config
    }
}

// ============================================================================
// TomlConfigProvider - Production Config Loading
// ============================================================================

/// Configuration file structure.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    emitter: EmitterSection,
}

#[derive(Debug, Default, Deserialize)]
struct EmitterSection {
    #[serde(default)]
    throttler: ThrottlerConfig,
}

/// TOML-based configuration provider.
///
/// Reads the `[emitter.throttler]` table; absent keys take their defaults
/// and other tables are ignored.
///
/// # Config File Format
///
/// ```toml
/// [emitter.throttler]
/// enabled = true
/// dominant_stake_threshold = 0.75
/// dominating_timeout = 3
/// non_dominating_timeout = 100
/// frame_stall_timeout = 10
/// ```
#[derive(Debug, Clone)]
pub struct TomlConfigProvider {
    config: ThrottlerConfig,
}

impl TomlConfigProvider {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        file.emitter.throttler.validate()?;
        Ok(Self {
            config: file.emitter.throttler,
        })
    }

    /// Apply `QC_THROTTLER_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, then re-validate.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        apply_env_overrides(&mut self.config, lookup)?;
        self.config.validate()?;
        Ok(self)
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn get_throttler_config(&self) -> ThrottlerConfig {
        self.config
    }
}

/// Overwrite fields of `config` with the values found through `lookup`.
///
/// Values are not range-checked here; callers validate the result.
pub fn apply_env_overrides(
    config: &mut ThrottlerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(ENV_ENABLED) {
        config.enabled = parse_bool(ENV_ENABLED, &value)?;
    }
    if let Some(value) = lookup(ENV_DOMINANT_THRESHOLD) {
        config.dominant_stake_threshold = parse_value(ENV_DOMINANT_THRESHOLD, &value)?;
    }
    if let Some(value) = lookup(ENV_DOMINATING_TIMEOUT) {
        config.dominating_timeout = parse_value(ENV_DOMINATING_TIMEOUT, &value)?;
    }
    if let Some(value) = lookup(ENV_NON_DOMINATING_TIMEOUT) {
        config.non_dominating_timeout = parse_value(ENV_NON_DOMINATING_TIMEOUT, &value)?;
    }
    if let Some(value) = lookup(ENV_FRAME_STALL_TIMEOUT) {
        config.frame_stall_timeout = parse_value(ENV_FRAME_STALL_TIMEOUT, &value)?;
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(invalid_env(key, value)),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid_env(key, value))
}

fn invalid_env(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    }
}
