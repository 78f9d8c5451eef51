//! # Settings Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::io::Error     ──►  SettingsError::Io         (read / write file)  │
//! │  toml::de::Error    ──►  SettingsError::Parse      (malformed TOML)     │
//! │  toml::ser::Error   ──►  SettingsError::Serialize  (save)               │
//! │  no home directory  ──►  SettingsError::NoConfigDir                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Out-of-range values are never errors: they are clamped during sanitizing.

use thiserror::Error;

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(String),

    #[error("Invalid settings file: {0}")]
    Parse(String),

    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(err: toml::de::Error) -> Self {
        SettingsError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(err: toml::ser::Error) -> Self {
        SettingsError::Serialize(err.to_string())
    }
}
