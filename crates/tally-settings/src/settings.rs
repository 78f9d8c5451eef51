//! # Calculator Settings
//!
//! The persisted user configuration and how it is assembled.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     TALLY_TAX_RATE=0.08                                                 │
//! │     TALLY_MODE=expression                                               │
//! │                                                                         │
//! │  2. TOML Settings File                                                  │
//! │     ~/.config/tally/settings.toml (Linux)                               │
//! │     ~/Library/Application Support/com.tally.tally/settings.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     10% tax, 3 decimals, grouping on                                    │
//! │                                                                         │
//! │  Every layer is merged field by field, then sanitized.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settings File Format
//! ```toml
//! # settings.toml
//! tax_rate = 0.08
//! precision = 2
//! grouping = true
//! scientific = false
//! theme = "dark"
//! mode = "expression"
//! ```
//!
//! ## Sanitizing
//! | Field        | Rule                                               |
//! |--------------|----------------------------------------------------|
//! | `tax_rate`   | clamped to `[0, 1]`; NaN or infinite → `0.1`       |
//! | `precision`  | clamped to `[1, 6]`, rounded; NaN or infinite → `3` |
//! | `theme`      | `"dark"` or else `"light"`                         |
//! | `mode`       | a known mode name or else `"sequential"`           |

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use tally_core::{CalculatorOptions, Mode, DEFAULT_PRECISION, DEFAULT_TAX_RATE};

use crate::error::{SettingsError, SettingsResult};

const MIN_PRECISION: f64 = 1.0;
const MAX_PRECISION: f64 = 6.0;
const SETTINGS_FILE: &str = "settings.toml";

// =============================================================================
// Theme
// =============================================================================

/// Colour scheme of a graphical front-end. Stored, never interpreted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// `"dark"` is dark; anything else is light.
    fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// The sanitized user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settings {
    /// Tax as a fraction (0.10 = 10%).
    pub tax_rate: f64,
    /// Decimal places, 1 to 6.
    pub precision: u8,
    pub grouping: bool,
    pub scientific: bool,
    pub theme: Theme,
    pub mode: Mode,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tax_rate: DEFAULT_TAX_RATE,
            precision: DEFAULT_PRECISION,
            grouping: true,
            scientific: false,
            theme: Theme::Light,
            mode: Mode::Sequential,
        }
    }
}

/// One configuration layer before sanitizing. Every field may be missing.
///
/// Accepts both the TOML spelling (`tax_rate`) and the browser-storage
/// spelling (`taxRate`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
struct SettingsLayer {
    #[serde(alias = "taxRate")]
    tax_rate: Option<f64>,
    precision: Option<f64>,
    grouping: Option<bool>,
    scientific: Option<bool>,
    theme: Option<String>,
    mode: Option<String>,
}

impl Settings {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from file and environment on top of the defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Settings file (`settings.toml`), when it exists
    /// 3. `TALLY_*` environment variables
    ///
    /// A missing file is not an error. An unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> SettingsResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`Settings::load`] with overrides read from `lookup` instead of the
    /// process environment.
    pub fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> SettingsResult<Self> {
        let mut layer = SettingsLayer::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading settings from file");
                let contents = std::fs::read_to_string(&path)?;
                layer = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Settings file not found, using defaults");
            }
        }

        layer.apply_overrides(lookup);

        Ok(Self::sanitize(layer))
    }

    /// Loads settings or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load settings: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes settings as TOML, creating parent directories as needed.
    pub fn save(&self, config_path: Option<PathBuf>) -> SettingsResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(SettingsError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Settings saved");
        Ok(path)
    }

    /// Reads settings exported from browser storage.
    ///
    /// Malformed JSON is treated as "nothing stored" and yields defaults.
    pub fn from_json_str(json: &str) -> Self {
        match serde_json::from_str::<SettingsLayer>(json) {
            Ok(layer) => Self::sanitize(layer),
            Err(e) => {
                debug!(error = %e, "Ignoring malformed settings JSON");
                Self::default()
            }
        }
    }

    /// The record the calculator core is configured with.
    pub fn options(&self) -> CalculatorOptions {
        CalculatorOptions {
            tax_rate: self.tax_rate,
            precision: self.precision,
            grouping: self.grouping,
            scientific: self.scientific,
            mode: self.mode,
        }
    }

    /// Returns the default settings file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    fn sanitize(layer: SettingsLayer) -> Self {
        let defaults = Self::default();

        let precision = clamp_number(
            layer.precision,
            MIN_PRECISION,
            MAX_PRECISION,
            f64::from(defaults.precision),
        );

        Settings {
            tax_rate: clamp_number(layer.tax_rate, 0.0, 1.0, defaults.tax_rate),
            precision: precision.round() as u8,
            grouping: layer.grouping.unwrap_or(defaults.grouping),
            scientific: layer.scientific.unwrap_or(defaults.scientific),
            theme: layer
                .theme
                .as_deref()
                .map(Theme::from_name)
                .unwrap_or(defaults.theme),
            mode: layer
                .mode
                .as_deref()
                .and_then(|name| name.parse().ok())
                .unwrap_or(defaults.mode),
        }
    }
}

impl SettingsLayer {
    /// Overrides fields from `TALLY_*` variables supplied by `lookup`.
    ///
    /// Values that do not parse are ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Tax rate
        if let Some(rate) = lookup("TALLY_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(parsed) => {
                    debug!(tax_rate = parsed, "Overriding tax rate from environment");
                    self.tax_rate = Some(parsed);
                }
                Err(_) => warn!(value = %rate, "Ignoring unparsable TALLY_TAX_RATE"),
            }
        }

        // Precision
        if let Some(precision) = lookup("TALLY_PRECISION") {
            match precision.trim().parse::<f64>() {
                Ok(parsed) => self.precision = Some(parsed),
                Err(_) => warn!(value = %precision, "Ignoring unparsable TALLY_PRECISION"),
            }
        }

        // Flags
        if let Some(grouping) = lookup("TALLY_GROUPING").and_then(|v| parse_flag(&v)) {
            self.grouping = Some(grouping);
        }
        if let Some(scientific) = lookup("TALLY_SCIENTIFIC").and_then(|v| parse_flag(&v)) {
            self.scientific = Some(scientific);
        }

        // Mode & theme
        if let Some(mode) = lookup("TALLY_MODE") {
            debug!(mode = %mode, "Overriding mode from environment");
            self.mode = Some(mode);
        }
        if let Some(theme) = lookup("TALLY_THEME") {
            self.theme = Some(theme);
        }
    }
}

/// Clamps into `[min, max]`; missing or non-finite values become `fallback`.
fn clamp_number(value: Option<f64>, min: f64, max: f64, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => fallback,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse_layer(toml_text: &str) -> SettingsLayer {
        toml::from_str(toml_text).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tax_rate, 0.1);
        assert_eq!(settings.precision, 3);
        assert!(settings.grouping);
        assert!(!settings.scientific);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.mode, Mode::Sequential);
    }

    #[test]
    fn test_sanitize_clamps_ranges() {
        let settings = Settings::sanitize(parse_layer("tax_rate = 1.5\nprecision = 10"));
        assert_eq!(settings.tax_rate, 1.0);
        assert_eq!(settings.precision, 6);

        let settings = Settings::sanitize(parse_layer("tax_rate = -0.2\nprecision = 0"));
        assert_eq!(settings.tax_rate, 0.0);
        assert_eq!(settings.precision, 1);
    }

    #[test]
    fn test_sanitize_non_finite_falls_back() {
        let settings = Settings::sanitize(parse_layer("tax_rate = nan\nprecision = inf"));
        assert_eq!(settings.tax_rate, 0.1);
        assert_eq!(settings.precision, 3);
    }

    #[test]
    fn test_sanitize_unknown_names() {
        let settings = Settings::sanitize(parse_layer("theme = \"neon\"\nmode = \"rpn\""));
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.mode, Mode::Sequential);

        let settings = Settings::sanitize(parse_layer("theme = \"dark\"\nmode = \"expression\""));
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.mode, Mode::Expression);
    }

    #[test]
    fn test_from_json_str() {
        let settings = Settings::from_json_str(
            r#"{"taxRate":0.08,"precision":2,"grouping":false,"theme":"dark","mode":"expression"}"#,
        );
        assert_eq!(settings.tax_rate, 0.08);
        assert_eq!(settings.precision, 2);
        assert!(!settings.grouping);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.mode, Mode::Expression);
    }

    #[test]
    fn test_from_json_str_partial_and_malformed() {
        let partial = Settings::from_json_str(r#"{"scientific":true}"#);
        assert!(partial.scientific);
        assert_eq!(partial.precision, 3);

        assert_eq!(Settings::from_json_str("{not json"), Settings::default());
        assert_eq!(Settings::from_json_str(""), Settings::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TALLY_TAX_RATE", "0.05"),
            ("TALLY_PRECISION", "4"),
            ("TALLY_GROUPING", "off"),
            ("TALLY_MODE", "expr"),
            ("TALLY_SCIENTIFIC", "maybe"),
        ]
        .into_iter()
        .collect();

        let mut layer = parse_layer("tax_rate = 0.2\nscientific = true");
        layer.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        let settings = Settings::sanitize(layer);

        assert_eq!(settings.tax_rate, 0.05);
        assert_eq!(settings.precision, 4);
        assert!(!settings.grouping);
        assert_eq!(settings.mode, Mode::Expression);
        // Unparsable flag keeps the file value
        assert!(settings.scientific);
    }

    #[test]
    fn test_env_override_is_still_sanitized() {
        let mut layer = SettingsLayer::default();
        layer.apply_overrides(|key| (key == "TALLY_TAX_RATE").then(|| "7".to_string()));
        assert_eq!(Settings::sanitize(layer).tax_rate, 1.0);
    }

    #[test]
    fn test_options() {
        let settings = Settings {
            precision: 2,
            mode: Mode::Expression,
            ..Settings::default()
        };
        let options = settings.options();
        assert_eq!(options.precision, 2);
        assert!(options.grouping);
        assert_eq!(options.mode, Mode::Expression);
    }

    #[test]
    fn test_theme_display() {
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::from_name("DARK"), Theme::Dark);
    }
}
