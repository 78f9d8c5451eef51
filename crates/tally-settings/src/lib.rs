//! # tally-settings: Persisted Configuration for Tally
//!
//! Everything the core refuses to do: reading files, reading the environment,
//! and deciding what a nonsensical value should have meant.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   settings.toml ──┐                                                     │
//! │   TALLY_* env ────┼──► Settings::load ──► sanitize ──► Settings         │
//! │   browser JSON ───┘    (from_json_str)                   │              │
//! │                                                          │ .options()   │
//! │                                                          ▼              │
//! │                                   tally_core::CalculatorOptions         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_settings::Settings;
//! use tally_core::CalculatorState;
//!
//! let settings = Settings::from_json_str(r#"{"taxRate": 0.08, "precision": 2}"#);
//! let state = CalculatorState::with_options(settings.options());
//! assert_eq!(state.precision(), 2);
//! ```

pub mod error;
pub mod settings;

pub use error::{SettingsError, SettingsResult};
pub use settings::{Settings, Theme};
