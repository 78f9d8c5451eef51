//! # Calculator State
//!
//! The single immutable value a front-end holds between key presses.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Replacement, Never Mutation                    │
//! │                                                                         │
//! │   caller owns ──► state_0                                               │
//! │                     │  .input_digit('5')   (&self, returns new value)   │
//! │                     ▼                                                   │
//! │                   state_1                                               │
//! │                     │  .set_operator(Add)                               │
//! │                     ▼                                                   │
//! │                   state_2   ◄── state_0 and state_1 are still intact    │
//! │                                                                         │
//! │  Fields are crate-private: only transitions in this crate build states, │
//! │  so the invariants below cannot be broken from outside.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `display_value` is a numeric literal (or, in expression mode, an infix
//!   string) unless `error` is set, in which case it is the error message
//! - While `error` is set, only `clear_all` / `clear_entry` produce a different state
//! - Setting an error or switching mode clears accumulator, pending operator
//!   and recent operand

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CalcError, CalcResult, ErrorState};
use crate::format::{format_number, parse_display, FormatOptions};
use crate::history::{History, HistoryEntry};
use crate::types::{CalculatorOptions, Mode, Operator};

/// Everything the calculator knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    pub(crate) display_value: String,
    pub(crate) accumulator: Option<f64>,
    pub(crate) pending_operator: Option<Operator>,
    pub(crate) recent_operand: Option<f64>,
    pub(crate) new_input: bool,
    pub(crate) error: Option<ErrorState>,
    pub(crate) tax_rate: f64,
    pub(crate) precision: u8,
    pub(crate) grouping: bool,
    pub(crate) scientific: bool,
    pub(crate) memory_value: Option<f64>,
    pub(crate) history: History,
    pub(crate) mode: Mode,
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState::with_options(CalculatorOptions::default())
    }
}

impl CalculatorState {
    /// A fresh calculator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh calculator showing `"0"`, configured by `options`.
    pub fn with_options(options: CalculatorOptions) -> Self {
        CalculatorState {
            display_value: "0".to_string(),
            accumulator: None,
            pending_operator: None,
            recent_operand: None,
            new_input: true,
            error: None,
            tax_rate: options.tax_rate,
            precision: options.precision,
            grouping: options.grouping,
            scientific: options.scientific,
            memory_value: None,
            history: History::new(),
            mode: options.mode,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// What the display shows: the current entry, a result, or an error message.
    pub fn display_text(&self) -> &str {
        &self.display_value
    }

    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    pub fn recent_operand(&self) -> Option<f64> {
        self.recent_operand
    }

    /// True when the next digit starts a fresh number.
    pub fn is_new_input(&self) -> bool {
        self.new_input
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn memory_value(&self) -> Option<f64> {
        self.memory_value
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The configuration currently in effect.
    pub fn options(&self) -> CalculatorOptions {
        CalculatorOptions {
            tax_rate: self.tax_rate,
            precision: self.precision,
            grouping: self.grouping,
            scientific: self.scientific,
            mode: self.mode,
        }
    }

    // =========================================================================
    // Crate Helpers
    // =========================================================================

    /// The display parsed as a number, `None` for expressions and messages.
    pub(crate) fn current_value(&self) -> Option<f64> {
        parse_display(&self.display_value)
    }

    pub(crate) fn format_options(&self) -> FormatOptions {
        FormatOptions {
            precision: self.precision,
            grouping: self.grouping,
            scientific: self.scientific,
        }
    }

    /// Formats a value with the configured precision, grouping and notation.
    pub(crate) fn render(&self, value: f64) -> String {
        format_number(value, self.format_options())
    }

    /// Enters the terminal error state.
    pub(crate) fn fail(&self, err: CalcError) -> Self {
        let error = ErrorState::from(err);
        debug!(code = %error.code, message = %error.message, "Calculator entered error state");
        CalculatorState {
            display_value: error.message.clone(),
            accumulator: None,
            pending_operator: None,
            recent_operand: None,
            new_input: true,
            error: Some(error),
            ..self.clone()
        }
    }

    /// Unwraps a computed transition, turning a failure into the error state.
    pub(crate) fn settle(&self, result: CalcResult<Self>) -> Self {
        result.unwrap_or_else(|err| self.fail(err))
    }

    /// Drops the in-progress computation and awaits a fresh number.
    pub(crate) fn without_computation(&self) -> Self {
        CalculatorState {
            accumulator: None,
            pending_operator: None,
            recent_operand: None,
            new_input: true,
            ..self.clone()
        }
    }

    pub(crate) fn history_with(&self, expression: String, result: String) -> History {
        tracing::trace!(%expression, %result, "History entry recorded");
        self.history.with_entry(HistoryEntry { expression, result })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_initial_state() {
        let state = CalculatorState::new();
        assert_eq!(state.display_text(), "0");
        assert!(state.is_new_input());
        assert_eq!(state.accumulator(), None);
        assert_eq!(state.pending_operator(), None);
        assert!(!state.is_error());
        assert_eq!(state.memory_value(), None);
        assert!(state.history().is_empty());
        assert_eq!(state.mode(), Mode::Sequential);
    }

    #[test]
    fn test_with_options() {
        let options = CalculatorOptions {
            tax_rate: 0.08,
            precision: 2,
            grouping: true,
            scientific: true,
            mode: Mode::Expression,
        };
        let state = CalculatorState::with_options(options);
        assert_eq!(state.options(), options);
        assert_eq!(state.render(1234.567), "1,234.57");
    }

    #[test]
    fn test_fail_clears_computation() {
        let mut state = CalculatorState::new();
        state.accumulator = Some(8.0);
        state.pending_operator = Some(Operator::Divide);
        state.recent_operand = Some(2.0);
        state.memory_value = Some(4.0);

        let failed = state.fail(CalcError::DivisionByZero);
        assert_eq!(failed.display_text(), "Cannot divide by zero");
        assert_eq!(failed.error().unwrap().code, ErrorCode::DivZero);
        assert_eq!(failed.accumulator(), None);
        assert_eq!(failed.pending_operator(), None);
        assert_eq!(failed.recent_operand(), None);
        assert!(failed.is_new_input());
        // Memory survives an error
        assert_eq!(failed.memory_value(), Some(4.0));
        // The input value is untouched
        assert_eq!(state.accumulator(), Some(8.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(CalculatorState::new()).unwrap();
        assert_eq!(json["displayValue"], "0");
        assert_eq!(json["newInput"], true);
        assert_eq!(json["mode"], "sequential");
        assert!(json["pendingOperator"].is_null());
    }
}
