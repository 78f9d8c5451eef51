//! # Mode Controller
//!
//! Switches between chain and expression computation, and applies
//! configuration changes coming from the settings collaborator.
//!
//! ```text
//!               toggle_mode(Expression)
//!  Sequential ─────────────────────────────►  Expression
//!      ▲        clears accumulator, pending        │
//!      │        operator, recent operand           │
//!      └───────────────────────────────────────────┘
//!               toggle_mode(Sequential)
//!
//!  kept across a switch: configuration, memory, history
//! ```

use tracing::debug;

use crate::state::CalculatorState;
use crate::types::{Mode, SettingsUpdate};

impl CalculatorState {
    /// Switches computation mode. Switching to the current mode does nothing.
    ///
    /// An expression left on the display is replaced by `"0"` when returning
    /// to sequential mode, since it cannot be a chain operand.
    pub fn toggle_mode(&self, mode: Mode) -> Self {
        if self.is_error() || self.mode == mode {
            return self.clone();
        }

        debug!(from = %self.mode, to = %mode, "Switching calculator mode");

        let display_value = match (mode, self.current_value()) {
            (Mode::Sequential, None) => "0".to_string(),
            _ => self.display_value.clone(),
        };

        CalculatorState {
            mode,
            display_value,
            ..self.without_computation()
        }
    }

    /// Applies a partial configuration change.
    ///
    /// Fields left as `None` keep their value. A mode change behaves exactly
    /// like [`toggle_mode`](Self::toggle_mode). The display is not re-rendered.
    pub fn update_settings(&self, update: &SettingsUpdate) -> Self {
        if self.is_error() {
            return self.clone();
        }

        let configured = CalculatorState {
            tax_rate: update.tax_rate.unwrap_or(self.tax_rate),
            precision: update.precision.unwrap_or(self.precision),
            grouping: update.grouping.unwrap_or(self.grouping),
            scientific: update.scientific.unwrap_or(self.scientific),
            ..self.clone()
        };

        match update.mode {
            Some(mode) => configured.toggle_mode(mode),
            None => configured,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::types::{CalculatorOptions, Operator};

    #[test]
    fn test_toggle_resets_computation() {
        let state = CalculatorState::new()
            .input_digit('4')
            .set_operator(Operator::Add)
            .input_digit('2');
        let mut with_memory = state.clone();
        with_memory.memory_value = Some(9.0);

        let switched = with_memory.toggle_mode(Mode::Expression);
        assert_eq!(switched.mode(), Mode::Expression);
        assert_eq!(switched.accumulator(), None);
        assert_eq!(switched.pending_operator(), None);
        assert_eq!(switched.recent_operand(), None);
        assert!(switched.is_new_input());
        assert_eq!(switched.memory_value(), Some(9.0));
        assert_eq!(switched.display_text(), "2");
    }

    #[test]
    fn test_toggle_to_same_mode_is_noop() {
        let state = CalculatorState::new()
            .input_digit('4')
            .set_operator(Operator::Add);
        assert_eq!(state.toggle_mode(Mode::Sequential), state);
    }

    #[test]
    fn test_leaving_expression_mode_drops_expression() {
        let state = CalculatorState::new()
            .toggle_mode(Mode::Expression)
            .input_digit('2')
            .set_operator(Operator::Add);
        assert_eq!(state.display_text(), "2+");

        let back = state.toggle_mode(Mode::Sequential);
        assert_eq!(back.display_text(), "0");
    }

    #[test]
    fn test_update_settings_partial() {
        let update = SettingsUpdate {
            precision: Some(2),
            grouping: Some(true),
            ..SettingsUpdate::default()
        };
        let state = CalculatorState::new().update_settings(&update);
        assert_eq!(state.precision(), 2);
        assert!(state.options().grouping);
        assert_eq!(state.tax_rate(), CalculatorOptions::default().tax_rate);
        assert_eq!(state.mode(), Mode::Sequential);
    }

    #[test]
    fn test_update_settings_changes_mode() {
        let update = SettingsUpdate {
            mode: Some(Mode::Expression),
            ..SettingsUpdate::default()
        };
        let state = CalculatorState::new()
            .input_digit('3')
            .set_operator(Operator::Multiply)
            .update_settings(&update);
        assert_eq!(state.mode(), Mode::Expression);
        assert_eq!(state.accumulator(), None);
    }

    #[test]
    fn test_precision_change_applies_to_next_result() {
        let update = SettingsUpdate {
            precision: Some(1),
            ..SettingsUpdate::default()
        };
        let state = CalculatorState::new()
            .update_settings(&update)
            .input_digit('2')
            .set_operator(Operator::Divide)
            .input_digit('3')
            .equals();
        assert_eq!(state.display_text(), "0.7");
    }

    #[test]
    fn test_ignored_while_erroring() {
        let failed = CalculatorState::new().fail(CalcError::Syntax);
        assert_eq!(failed.toggle_mode(Mode::Expression), failed);
        assert_eq!(failed.update_settings(&SettingsUpdate::default()), failed);
    }
}
