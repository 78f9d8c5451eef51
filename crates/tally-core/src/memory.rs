//! # Memory Register
//!
//! One optional stored value, independent of the computation in progress.
//!
//! ```text
//! MS  register = current          (no-op if the display is not a number)
//! MR  display  = register         (no-op if the register is empty)
//! M+  register = register + current, empty counts as 0
//! M-  register = register - current, empty counts as 0
//! MC  register = empty
//! ```

use crate::format::{commit, format_number, FormatOptions};
use crate::state::CalculatorState;
use crate::types::Mode;

impl CalculatorState {
    /// MS: copies the current number into the register.
    pub fn memory_store(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        match self.current_value() {
            Some(value) => CalculatorState {
                memory_value: Some(value),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// MR: puts the register on the display.
    ///
    /// Sequential mode shows it as a finished number. Expression mode types
    /// its plain literal into the expression.
    pub fn memory_recall(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        let Some(value) = self.memory_value else {
            return self.clone();
        };

        match self.mode {
            Mode::Sequential => CalculatorState {
                display_value: self.render(value),
                new_input: true,
                ..self.clone()
            },
            Mode::Expression => {
                let literal = format_number(value, FormatOptions::plain(self.precision));
                if self.new_input || self.display_value == "0" {
                    self.with_entry(literal)
                } else {
                    self.with_entry(format!("{}{}", self.expression_buffer(), literal))
                }
            }
        }
    }

    /// M+: adds the current number to the register.
    pub fn memory_add(&self) -> Self {
        self.accumulate_memory(1.0)
    }

    /// M-: subtracts the current number from the register.
    pub fn memory_subtract(&self) -> Self {
        self.accumulate_memory(-1.0)
    }

    /// MC: empties the register.
    pub fn memory_clear(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        CalculatorState {
            memory_value: None,
            ..self.clone()
        }
    }

    fn accumulate_memory(&self, sign: f64) -> Self {
        if self.is_error() {
            return self.clone();
        }
        let Some(current) = self.current_value() else {
            return self.clone();
        };

        let total = self.memory_value.unwrap_or(0.0) + sign * current;
        match commit(total, self.precision) {
            Ok(total) => CalculatorState {
                memory_value: Some(total),
                ..self.clone()
            },
            Err(err) => self.fail(err),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
