//! # Entry Buffer
//!
//! Operations that edit the number (or expression) being typed.
//!
//! ## Digit Entry Rules (sequential mode)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  new_input?  ──yes──►  buffer = digit            ("0" + '5' → "5")     │
//! │      │                                                                  │
//! │      no                                                                 │
//! │      ▼                                                                  │
//! │  digits ≥ 12?              ──yes──►  dropped                            │
//! │  fraction digits ≥ 4?      ──yes──►  dropped     ("1.2345" + '6')       │
//! │  buffer == "0"?            ──yes──►  buffer = digit                     │
//! │  otherwise                         buffer += digit                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In expression mode the same keys edit a raw infix string with no digit cap.

use crate::error::CalcError;
use crate::format::{count_digits, decimal_places};
use crate::state::CalculatorState;
use crate::types::Mode;
use crate::{GROUP_SEPARATOR, MAX_DECIMAL_INPUT, MAX_DIGITS};

impl CalculatorState {
    // =========================================================================
    // Digits & Decimal Point
    // =========================================================================

    /// Types one digit character.
    ///
    /// Anything outside `'0'..='9'` enters the `INVALID_TOKEN` error state.
    pub fn input_digit(&self, digit: char) -> Self {
        if self.is_error() {
            return self.clone();
        }
        if !digit.is_ascii_digit() {
            return self.fail(CalcError::InvalidDigit);
        }

        match self.mode {
            Mode::Sequential => self.append_digit(digit),
            Mode::Expression => self.start_or_append(digit),
        }
    }

    fn append_digit(&self, digit: char) -> Self {
        let buffer = match self.editable_buffer() {
            Some(buffer) => buffer,
            None => return self.with_entry(digit.to_string()),
        };

        if count_digits(&buffer) >= MAX_DIGITS {
            return self.clone();
        }
        if buffer.contains('.') && decimal_places(&buffer) >= MAX_DECIMAL_INPUT {
            return self.clone();
        }

        if buffer == "0" {
            self.with_entry(digit.to_string())
        } else {
            self.with_entry(format!("{buffer}{digit}"))
        }
    }

    /// Starts a decimal literal, or adds the point to the current one.
    pub fn input_decimal(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }

        if self.new_input {
            return self.with_entry("0.".to_string());
        }

        match self.mode {
            Mode::Sequential => match self.editable_buffer() {
                Some(buffer) if buffer.contains('.') => self.clone(),
                Some(buffer) => self.with_entry(format!("{buffer}.")),
                None => self.with_entry("0.".to_string()),
            },
            Mode::Expression => {
                let buffer = self.expression_buffer();
                if trailing_number(&buffer).contains('.') {
                    self.clone()
                } else {
                    self.with_entry(format!("{buffer}."))
                }
            }
        }
    }

    // =========================================================================
    // Sign, Backspace, Clear
    // =========================================================================

    /// Flips a leading `-`. `"0"` has no sign to flip.
    pub fn toggle_sign(&self) -> Self {
        if self.is_error() || self.display_value == "0" {
            return self.clone();
        }

        let toggled = match self.display_value.strip_prefix('-') {
            Some(unsigned) => unsigned.to_string(),
            None => format!("-{}", self.display_value),
        };
        CalculatorState {
            display_value: toggled,
            ..self.clone()
        }
    }

    /// Removes the last typed character.
    ///
    /// Does nothing on a result. Removing the last significant character
    /// resets the buffer to `"0"` and awaits a fresh number.
    pub fn backspace(&self) -> Self {
        if self.is_error() || self.new_input {
            return self.clone();
        }

        let mut buffer: String = self
            .display_value
            .chars()
            .filter(|&ch| ch != GROUP_SEPARATOR)
            .collect();
        let length = buffer.chars().count();

        if length <= 1 || (buffer.starts_with('-') && length <= 2) {
            return CalculatorState {
                display_value: "0".to_string(),
                new_input: true,
                ..self.clone()
            };
        }

        buffer.pop();
        CalculatorState {
            display_value: buffer,
            ..self.clone()
        }
    }

    /// Clears the current entry, keeping the pending computation.
    ///
    /// While erroring this is a full reset.
    pub fn clear_entry(&self) -> Self {
        if self.is_error() {
            return self.clear_all();
        }
        CalculatorState {
            display_value: "0".to_string(),
            new_input: true,
            ..self.clone()
        }
    }

    /// Back to a fresh calculator.
    ///
    /// Configuration, mode and history survive; entry, computation, error
    /// and memory do not.
    pub fn clear_all(&self) -> Self {
        CalculatorState {
            history: self.history.clone(),
            ..CalculatorState::with_options(self.options())
        }
    }

    // =========================================================================
    // Parentheses (expression mode)
    // =========================================================================

    /// Types `(` or `)`. Ignored in sequential mode.
    pub fn input_paren(&self, open: bool) -> Self {
        if self.is_error() || self.mode == Mode::Sequential {
            return self.clone();
        }
        if open {
            self.start_or_append('(')
        } else {
            self.append_to_expression(')')
        }
    }

    // =========================================================================
    // Buffer Helpers
    // =========================================================================

    /// The display as an editable literal, `None` when the next key starts fresh.
    ///
    /// Separators are dropped. Exponent forms (recalled from memory) are not
    /// editable.
    fn editable_buffer(&self) -> Option<String> {
        if self.new_input || self.display_value.contains('e') {
            return None;
        }
        Some(
            self.display_value
                .chars()
                .filter(|&ch| ch != GROUP_SEPARATOR)
                .collect(),
        )
    }

    /// The raw expression text with separators removed.
    pub(crate) fn expression_buffer(&self) -> String {
        self.display_value
            .chars()
            .filter(|&ch| ch != GROUP_SEPARATOR)
            .collect()
    }

    /// Replaces a fresh or `"0"` expression, otherwise appends.
    pub(crate) fn start_or_append(&self, ch: char) -> Self {
        if self.new_input || self.display_value == "0" {
            return self.with_entry(ch.to_string());
        }
        self.with_entry(format!("{}{}", self.expression_buffer(), ch))
    }

    /// Appends to whatever is on the display, a result included.
    pub(crate) fn append_to_expression(&self, ch: char) -> Self {
        self.with_entry(format!("{}{}", self.expression_buffer(), ch))
    }

    /// Puts `text` on the display as the number being typed.
    pub(crate) fn with_entry(&self, text: String) -> Self {
        CalculatorState {
            display_value: text,
            new_input: false,
            ..self.clone()
        }
    }
}

/// The number literal at the end of an expression, `""` after an operator.
fn trailing_number(expression: &str) -> &str {
    let start = expression
        .rfind(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
        .map(|index| index + 1)
        .unwrap_or(0);
    &expression[start..]
}

// =============================================================================
// Unit Tests
// =============================================================================
