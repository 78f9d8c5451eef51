//! # Keys
//!
//! Every public operation as a value, so a front-end can map its buttons
//! (or typed labels) onto one dispatch point.
//!
//! ## Labels
//! ```text
//! 0-9  .  + - * /  =  %  +/-  BS  CE  C
//! MS  MR  M+  M-  MC  TAX+  TAX-  (  )  MODE:sequential  MODE:expression
//! ```
//! Letters are case-insensitive (`ms`, `Tax+`, `mode:EXPR` all parse).

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::state::CalculatorState;
use crate::types::{Mode, Operator};

/// One key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Decimal,
    Operator(Operator),
    Equals,
    Percent,
    TaxIncluded,
    TaxExcluded,
    ToggleSign,
    Backspace,
    ClearEntry,
    ClearAll,
    MemoryStore,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    MemoryClear,
    OpenParen,
    CloseParen,
    Mode(Mode),
}

impl FromStr for Key {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();

        let mut chars = label.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if ch.is_ascii_digit() {
                return Ok(Key::Digit(ch));
            }
            if let Ok(operator) = Operator::try_from(ch) {
                return Ok(Key::Operator(operator));
            }
        }

        let upper = label.to_ascii_uppercase();
        if let Some(mode) = upper.strip_prefix("MODE:") {
            return mode.parse().map(Key::Mode);
        }

        match upper.as_str() {
            "." => Ok(Key::Decimal),
            "×" => Ok(Key::Operator(Operator::Multiply)),
            "÷" => Ok(Key::Operator(Operator::Divide)),
            "=" => Ok(Key::Equals),
            "%" => Ok(Key::Percent),
            "TAX+" => Ok(Key::TaxIncluded),
            "TAX-" => Ok(Key::TaxExcluded),
            "+/-" | "±" => Ok(Key::ToggleSign),
            "BS" | "⌫" => Ok(Key::Backspace),
            "CE" => Ok(Key::ClearEntry),
            "C" | "AC" => Ok(Key::ClearAll),
            "MS" => Ok(Key::MemoryStore),
            "MR" => Ok(Key::MemoryRecall),
            "M+" => Ok(Key::MemoryAdd),
            "M-" => Ok(Key::MemorySubtract),
            "MC" => Ok(Key::MemoryClear),
            "(" => Ok(Key::OpenParen),
            ")" => Ok(Key::CloseParen),
            _ => Err(ParseError::UnknownKey(label.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Digit(digit) => write!(f, "{digit}"),
            Key::Decimal => write!(f, "."),
            Key::Operator(operator) => write!(f, "{operator}"),
            Key::Equals => write!(f, "="),
            Key::Percent => write!(f, "%"),
            Key::TaxIncluded => write!(f, "TAX+"),
            Key::TaxExcluded => write!(f, "TAX-"),
            Key::ToggleSign => write!(f, "+/-"),
            Key::Backspace => write!(f, "BS"),
            Key::ClearEntry => write!(f, "CE"),
            Key::ClearAll => write!(f, "C"),
            Key::MemoryStore => write!(f, "MS"),
            Key::MemoryRecall => write!(f, "MR"),
            Key::MemoryAdd => write!(f, "M+"),
            Key::MemorySubtract => write!(f, "M-"),
            Key::MemoryClear => write!(f, "MC"),
            Key::OpenParen => write!(f, "("),
            Key::CloseParen => write!(f, ")"),
            Key::Mode(mode) => write!(f, "MODE:{mode}"),
        }
    }
}

impl CalculatorState {
    /// Applies one key press.
    pub fn press(&self, key: Key) -> Self {
        match key {
            Key::Digit(digit) => self.input_digit(digit),
            Key::Decimal => self.input_decimal(),
            Key::Operator(operator) => self.set_operator(operator),
            Key::Equals => self.equals(),
            Key::Percent => self.apply_percent(),
            Key::TaxIncluded => self.apply_tax_included(),
            Key::TaxExcluded => self.apply_tax_excluded(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Backspace => self.backspace(),
            Key::ClearEntry => self.clear_entry(),
            Key::ClearAll => self.clear_all(),
            Key::MemoryStore => self.memory_store(),
            Key::MemoryRecall => self.memory_recall(),
            Key::MemoryAdd => self.memory_add(),
            Key::MemorySubtract => self.memory_subtract(),
            Key::MemoryClear => self.memory_clear(),
            Key::OpenParen => self.input_paren(true),
            Key::CloseParen => self.input_paren(false),
            Key::Mode(mode) => self.toggle_mode(mode),
        }
    }

    /// Applies key presses in order.
    pub fn press_all(&self, keys: impl IntoIterator<Item = Key>) -> Self {
        keys.into_iter().fold(self.clone(), |state, key| state.press(key))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(labels: &str) -> Vec<Key> {
        labels
            .split_whitespace()
            .map(|label| label.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("7".parse::<Key>(), Ok(Key::Digit('7')));
        assert_eq!("-".parse::<Key>(), Ok(Key::Operator(Operator::Subtract)));
        assert_eq!("÷".parse::<Key>(), Ok(Key::Operator(Operator::Divide)));
        assert_eq!("tax+".parse::<Key>(), Ok(Key::TaxIncluded));
        assert_eq!(" ms ".parse::<Key>(), Ok(Key::MemoryStore));
        assert_eq!("C".parse::<Key>(), Ok(Key::ClearAll));
        assert_eq!("CE".parse::<Key>(), Ok(Key::ClearEntry));
        assert_eq!("mode:expr".parse::<Key>(), Ok(Key::Mode(Mode::Expression)));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "sqrt".parse::<Key>(),
            Err(ParseError::UnknownKey("sqrt".to_string()))
        );
        assert_eq!(
            "MODE:rpn".parse::<Key>(),
            Err(ParseError::UnknownMode("rpn".to_string()))
        );
    }

    #[test]
    fn test_labels_parse_back() {
        let all = keys("0 9 . + - * / = % TAX+ TAX- +/- BS CE C MS MR M+ M- MC ( ) MODE:expression");
        for key in all {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_press_sequence() {
        let state = CalculatorState::new().press_all(keys("1 2 + 3 ="));
        assert_eq!(state.display_text(), "15");
    }

    #[test]
    fn test_press_expression_sequence() {
        let state = CalculatorState::new().press_all(keys("MODE:expression ( 2 + 3 ) * 4 ="));
        assert_eq!(state.display_text(), "20");
    }
}
