//! # Error Types
//!
//! Error types for tally-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CalcError   - internal, returned by arithmetic / parsing (`?`)         │
//! │      │                                                                  │
//! │      ▼  transition boundary                                             │
//! │  ErrorState  - terminal condition stored in CalculatorState             │
//! │  └── ErrorCode: DIV_ZERO | OVERFLOW | INVALID_TOKEN                     │
//! │                                                                         │
//! │  Flow: CalcError → ErrorState → display text "Cannot divide by zero"    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `#[error]` text IS the display text, bit-exact
//! 3. Every variant maps to exactly one `ErrorCode`

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Error Code
// =============================================================================

/// The three terminal error kinds a calculator can enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Division by a literal zero operand, in either mode.
    DivZero,
    /// Result is non-finite or has more than 12 integer digits.
    Overflow,
    /// Malformed digit/operator input or any expression syntax failure.
    InvalidToken,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::DivZero => write!(f, "DIV_ZERO"),
            ErrorCode::Overflow => write!(f, "OVERFLOW"),
            ErrorCode::InvalidToken => write!(f, "INVALID_TOKEN"),
        }
    }
}

// =============================================================================
// Error State
// =============================================================================

/// A terminal error held by the calculator until it is cleared.
///
/// The `message` replaces the number on the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorState {
    pub code: ErrorCode,
    pub message: String,
}

impl From<CalcError> for ErrorState {
    fn from(err: CalcError) -> Self {
        ErrorState {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Calc Error
// =============================================================================

/// Failures raised while computing a transition.
///
/// These never escape the public API: every transition converts them into an
/// [`ErrorState`] on the returned calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Right operand of `/` is exactly zero.
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Result exceeds the digit ceiling or is not finite.
    #[error("Overflow")]
    Overflow,

    /// A digit key delivered something other than `0`-`9`.
    #[error("Invalid digit")]
    InvalidDigit,

    /// An operator key delivered something other than `+ - * /`.
    #[error("Invalid operator")]
    InvalidOperator,

    /// Tax exclusion with a rate of -100% (`1 + rate == 0`).
    #[error("Invalid tax rate")]
    InvalidTaxRate,

    /// Expression contains a character outside digits, `.`, operators, parens.
    #[error("Invalid character")]
    InvalidCharacter { found: char },

    /// Unbalanced parentheses, malformed number, or a malformed postfix stream.
    #[error("Syntax error")]
    Syntax,

    /// Expression has no tokens.
    #[error("Empty expression")]
    EmptyExpression,
}

impl CalcError {
    /// The error kind shown to callers.
    pub fn code(&self) -> ErrorCode {
        match self {
            CalcError::DivisionByZero => ErrorCode::DivZero,
            CalcError::Overflow => ErrorCode::Overflow,
            CalcError::InvalidDigit
            | CalcError::InvalidOperator
            | CalcError::InvalidTaxRate
            | CalcError::InvalidCharacter { .. }
            | CalcError::Syntax
            | CalcError::EmptyExpression => ErrorCode::InvalidToken,
        }
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Failure to read a key label or mode name typed by a front-end.
///
/// Unlike [`CalcError`] this never reaches the calculator state; the caller
/// decides what to do with an unreadable label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    #[error("Unknown mode: '{0}'. Valid options: sequential, expression")]
    UnknownMode(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CalcError.
pub type CalcResult<T> = Result<T, CalcError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Cannot divide by zero");
        assert_eq!(CalcError::Overflow.to_string(), "Overflow");
        assert_eq!(
            CalcError::InvalidCharacter { found: 'x' }.to_string(),
            "Invalid character"
        );
        assert_eq!(CalcError::EmptyExpression.to_string(), "Empty expression");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::DivisionByZero.code(), ErrorCode::DivZero);
        assert_eq!(CalcError::Overflow.code(), ErrorCode::Overflow);
        assert_eq!(CalcError::Syntax.code(), ErrorCode::InvalidToken);
        assert_eq!(CalcError::InvalidTaxRate.code(), ErrorCode::InvalidToken);
    }

    #[test]
    fn test_calc_error_converts_to_error_state() {
        let state: ErrorState = CalcError::Syntax.into();
        assert_eq!(state.code, ErrorCode::InvalidToken);
        assert_eq!(state.message, "Syntax error");
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::DivZero).unwrap();
        assert_eq!(json, "\"DIV_ZERO\"");
        assert_eq!(ErrorCode::InvalidToken.to_string(), "INVALID_TOKEN");
    }
}
