//! # Domain Types
//!
//! Small value types shared by every tally-core module.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Operator     │   │      Mode       │   │ CalculatorOptions   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  + - * /        │   │  Sequential     │   │  tax_rate  0.10     │   │
//! │  │  precedence 1|2 │   │  Expression     │   │  precision 3        │   │
//! │  │  apply(l, r)    │   │                 │   │  grouping, sci      │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CalcError, CalcResult, ParseError};
use crate::{DEFAULT_PRECISION, DEFAULT_TAX_RATE};

// =============================================================================
// Operator
// =============================================================================

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// The character that types this operator.
    pub const fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Binding strength used by the expression engine.
    ///
    /// `+ -` bind at 1, `* /` at 2. All four are left-associative.
    pub const fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }

    /// Returns true for `+` and `-`.
    pub const fn is_additive(&self) -> bool {
        matches!(self, Operator::Add | Operator::Subtract)
    }

    /// Applies the operator to two finite operands.
    ///
    /// Division by exactly zero fails with [`CalcError::DivisionByZero`];
    /// every other combination is total. The raw result is neither rounded
    /// nor overflow-checked here, see [`crate::format::commit`].
    pub fn apply(&self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = CalcError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            _ => Err(CalcError::InvalidOperator),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =============================================================================
// Mode
// =============================================================================

/// Computation discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Chain calculation: each operator reduces immediately.
    #[default]
    Sequential,
    /// The display holds an infix expression, evaluated on `=`.
    Expression,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Sequential => write!(f, "sequential"),
            Mode::Expression => write!(f, "expression"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" | "chain" => Ok(Mode::Sequential),
            "expression" | "expr" => Ok(Mode::Expression),
            other => Err(ParseError::UnknownMode(other.to_string())),
        }
    }
}

// =============================================================================
// Configuration Types
// =============================================================================

/// The configuration record consumed by the core.
///
/// Supplied by an external settings collaborator (`tally-settings`). The core
/// trusts the declared ranges: `tax_rate` in `[0,1]`, `precision` in `[1,6]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorOptions {
    /// Tax as a fraction (0.10 = 10%).
    pub tax_rate: f64,
    /// Decimal places for rounding and display.
    pub precision: u8,
    /// Insert `,` every three integer digits.
    pub grouping: bool,
    /// Exponential notation for values beyond the digit ceiling.
    pub scientific: bool,
    pub mode: Mode,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        CalculatorOptions {
            tax_rate: DEFAULT_TAX_RATE,
            precision: DEFAULT_PRECISION,
            grouping: false,
            scientific: false,
            mode: Mode::Sequential,
        }
    }
}

/// A partial configuration change; `None` leaves a field as it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub tax_rate: Option<f64>,
    pub precision: Option<u8>,
    pub grouping: Option<bool>,
    pub scientific: Option<bool>,
    pub mode: Option<Mode>,
}

impl From<CalculatorOptions> for SettingsUpdate {
    fn from(options: CalculatorOptions) -> Self {
        SettingsUpdate {
            tax_rate: Some(options.tax_rate),
            precision: Some(options.precision),
            grouping: Some(options.grouping),
            scientific: Some(options.scientific),
            mode: Some(options.mode),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
