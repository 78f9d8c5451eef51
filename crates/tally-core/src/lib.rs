//! # tally-core: Pure Calculator Logic for Tally
//!
//! This crate is the **heart** of Tally. It turns discrete key presses into a
//! display string, as pure state transitions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front-end (tally-cli / web keypad)              │   │
//! │  │        key press ──► state.press(key) ──► display_text()        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   entry   │  │ sequential │  │ expression │  │  format  │  │   │
//! │  │   │  digits   │  │ chain, =   │  │ shunting-  │  │ round,   │  │   │
//! │  │   │  . ± ⌫    │  │ % and tax  │  │ yard, RPN  │  │ overflow │  │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘  └──────────┘  │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐                │   │
//! │  │   │  memory   │  │  history   │  │    mode    │                │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SETTINGS FILES • PURE FUNCTIONS                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tally-settings (configuration record)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`] - `CalculatorState`, the single immutable value
//! - [`entry`] - Entry buffer (digits, decimal point, sign, backspace)
//! - [`sequential`] - Chain calculation and repeated equals
//! - [`transform`] - Percent and tax transforms
//! - [`memory`] - Single memory register
//! - [`expression`] - Tokenizer, infix-to-postfix, postfix evaluator
//! - [`format`] - Rounding, overflow detection, display strings
//! - [`history`] - Bounded newest-first log
//! - [`mode`] - Mode switching and settings updates
//! - [`keys`] - Key labels and single-point dispatch
//! - [`error`] - Error codes and internal error type
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: every operation is `&CalculatorState -> CalculatorState`
//! 2. **No I/O**: settings files and terminals live in other crates
//! 3. **Total Operations**: failures become the terminal `error` field, never panics
//! 4. **One Formatter**: both computation modes share rounding and overflow checks
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{CalculatorState, Operator};
//!
//! let state = CalculatorState::new()
//!     .input_digit('5')
//!     .set_operator(Operator::Add)
//!     .input_digit('2')
//!     .equals();
//! assert_eq!(state.display_text(), "7");
//!
//! // Repeated equals reapplies the last operand
//! let state = state.equals();
//! assert_eq!(state.display_text(), "9");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod entry;
pub mod error;
pub mod expression;
pub mod format;
pub mod history;
pub mod keys;
pub mod memory;
pub mod mode;
pub mod sequential;
pub mod state;
pub mod transform;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::CalculatorState` instead of
// `use tally_core::state::CalculatorState`

pub use error::{CalcError, CalcResult, ErrorCode, ErrorState, ParseError};
pub use history::{History, HistoryEntry};
pub use keys::Key;
pub use state::CalculatorState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum significant digits, both while typing and in any accepted result.
pub const MAX_DIGITS: usize = 12;

/// Maximum fractional digits that may be typed into a sequential entry.
///
/// One more than the default display precision, so the committed value can
/// be rounded rather than truncated.
pub const MAX_DECIMAL_INPUT: usize = 4;

/// Number of history entries kept; the oldest is dropped past this.
pub const HISTORY_LIMIT: usize = 50;

/// Decimal places used when no configuration says otherwise.
pub const DEFAULT_PRECISION: u8 = 3;

/// Tax rate used when no configuration says otherwise (10%).
pub const DEFAULT_TAX_RATE: f64 = 0.1;

/// Tax transforms always round and display at this many decimal places.
pub const TAX_PRECISION: u8 = 2;

/// Display text of the overflow error.
pub const OVERFLOW_MESSAGE: &str = "Overflow";

/// Separator inserted every three integer digits when grouping is enabled.
pub const GROUP_SEPARATOR: char = ',';
