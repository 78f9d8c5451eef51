//! # Percent & Tax Transforms
//!
//! Single-operand transforms that rewrite the display in place.
//!
//! ```text
//! %      no pending op, or * /  :  current / 100
//!        pending + or -         :  accumulator * current / 100   (200 + 10% → 20)
//! TAX+   current * (1 + rate)   rounded and shown at 2 places
//! TAX-   current / (1 + rate)   rounded and shown at 2 places
//! ```
//!
//! The result replaces the entry and stays editable (`new_input = false`), so
//! `200 + 10 % =` completes as `200 + 20`.

use crate::error::{CalcError, CalcResult};
use crate::format::{commit, format_number, FormatOptions};
use crate::state::CalculatorState;
use crate::TAX_PRECISION;

impl CalculatorState {
    /// Interprets the entry as a percentage.
    pub fn apply_percent(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        self.settle(self.percent())
    }

    /// Adds tax at the configured rate: `current * (1 + rate)`.
    pub fn apply_tax_included(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        self.settle(self.tax(|value, factor| Ok(value * factor)))
    }

    /// Removes tax at the configured rate: `current / (1 + rate)`.
    ///
    /// A rate of `-1` has no inverse and enters the `INVALID_TOKEN` error state.
    pub fn apply_tax_excluded(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        self.settle(self.tax(|value, factor| {
            if factor == 0.0 {
                return Err(CalcError::InvalidTaxRate);
            }
            Ok(value / factor)
        }))
    }

    fn percent(&self) -> CalcResult<Self> {
        let Some(current) = self.operand_value()? else {
            return Ok(self.clone());
        };

        let value = match (self.pending_operator, self.accumulator) {
            (Some(operator), Some(accumulator)) if operator.is_additive() => {
                accumulator * current / 100.0
            }
            _ => current / 100.0,
        };

        let rounded = commit(value, self.precision)?;
        Ok(self.with_entry(self.render(rounded)))
    }

    fn tax(&self, apply: impl Fn(f64, f64) -> CalcResult<f64>) -> CalcResult<Self> {
        let Some(current) = self.operand_value()? else {
            return Ok(self.clone());
        };

        let taxed = commit(apply(current, 1.0 + self.tax_rate)?, TAX_PRECISION)?;
        let options = FormatOptions {
            precision: TAX_PRECISION,
            ..self.format_options()
        };
        Ok(self.with_entry(format_number(taxed, options)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
