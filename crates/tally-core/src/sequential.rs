//! # Sequential Arithmetic Engine
//!
//! Chain calculation: each operator reduces immediately against the running
//! accumulator, ignoring algebraic precedence.
//!
//! ## Chain & Repeated Equals
//! ```text
//! keys      display   accumulator   pending   recent
//! ───────   ───────   ───────────   ───────   ──────
//! 5         "5"       -             -         -
//! +         "5"       5             +         -
//! 2         "2"       5             +         -
//! =         "7"       7             +         2
//! =         "9"       9             +         2      ◄── reapplies recent
//! *         "9"       9             *         -      ◄── no reduction (new_input)
//! 3         "3"       9             *         -
//! -         "27"      27            -         -      ◄── reduces 9 * 3
//! ```

use crate::error::CalcResult;
use crate::expression;
use crate::format::commit;
use crate::state::CalculatorState;
use crate::types::{Mode, Operator};

impl CalculatorState {
    // =========================================================================
    // Operators
    // =========================================================================

    /// Presses an operator key.
    pub fn set_operator(&self, operator: Operator) -> Self {
        if self.is_error() {
            return self.clone();
        }
        match self.mode {
            Mode::Sequential => self.settle(self.chain_operator(operator)),
            Mode::Expression => self.append_to_expression(operator.symbol()),
        }
    }

    /// Presses an operator key given as its character.
    ///
    /// Characters other than `+ - * /` enter the `INVALID_TOKEN` error state.
    pub fn set_operator_symbol(&self, symbol: char) -> Self {
        if self.is_error() {
            return self.clone();
        }
        match Operator::try_from(symbol) {
            Ok(operator) => self.set_operator(operator),
            Err(err) => self.fail(err),
        }
    }

    fn chain_operator(&self, operator: Operator) -> CalcResult<Self> {
        let Some(current) = self.current_value() else {
            return Ok(self.clone());
        };

        let mut next = self.clone();
        match (self.pending_operator, self.accumulator) {
            (Some(pending), Some(accumulator)) if !self.new_input => {
                let reduced = commit(pending.apply(accumulator, current)?, self.precision)?;
                next.accumulator = Some(reduced);
                next.display_value = self.render(reduced);
            }
            (_, None) => next.accumulator = Some(current),
            _ => {}
        }

        next.pending_operator = Some(operator);
        next.recent_operand = None;
        next.new_input = true;
        Ok(next)
    }

    // =========================================================================
    // Equals
    // =========================================================================

    /// Commits the computation.
    ///
    /// Sequential mode applies the pending operator (or reapplies the last
    /// operand on repeated presses). Expression mode evaluates the typed
    /// infix expression.
    pub fn equals(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        match self.mode {
            Mode::Sequential => self.settle(self.chain_equals()),
            Mode::Expression => self.settle(self.expression_equals()),
        }
    }

    fn chain_equals(&self) -> CalcResult<Self> {
        let (Some(operator), Some(accumulator)) = (self.pending_operator, self.accumulator) else {
            return Ok(CalculatorState {
                accumulator: self.current_value(),
                new_input: true,
                ..self.clone()
            });
        };

        let operand = if self.new_input {
            self.recent_operand.or(Some(accumulator))
        } else {
            self.current_value()
        };
        let Some(operand) = operand else {
            return Ok(self.clone());
        };

        let result = commit(operator.apply(accumulator, operand)?, self.precision)?;
        let display = self.render(result);
        let expression = format!(
            "{} {} {}",
            self.render(accumulator),
            operator,
            self.render(operand)
        );

        Ok(CalculatorState {
            accumulator: Some(result),
            recent_operand: Some(operand),
            new_input: true,
            history: self.history_with(expression, display.clone()),
            display_value: display,
            ..self.clone()
        })
    }

    fn expression_equals(&self) -> CalcResult<Self> {
        if self.new_input {
            return Ok(self.clone());
        }

        let source = expression::strip_whitespace(&self.expression_buffer());
        let result = commit(expression::evaluate(&source)?, self.precision)?;
        let display = self.render(result);

        Ok(CalculatorState {
            new_input: true,
            history: self.history_with(source, display.clone()),
            display_value: display,
            ..self.clone()
        })
    }

    /// The number a transform acts on.
    ///
    /// In expression mode the typed expression is evaluated first.
    pub(crate) fn operand_value(&self) -> CalcResult<Option<f64>> {
        match self.mode {
            Mode::Sequential => Ok(self.current_value()),
            Mode::Expression => {
                if let Some(value) = self.current_value() {
                    return Ok(Some(value));
                }
                expression::evaluate(&self.expression_buffer()).map(Some)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
