//! # Expression Engine
//!
//! Evaluates a typed infix string with algebraic precedence.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  " (2+3) * 4 "                                                          │
//! │      │  strip_whitespace                                                │
//! │      ▼                                                                  │
//! │  "(2+3)*4"                                                              │
//! │      │  validate         only 0-9 . + - * / ( )   else "Invalid character"│
//! │      ▼                                                                  │
//! │  [ ( 2 + 3 ) * 4 ]                                                      │
//! │      │  tokenize         digit runs coalesce into one Number            │
//! │      ▼                                                                  │
//! │  [ 2 3 + 4 * ]                                                          │
//! │      │  to_postfix       shunting-yard, +-:1 */:2, left-associative     │
//! │      ▼                                                                  │
//! │  20                                                                     │
//! │         evaluate_postfix  one operand stack, two pops per operator      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Negative Literals
//! There is no unary minus operator. A `-` that starts the expression, or
//! follows an operator or `(`, and is directly followed by a digit or `.`,
//! belongs to the number: `2*-3` is `2 * (-3)`, while `-(2)` is a syntax error.
//!
//! Both conversion passes use explicit stacks; nothing recurses.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};
use crate::types::Operator;

// =============================================================================
// Tokens
// =============================================================================

/// One lexical unit of an infix expression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

/// Operator-stack entry during the infix-to-postfix pass.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Operator(Operator),
    OpenParen,
}

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | '*' | '/' | '(' | ')')
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

// =============================================================================
// Pipeline Steps
// =============================================================================

/// Removes every whitespace character.
pub fn strip_whitespace(source: &str) -> String {
    source.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Rejects the first character outside the expression alphabet.
pub fn validate(source: &str) -> CalcResult<()> {
    match source.chars().find(|&ch| !is_allowed(ch)) {
        Some(found) => Err(CalcError::InvalidCharacter { found }),
        None => Ok(()),
    }
}

/// Splits a whitespace-free expression into tokens.
///
/// ## Example
/// ```rust
/// use tally_core::expression::{tokenize, Token};
/// use tally_core::Operator;
///
/// let tokens = tokenize("12*-3").unwrap();
/// assert_eq!(
///     tokens,
///     vec![Token::Number(12.0), Token::Operator(Operator::Multiply), Token::Number(-3.0)]
/// );
/// ```
pub fn tokenize(source: &str) -> CalcResult<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < chars.len() {
        let ch = chars[index];

        let signed_literal = ch == '-'
            && starts_operand(tokens.last())
            && chars.get(index + 1).is_some_and(|&next| is_number_char(next));

        if is_number_char(ch) || signed_literal {
            let start = index;
            index += 1;
            while index < chars.len() && is_number_char(chars[index]) {
                index += 1;
            }
            let literal: String = chars[start..index].iter().collect();
            let value: f64 = literal.parse().map_err(|_| CalcError::Syntax)?;
            tokens.push(Token::Number(value));
            continue;
        }

        let token = match ch {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => Token::Operator(
                Operator::try_from(ch).map_err(|_| CalcError::InvalidCharacter { found: ch })?,
            ),
        };
        tokens.push(token);
        index += 1;
    }

    Ok(tokens)
}

/// True where a number is expected next.
fn starts_operand(previous: Option<&Token>) -> bool {
    matches!(
        previous,
        None | Some(Token::Operator(_)) | Some(Token::LeftParen)
    )
}

/// Reorders infix tokens into postfix (shunting-yard).
///
/// Unbalanced parentheses in either direction are a syntax error.
pub fn to_postfix(tokens: &[Token]) -> CalcResult<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Pending> = Vec::new();

    for &token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Operator(operator) => {
                while let Some(&Pending::Operator(top)) = stack.last() {
                    if top.precedence() < operator.precedence() {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(Pending::Operator(operator));
            }
            Token::LeftParen => stack.push(Pending::OpenParen),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Pending::Operator(operator)) => output.push(Token::Operator(operator)),
                    Some(Pending::OpenParen) => break,
                    None => return Err(CalcError::Syntax),
                }
            },
        }
    }

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Operator(operator) => output.push(Token::Operator(operator)),
            Pending::OpenParen => return Err(CalcError::Syntax),
        }
    }

    Ok(output)
}

/// Evaluates a postfix token stream.
///
/// Fails with `Syntax` on operand underflow or when the stack does not end
/// with exactly one value.
pub fn evaluate_postfix(postfix: &[Token]) -> CalcResult<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match *token {
            Token::Number(value) => stack.push(value),
            Token::Operator(operator) => {
                let rhs = stack.pop().ok_or(CalcError::Syntax)?;
                let lhs = stack.pop().ok_or(CalcError::Syntax)?;
                stack.push(operator.apply(lhs, rhs)?);
            }
            Token::LeftParen | Token::RightParen => return Err(CalcError::Syntax),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(CalcError::Syntax),
    }
}

/// Runs the whole pipeline on raw user text.
///
/// The result is not rounded; callers commit it at their precision.
///
/// ## Example
/// ```rust
/// use tally_core::expression::evaluate;
///
/// assert_eq!(evaluate("2+3*4"), Ok(14.0));
/// assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
/// ```
pub fn evaluate(source: &str) -> CalcResult<f64> {
    let cleaned = strip_whitespace(source);
    validate(&cleaned)?;

    let tokens = tokenize(&cleaned)?;
    if tokens.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let postfix = to_postfix(&tokens)?;
    evaluate_postfix(&postfix)
}

// =============================================================================
// Unit Tests
// =============================================================================
