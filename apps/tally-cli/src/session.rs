//! # Session
//!
//! Turns lines of typed labels into key presses on one calculator.
//!
//! ```text
//! "12 + 3 ="      ──► Key::Digit('1') Key::Digit('2') Key::Operator(+) ... ──► "15"
//! "(2+3)*4 ="     ──► expression mode: unknown word typed char by char     ──► "20"
//! "HISTORY"       ──► tape, newest first
//! "QUIT"          ──► stop reading
//! ```

use tracing::warn;

use tally_core::{CalculatorState, Key, Mode};

/// What the caller should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print these lines and keep reading.
    Print(Vec<String>),
    /// Stop reading input.
    Quit,
}

/// One calculator fed from text.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: CalculatorState,
}

impl Session {
    pub fn new(state: CalculatorState) -> Self {
        Session { state }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Applies one line of whitespace-separated labels.
    pub fn feed_line(&mut self, line: &str) -> Outcome {
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => return Outcome::Print(Vec::new()),
            [command] if command.eq_ignore_ascii_case("QUIT") => return Outcome::Quit,
            [command] if command.eq_ignore_ascii_case("HISTORY") => {
                return Outcome::Print(self.history_lines())
            }
            _ => {}
        }

        for word in words {
            self.feed_word(word);
        }
        Outcome::Print(vec![self.state.display_text().to_string()])
    }

    fn feed_word(&mut self, word: &str) {
        match word.parse::<Key>() {
            Ok(key) => self.state = self.state.press(key),
            Err(_) if self.state.mode() == Mode::Expression => self.type_expression(word),
            Err(err) => warn!(%err, "Skipping input"),
        }
    }

    /// Types `word` one character at a time.
    ///
    /// Only the expression alphabet is typed, so letters inside a word never
    /// reach command keys such as `C`.
    fn type_expression(&mut self, word: &str) {
        let mut buf = [0u8; 4];
        for ch in word.chars() {
            let key = if is_expression_char(ch) {
                ch.encode_utf8(&mut buf).parse::<Key>().ok()
            } else {
                None
            };
            match key {
                Some(key) => self.state = self.state.press(key),
                None => warn!(%ch, "Skipping character"),
            }
        }
    }

    fn history_lines(&self) -> Vec<String> {
        if self.state.history().is_empty() {
            return vec!["(no history)".to_string()];
        }
        self.state
            .history()
            .iter()
            .map(|entry| entry.to_string())
            .collect()
    }
}

fn is_expression_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | '*' | '/' | '(' | ')')
}

// =============================================================================
// Unit Tests
// =============================================================================
