//! # History Log
//!
//! Bounded, newest-first record of completed computations.
//!
//! ```text
//! push("5 + 2", "7")   ──►  [ 5 + 2 = 7 ]
//! push("7 + 2", "9")   ──►  [ 7 + 2 = 9, 5 + 2 = 7 ]
//! ...
//! entry #51            ──►  oldest entry dropped, len stays 50
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::HISTORY_LIMIT;

/// One completed computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryEntry {
    /// What was computed, e.g. `"5 + 2"` or `"(2+3)*4"`.
    pub expression: String,
    /// The display string of the result.
    pub result: String,
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// The history tape.
///
/// ## Invariants
/// - Index 0 is the most recent entry
/// - Never more than [`HISTORY_LIMIT`] entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct History(Vec<HistoryEntry>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new log with `entry` in front, dropping the oldest past the limit.
    pub fn with_entry(&self, entry: HistoryEntry) -> Self {
        let mut entries = Vec::with_capacity(HISTORY_LIMIT);
        entries.push(entry);
        entries.extend(self.0.iter().take(HISTORY_LIMIT - 1).cloned());
        History(entries)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.0.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(expression: &str, result: &str) -> HistoryEntry {
        HistoryEntry {
            expression: expression.to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_newest_first() {
        let history = History::new()
            .with_entry(entry("5 + 2", "7"))
            .with_entry(entry("7 + 2", "9"));

        let results: Vec<&str> = history.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(results, vec!["9", "7"]);
        assert_eq!(history.latest().unwrap().expression, "7 + 2");
    }

    #[test]
    fn test_bounded_to_limit() {
        let mut history = History::new();
        for i in 0..(HISTORY_LIMIT + 5) {
            history = history.with_entry(entry(&format!("{i} + 0"), &i.to_string()));
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.latest().unwrap().result, (HISTORY_LIMIT + 4).to_string());
        // The five oldest were dropped
        assert_eq!(history.iter().last().unwrap().result, "5");
    }

    #[test]
    fn test_with_entry_leaves_original_untouched() {
        let empty = History::new();
        let one = empty.with_entry(entry("1 + 1", "2"));
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(entry("2+3*4", "14").to_string(), "2+3*4 = 14");
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let history = History::new().with_entry(entry("1 + 1", "2"));
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"[{"expression":"1 + 1","result":"2"}]"#);
    }
}
