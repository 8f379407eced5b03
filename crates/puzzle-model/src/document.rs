use serde::{Deserialize, Serialize};

/// The record persisted to `puzzle.json`.
///
/// Always a single `words` key holding the starting words in the order the
/// remote source listed them. The file is replaced wholesale on every run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleDocument {
    pub words: Vec<String>,
}

impl PuzzleDocument {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Render as 2-space indented JSON, without a trailing newline.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
