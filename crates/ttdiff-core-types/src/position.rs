//! Source positions inside a textual dump.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line/column position in the input text.
///
/// Columns count characters, with tab stops every four columns
/// (a tab at column 1 moves the cursor to column 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    /// Position of the first character of the input.
    pub const START: SourcePosition = SourcePosition { line: 1, column: 1 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
