//! Line/column positions and ranges.
//!
//! Ranges address a document by zero-based line and character column.
//! Decoding performs no bounds checking against any buffer; bounds are
//! the caller's responsibility.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A zero-based (line, column) pair. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line index
    pub line: usize,
    /// Zero-based character column
    pub col: usize,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A half-open span between two positions.
///
/// For insertions `start == end` (the insertion point). For deletions and
/// overwrites `start <= end` in document order and the span `[start, end)`
/// is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    /// Start of the span
    pub start: Position,
    /// End of the span (exclusive)
    pub end: Position,
}

impl TextRange {
    /// Create a new range
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range collapsed to a single point
    #[must_use]
    pub const fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Whether the range is a single insertion point
    #[must_use]
    pub const fn is_point(&self) -> bool {
        self.start.line == self.end.line && self.start.col == self.end.col
    }

    /// Whether the span stays on one line
    #[must_use]
    pub const fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Decode a `"<startLine>:<startCol>-<endLine>:<endCol>"` descriptor.
    ///
    /// The four fields are non-negative integers with literal `:` and `-`
    /// separators. Malformed input is an error naming the offending text;
    /// the decoder never substitutes a default position.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the field count is wrong or a component
    /// is not an integer.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let (start_str, end_str) = text.split_once('-').ok_or_else(|| {
            DecodeError::MalformedRange {
                text: text.to_string(),
            }
        })?;

        let start = decode_position(text, start_str)?;
        let end = decode_position(text, end_str)?;
        Ok(Self { start, end })
    }
}

fn decode_position(range_text: &str, part: &str) -> Result<Position, DecodeError> {
    let (line_str, col_str) = part.split_once(':').ok_or_else(|| {
        DecodeError::MalformedRange {
            text: range_text.to_string(),
        }
    })?;

    let line = line_str
        .parse()
        .map_err(|_| DecodeError::RangeComponent {
            text: range_text.to_string(),
            component: line_str.to_string(),
        })?;
    let col = col_str
        .parse()
        .map_err(|_| DecodeError::RangeComponent {
            text: range_text.to_string(),
            component: col_str.to_string(),
        })?;

    Ok(Position { line, col })
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TextRange {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
