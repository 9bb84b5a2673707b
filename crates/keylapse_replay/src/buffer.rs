//! Point-in-time document snapshots.

use keylapse_core::split_lines;
use serde::Serialize;

/// An ordered sequence of lines representing one snapshot.
///
/// Invariant: at least one line (an empty document is a single empty
/// line). Each snapshot owns its storage outright, so a viewer can hold
/// any subset of a timeline without risk of later mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentBuffer {
    pub(crate) lines: Vec<String>,
}

impl DocumentBuffer {
    /// The empty document: one empty line
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Build from lines, restoring the non-empty invariant if needed
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            return Self::empty();
        }
        Self { lines }
    }

    /// Build by splitting text on line breaks
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    /// The lines of this snapshot
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines; always at least 1
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// One line by index
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// The whole document joined with `\n`
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Default for DocumentBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_one_empty_line() {
        let buffer = DocumentBuffer::empty();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.to_text(), "");
    }

    #[test]
    fn test_from_lines_restores_invariant() {
        let buffer = DocumentBuffer::from_lines(Vec::new());
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_from_text() {
        let buffer = DocumentBuffer::from_text("abc\ndef");
        assert_eq!(buffer.lines(), ["abc", "def"]);
        assert_eq!(buffer.to_text(), "abc\ndef");
    }

    #[test]
    fn test_serialize_as_line_array() {
        let buffer = DocumentBuffer::from_text("a\nb");
        let json = serde_json::to_string(&buffer).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
    }
}
