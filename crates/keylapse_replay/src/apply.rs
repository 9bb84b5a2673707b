//! The per-event buffer mutation algorithm.
//!
//! `apply` is a pure function: it consumes the prior snapshot by
//! reference and returns a new one, so callers may retain any snapshot
//! unchanged. Columns are counted in characters; multi-byte sequences
//! pass through opaquely with no normalization.

use crate::buffer::DocumentBuffer;
use keylapse_core::{split_lines, Position, TextRange};
use keylapse_log::{EditEvent, EditEventKind};

impl DocumentBuffer {
    /// Apply a single edit event, producing the next snapshot.
    ///
    /// Line indices named by the event's range are made valid first by
    /// padding the buffer with empty lines. This tolerates ranges that
    /// point slightly past the buffer due to out-of-order anomalies, at
    /// the cost of masking genuine corruption. Columns past a line's end
    /// clamp to its character length. The result always has at least one
    /// line.
    #[must_use]
    pub fn apply(&self, event: &EditEvent) -> DocumentBuffer {
        match &event.kind {
            EditEventKind::Initial { lines } => DocumentBuffer::from_lines(lines.clone()),
            EditEventKind::Insertion { range, text } => self.spliced(range.start, text),
            EditEventKind::Deletion { range } => self.erased(*range),
            EditEventKind::Overwrite { range, text } => {
                // Symmetric delete-then-insert: the span goes first, then
                // the replacement lands at the junction point.
                let (start, _) = ordered(*range);
                self.erased(*range).spliced(start, text)
            }
            EditEventKind::Ignored { .. } => self.clone(),
        }
    }

    /// Splice `text` in at `pos`, splitting it into lines if it carries
    /// line breaks.
    fn spliced(&self, pos: Position, text: &str) -> DocumentBuffer {
        let mut lines = self.lines.clone();
        pad_to(&mut lines, pos.line);

        let pieces = split_lines(text);
        let at = byte_index(&lines[pos.line], pos.col);

        if pieces.len() == 1 {
            lines[pos.line].insert_str(at, &pieces[0]);
        } else {
            // First produced line: prefix + first piece. Last produced
            // line: last piece + suffix. Interior pieces go in verbatim.
            let suffix = lines[pos.line].split_off(at);
            lines[pos.line].push_str(&pieces[0]);
            let mut tail = pieces[1..].to_vec();
            if let Some(last) = tail.last_mut() {
                last.push_str(&suffix);
            }
            lines.splice(pos.line + 1..pos.line + 1, tail);
        }

        DocumentBuffer { lines }
    }

    /// Remove the span `[start, end)`.
    fn erased(&self, range: TextRange) -> DocumentBuffer {
        let (start, end) = ordered(range);
        let mut lines = self.lines.clone();
        pad_to(&mut lines, end.line);

        if start.line == end.line {
            let line = &mut lines[start.line];
            let from = byte_index(line, start.col);
            let to = byte_index(line, end.col).max(from);
            line.replace_range(from..to, "");
        } else {
            let keep = byte_index(&lines[start.line], start.col);
            let tail_at = byte_index(&lines[end.line], end.col);
            let suffix = lines[end.line][tail_at..].to_string();
            lines[start.line].truncate(keep);
            lines[start.line].push_str(&suffix);
            lines.drain(start.line + 1..=end.line);
        }

        DocumentBuffer { lines }
    }
}

/// Put a range's endpoints in document order.
fn ordered(range: TextRange) -> (Position, Position) {
    if range.end < range.start {
        (range.end, range.start)
    } else {
        (range.start, range.end)
    }
}

/// Grow with empty lines until `line` is a valid index.
fn pad_to(lines: &mut Vec<String>, line: usize) {
    while lines.len() <= line {
        lines.push(String::new());
    }
}

/// Byte offset of character column `col`, clamped to the line's end.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keylapse_core::EventTime;
    use keylapse_log::IgnoredKind;

    fn buffer(lines: &[&str]) -> DocumentBuffer {
        DocumentBuffer::from_lines(lines.iter().map(|l| (*l).to_string()).collect())
    }

    fn at(text: &str) -> TextRange {
        text.parse().unwrap()
    }

    fn event(kind: EditEventKind) -> EditEvent {
        EditEvent::new(EventTime::floor(), kind)
    }

    fn insertion(range: &str, text: &str) -> EditEvent {
        event(EditEventKind::Insertion {
            range: at(range),
            text: text.to_string(),
        })
    }

    fn deletion(range: &str) -> EditEvent {
        event(EditEventKind::Deletion { range: at(range) })
    }

    fn overwrite(range: &str, text: &str) -> EditEvent {
        event(EditEventKind::Overwrite {
            range: at(range),
            text: text.to_string(),
        })
    }

    #[test]
    fn test_initial_replaces_wholesale() {
        let next = buffer(&["old"]).apply(&event(EditEventKind::Initial {
            lines: vec!["a".to_string(), "b".to_string()],
        }));
        assert_eq!(next.lines(), ["a", "b"]);
    }

    #[test]
    fn test_single_line_insertion() {
        let next = buffer(&["abc"]).apply(&insertion("0:1-0:1", "X"));
        assert_eq!(next.lines(), ["aXbc"]);
    }

    #[test]
    fn test_multi_line_insertion() {
        let next = buffer(&["abc"]).apply(&insertion("0:1-0:1", "X\nY"));
        assert_eq!(next.lines(), ["aX", "Ybc"]);
    }

    #[test]
    fn test_insertion_with_interior_lines() {
        let next = buffer(&["abc"]).apply(&insertion("0:1-0:1", "X\nmid\nY"));
        assert_eq!(next.lines(), ["aX", "mid", "Ybc"]);
    }

    #[test]
    fn test_insertion_of_trailing_newline() {
        let next = buffer(&["ab"]).apply(&insertion("0:2-0:2", "\n"));
        assert_eq!(next.lines(), ["ab", ""]);
    }

    #[test]
    fn test_insertion_pads_missing_lines() {
        let next = buffer(&["ab"]).apply(&insertion("2:0-2:0", "x"));
        assert_eq!(next.lines(), ["ab", "", "x"]);
    }

    #[test]
    fn test_insertion_column_clamped() {
        let next = buffer(&["ab"]).apply(&insertion("0:99-0:99", "!"));
        assert_eq!(next.lines(), ["ab!"]);
    }

    #[test]
    fn test_single_line_deletion() {
        let next = buffer(&["abcd"]).apply(&deletion("0:1-0:3"));
        assert_eq!(next.lines(), ["ad"]);
    }

    #[test]
    fn test_cross_line_deletion() {
        let next = buffer(&["abc", "def"]).apply(&deletion("0:1-1:2"));
        assert_eq!(next.lines(), ["af"]);
    }

    #[test]
    fn test_deletion_removes_interior_lines() {
        let next = buffer(&["abc", "mid", "def"]).apply(&deletion("0:1-2:2"));
        assert_eq!(next.lines(), ["af"]);
    }

    #[test]
    fn test_deletion_of_whole_document_leaves_one_line() {
        let next = buffer(&["abc", "def"]).apply(&deletion("0:0-1:3"));
        assert_eq!(next.lines(), [""]);
        assert_eq!(next.line_count(), 1);
    }

    #[test]
    fn test_single_line_overwrite() {
        let next = buffer(&["abcd"]).apply(&overwrite("0:1-0:3", "XY"));
        assert_eq!(next.lines(), ["aXYd"]);
    }

    #[test]
    fn test_overwrite_spanning_lines() {
        let next = buffer(&["abc", "def"]).apply(&overwrite("0:1-1:2", "Z"));
        assert_eq!(next.lines(), ["aZf"]);
    }

    #[test]
    fn test_overwrite_with_multi_line_replacement() {
        let next = buffer(&["abc", "def"]).apply(&overwrite("0:1-1:2", "X\nY"));
        assert_eq!(next.lines(), ["aX", "Yf"]);
    }

    #[test]
    fn test_ignored_emits_unchanged_copy() {
        let prior = buffer(&["abc"]);
        let next = prior.apply(&event(EditEventKind::Ignored {
            kind: IgnoredKind::Selection,
        }));
        assert_eq!(next, prior);
    }

    #[test]
    fn test_apply_does_not_mutate_prior() {
        let prior = buffer(&["abc"]);
        let _ = prior.apply(&insertion("0:0-0:0", "zzz"));
        assert_eq!(prior.lines(), ["abc"]);
    }

    #[test]
    fn test_columns_count_characters_not_bytes() {
        let next = buffer(&["héllo"]).apply(&insertion("0:2-0:2", "X"));
        assert_eq!(next.lines(), ["héXllo"]);
    }

    #[test]
    fn test_deletion_counts_characters_not_bytes() {
        let next = buffer(&["héllo"]).apply(&deletion("0:1-0:2"));
        assert_eq!(next.lines(), ["hllo"]);
    }

    #[test]
    fn test_inverted_range_treated_in_document_order() {
        let next = buffer(&["abcd"]).apply(&deletion("0:3-0:1"));
        assert_eq!(next.lines(), ["ad"]);
    }
}
