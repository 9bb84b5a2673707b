//! Typed edit events.
//!
//! Raw records are classified into exactly one [`EditEvent`] each, so a
//! normalized log always has one event per surviving record and timeline
//! indices line up with the merged log.

use crate::record::RawRecord;
use keylapse_core::{DecodeError, EventTime, TextRange};
use serde::{Deserialize, Serialize};

/// Why an event does not mutate the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoredKind {
    /// SELECTION marker
    Selection,
    /// UNDO marker (the tracker records the resulting edits separately)
    Undo,
    /// REDO marker
    Redo,
    /// CUT marker
    Cut,
    /// A later INITIAL demoted during dedup
    DuplicateInitial,
    /// Record missing a field its kind requires
    MissingField,
    /// Record with a malformed range or timestamp
    Malformed,
    /// Record with an event kind this replayer does not know
    Unknown,
}

/// Payload of one edit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditEventKind {
    /// Replace the whole buffer with these lines
    Initial {
        /// Starting lines of the document
        lines: Vec<String>,
    },
    /// Splice text at the insertion point (`range.start == range.end`)
    Insertion {
        /// Insertion point
        range: TextRange,
        /// Inserted text, possibly spanning lines
        text: String,
    },
    /// Remove the span `[range.start, range.end)`
    Deletion {
        /// Removed span
        range: TextRange,
    },
    /// Remove the span, then splice the replacement at its start
    Overwrite {
        /// Replaced span
        range: TextRange,
        /// Replacement text, possibly spanning lines
        text: String,
    },
    /// Recorded but does not mutate state
    Ignored {
        /// Why the event is inert
        kind: IgnoredKind,
    },
}

/// One recorded change, ordered by its timestamp during merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditEvent {
    /// Merge-ordering instant; never used for buffer addressing
    pub time: EventTime,
    /// What the event does
    pub kind: EditEventKind,
}

impl EditEvent {
    /// Create an event
    #[must_use]
    pub const fn new(time: EventTime, kind: EditEventKind) -> Self {
        Self { time, kind }
    }

    /// Inert event at the given instant
    #[must_use]
    pub const fn ignored(time: EventTime, kind: IgnoredKind) -> Self {
        Self {
            time,
            kind: EditEventKind::Ignored { kind },
        }
    }

    /// Whether this is a baseline snapshot
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        matches!(self.kind, EditEventKind::Initial { .. })
    }

    /// Whether applying this event can change the buffer
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self.kind, EditEventKind::Ignored { .. })
    }

    /// Classify a raw record into an event.
    ///
    /// A record missing a field its kind requires becomes [`IgnoredKind::MissingField`];
    /// a malformed range or timestamp becomes [`IgnoredKind::Malformed`] and
    /// the decode failure is returned alongside so the caller can surface it
    /// as a diagnostic. Records whose timestamp cannot be established sort
    /// at [`EventTime::floor`].
    #[must_use]
    pub fn from_record(record: &RawRecord) -> (Self, Option<DecodeError>) {
        let (time, time_defect) = match record.timestamp.as_deref() {
            Some(text) => match EventTime::parse(text) {
                Ok(time) => (time, None),
                Err(err) => (EventTime::floor(), Some(err)),
            },
            None => (EventTime::floor(), None),
        };

        if let Some(err) = time_defect {
            return (Self::ignored(time, IgnoredKind::Malformed), Some(err));
        }
        if record.timestamp.is_none() {
            return (Self::ignored(time, IgnoredKind::MissingField), None);
        }

        let Some(kind_str) = record.event.as_deref() else {
            return (Self::ignored(time, IgnoredKind::MissingField), None);
        };

        match kind_str {
            "INITIAL" => match &record.initial_content {
                Some(lines) => {
                    let lines = lines.iter().map(|l| l.content.clone()).collect();
                    (Self::new(time, EditEventKind::Initial { lines }), None)
                }
                None => (Self::ignored(time, IgnoredKind::MissingField), None),
            },
            "INSERTION" => match (record.range.as_deref(), record.inserted.clone()) {
                (Some(range_str), Some(text)) => match TextRange::decode(range_str) {
                    Ok(range) => (
                        Self::new(time, EditEventKind::Insertion { range, text }),
                        None,
                    ),
                    Err(err) => (Self::ignored(time, IgnoredKind::Malformed), Some(err)),
                },
                _ => (Self::ignored(time, IgnoredKind::MissingField), None),
            },
            "DELETION" => match record.range.as_deref() {
                Some(range_str) => match TextRange::decode(range_str) {
                    Ok(range) => (Self::new(time, EditEventKind::Deletion { range }), None),
                    Err(err) => (Self::ignored(time, IgnoredKind::Malformed), Some(err)),
                },
                None => (Self::ignored(time, IgnoredKind::MissingField), None),
            },
            "OVERWRITE" => match (record.range.as_deref(), record.inserted.clone()) {
                (Some(range_str), Some(text)) => match TextRange::decode(range_str) {
                    Ok(range) => (
                        Self::new(time, EditEventKind::Overwrite { range, text }),
                        None,
                    ),
                    Err(err) => (Self::ignored(time, IgnoredKind::Malformed), Some(err)),
                },
                _ => (Self::ignored(time, IgnoredKind::MissingField), None),
            },
            "SELECTION" => (Self::ignored(time, IgnoredKind::Selection), None),
            "UNDO" => (Self::ignored(time, IgnoredKind::Undo), None),
            "REDO" => (Self::ignored(time, IgnoredKind::Redo), None),
            "CUT" => (Self::ignored(time, IgnoredKind::Cut), None),
            _ => (Self::ignored(time, IgnoredKind::Unknown), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keylapse_core::Position;

    fn record(kind: &str) -> RawRecord {
        RawRecord {
            timestamp: Some("2024-03-01T12:00:00Z".to_string()),
            event: Some(kind.to_string()),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_classify_insertion() {
        let raw = RawRecord {
            range: Some("0:1-0:1".to_string()),
            inserted: Some("x".to_string()),
            ..record("INSERTION")
        };
        let (event, defect) = EditEvent::from_record(&raw);
        assert!(defect.is_none());
        assert_eq!(
            event.kind,
            EditEventKind::Insertion {
                range: TextRange::point(Position::new(0, 1)),
                text: "x".to_string(),
            }
        );
        assert!(event.is_mutating());
    }

    #[test]
    fn test_classify_initial() {
        let raw = RawRecord {
            initial_content: Some(vec![
                crate::record::InitialLine {
                    content: "abc".to_string(),
                    ..Default::default()
                },
            ]),
            ..record("INITIAL")
        };
        let (event, defect) = EditEvent::from_record(&raw);
        assert!(defect.is_none());
        assert!(event.is_initial());
        assert_eq!(
            event.kind,
            EditEventKind::Initial {
                lines: vec!["abc".to_string()]
            }
        );
    }

    #[test]
    fn test_classify_insertion_missing_range() {
        let raw = RawRecord {
            inserted: Some("x".to_string()),
            ..record("INSERTION")
        };
        let (event, defect) = EditEvent::from_record(&raw);
        assert!(defect.is_none());
        assert_eq!(
            event.kind,
            EditEventKind::Ignored {
                kind: IgnoredKind::MissingField
            }
        );
    }

    #[test]
    fn test_classify_malformed_range() {
        let raw = RawRecord {
            range: Some("nonsense".to_string()),
            inserted: Some("x".to_string()),
            ..record("INSERTION")
        };
        let (event, defect) = EditEvent::from_record(&raw);
        assert!(defect.is_some());
        assert_eq!(
            event.kind,
            EditEventKind::Ignored {
                kind: IgnoredKind::Malformed
            }
        );
    }

    #[test]
    fn test_classify_malformed_timestamp_sorts_at_floor() {
        let raw = RawRecord {
            timestamp: Some("not a time".to_string()),
            event: Some("SELECTION".to_string()),
            ..RawRecord::default()
        };
        let (event, defect) = EditEvent::from_record(&raw);
        assert!(defect.is_some());
        assert_eq!(event.time, EventTime::floor());
        assert!(!event.is_mutating());
    }

    #[test]
    fn test_classify_selection_markers() {
        for (kind_str, kind) in [
            ("SELECTION", IgnoredKind::Selection),
            ("UNDO", IgnoredKind::Undo),
            ("REDO", IgnoredKind::Redo),
            ("CUT", IgnoredKind::Cut),
        ] {
            let (event, defect) = EditEvent::from_record(&record(kind_str));
            assert!(defect.is_none());
            assert_eq!(event.kind, EditEventKind::Ignored { kind });
        }
    }

    #[test]
    fn test_classify_unknown_kind() {
        let (event, defect) = EditEvent::from_record(&record("PASTE_SUSPECT"));
        assert!(defect.is_none());
        assert_eq!(
            event.kind,
            EditEventKind::Ignored {
                kind: IgnoredKind::Unknown
            }
        );
    }

    #[test]
    fn test_classify_missing_everything() {
        let (event, defect) = EditEvent::from_record(&RawRecord::default());
        assert!(defect.is_none());
        assert_eq!(event.time, EventTime::floor());
        assert_eq!(
            event.kind,
            EditEventKind::Ignored {
                kind: IgnoredKind::MissingField
            }
        );
    }
}
