//! Serde model of the report wire format.
//!
//! A report is a JSON document with a `logs` array of loosely-typed
//! records. Every field except `timestamp` and `event` is optional, and
//! even those are tolerated when absent so that one defective record
//! never sinks the rest of its source.

use serde::{Deserialize, Serialize};

/// A report file: `{ "logs": [ ... ] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFile {
    /// Ordered records as the tracker appended them
    #[serde(default)]
    pub logs: Vec<RawRecord>,
}

/// One loosely-typed record from a report's `logs` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// ISO-8601 instant the tracker stamped the record with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Declared kind: INITIAL, INSERTION, DELETION, OVERWRITE,
    /// SELECTION, UNDO, REDO, or CUT
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    /// `"L:C-L:C"` descriptor, present for the mutating kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Inserted payload, present for INSERTION/OVERWRITE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted: Option<String>,

    /// Removed text as recorded by the tracker; not needed for replay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<String>,

    /// Selection descriptor for SELECTION records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,

    /// Starting lines of the document, present only on INITIAL
    #[serde(
        rename = "initialContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_content: Option<Vec<InitialLine>>,
}

/// One line of an INITIAL record's content.
///
/// The tracker also stamps each line with its index and its own range
/// descriptor; only `content` is consumed during replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialLine {
    /// Line index as recorded
    #[serde(default)]
    pub line: u64,
    /// Per-line range descriptor as recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// The line's text
    #[serde(default)]
    pub content: String,
}
