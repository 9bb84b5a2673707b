//! Keylapse Event Log
//!
//! The raw report format written by the keystroke trackers, the typed
//! edit-event model, multi-source session loading, and the normalizer
//! that merges partial logs into one replayable sequence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event;
pub mod normalize;
pub mod record;
pub mod source;

pub use event::{EditEvent, EditEventKind, IgnoredKind};
pub use normalize::{Diagnostic, NormalizedLog};
pub use record::{InitialLine, RawRecord, ReportFile};
pub use source::{RecordSource, Session, SessionFiles, SourceError};
