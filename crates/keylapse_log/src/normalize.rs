//! Event normalization.
//!
//! Merges raw record collections into one replayable event sequence:
//! classify, concatenate, stable-sort by timestamp, dedup INITIAL, and
//! synthesize a baseline when none survives.

use crate::event::{EditEvent, EditEventKind, IgnoredKind};
use crate::source::RecordSource;
use keylapse_core::{DecodeError, EventTime};
use std::fmt;
use tracing::debug;

/// A recoverable defect noticed while loading or normalizing.
///
/// Diagnostics accumulate on the output instead of aborting the merge;
/// the consumer decides whether to present them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A source contributed nothing because it could not be read/parsed
    SourceLoad {
        /// The source that failed
        origin: String,
        /// Why it failed
        reason: String,
    },
    /// A record carried a malformed range or timestamp and was demoted
    Decode {
        /// The source the record came from
        origin: String,
        /// The record's index within its source
        index: usize,
        /// The decode failure
        error: DecodeError,
    },
    /// No event and no fallback established a baseline; the timeline
    /// degrades to a single empty document
    EmptyBaseline,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceLoad { origin, reason } => {
                write!(f, "source {}: {}", origin, reason)
            }
            Self::Decode {
                origin,
                index,
                error,
            } => write!(f, "source {} record {}: {}", origin, index, error),
            Self::EmptyBaseline => {
                write!(f, "no baseline could be established; starting from an empty document")
            }
        }
    }
}

/// The normalizer's output: a clean, ordered event sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLog {
    /// Events in replay order, with at most one (leading, possibly
    /// synthesized) INITIAL
    pub events: Vec<EditEvent>,
    /// Defects noticed along the way
    pub diagnostics: Vec<Diagnostic>,
}

impl NormalizedLog {
    /// Merge one or more sources into a replayable sequence.
    ///
    /// Records are classified per source, concatenated in source order,
    /// and stable-sorted by timestamp so that equal stamps keep their
    /// arrival order (a keystroke and its immediate echo may share one).
    /// Only the first INITIAL in sorted order survives; later ones are
    /// demoted to ignored events so a merged duplicate baseline can never
    /// overwrite replay progress. When no INITIAL survives, one is
    /// synthesized at the front from `fallback` (or an empty document,
    /// with a diagnostic) at [`EventTime::floor`].
    #[must_use]
    pub fn from_sources(sources: &[RecordSource], fallback: Option<&[String]>) -> Self {
        let mut events = Vec::new();
        let mut diagnostics = Vec::new();

        for source in sources {
            for (index, record) in source.records.iter().enumerate() {
                let (event, defect) = EditEvent::from_record(record);
                if let Some(error) = defect {
                    diagnostics.push(Diagnostic::Decode {
                        origin: source.origin.clone(),
                        index,
                        error,
                    });
                }
                events.push(event);
            }
        }

        // Vec::sort_by is stable: equal timestamps keep arrival order.
        events.sort_by(|a, b| a.time.cmp(&b.time));

        let mut seen_initial = false;
        for event in &mut events {
            if event.is_initial() {
                if seen_initial {
                    *event = EditEvent::ignored(event.time, IgnoredKind::DuplicateInitial);
                } else {
                    seen_initial = true;
                }
            }
        }

        if !seen_initial {
            let lines = match fallback {
                Some(lines) if !lines.is_empty() => lines.to_vec(),
                Some(_) | None => {
                    if fallback.is_none() {
                        diagnostics.push(Diagnostic::EmptyBaseline);
                    }
                    vec![String::new()]
                }
            };
            debug!(lines = lines.len(), "synthesizing baseline event");
            events.insert(
                0,
                EditEvent::new(EventTime::floor(), EditEventKind::Initial { lines }),
            );
        }

        Self {
            events,
            diagnostics,
        }
    }
}
