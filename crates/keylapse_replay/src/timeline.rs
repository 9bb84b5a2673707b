//! The timeline: one snapshot per replayed event.

use crate::buffer::DocumentBuffer;
use keylapse_log::{Diagnostic, EditEvent, EditEventKind, NormalizedLog, RecordSource, Session};
use tracing::debug;

/// The complete ordered list of document snapshots for one session.
///
/// Index 0 is the baseline; every subsequent index corresponds to one
/// replayed event (ignored events included, so index-to-event
/// correspondence is preserved for the consumer). Built once per loaded
/// source set and immutable thereafter; rebuild wholesale if the sources
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    states: Vec<DocumentBuffer>,
    events: Vec<EditEvent>,
    diagnostics: Vec<Diagnostic>,
}

impl Timeline {
    /// Build a timeline from raw sources and an optional fallback
    /// baseline.
    ///
    /// Deterministic: identical source content yields an identical
    /// timeline regardless of which physical source contributed which
    /// record. The buffer the (possibly synthesized) leading INITIAL
    /// produces becomes the baseline; each later event emits exactly one
    /// snapshot, so `len() == event_count() + 1`.
    #[must_use]
    pub fn build(sources: &[RecordSource], fallback: Option<&[String]>) -> Self {
        let log = NormalizedLog::from_sources(sources, fallback);
        Self::from_normalized(log)
    }

    /// Build from an already-loaded session, carrying its load
    /// diagnostics through.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let mut timeline = Self::build(&session.sources, session.fallback.as_deref());
        let mut diagnostics = session.diagnostics.clone();
        diagnostics.append(&mut timeline.diagnostics);
        timeline.diagnostics = diagnostics;
        timeline
    }

    /// Build from a normalized event sequence.
    #[must_use]
    pub fn from_normalized(log: NormalizedLog) -> Self {
        let mut events = log.events;

        // The leading INITIAL produces the baseline and is not itself an
        // emitting event. Anomalous logs can sort real events ahead of
        // the retained INITIAL; those fold from an empty baseline and the
        // INITIAL replaces the buffer wholesale when reached.
        let leading_initial = events.first().is_some_and(EditEvent::is_initial);
        let baseline = if leading_initial {
            if let EditEventKind::Initial { lines } = events.remove(0).kind {
                DocumentBuffer::from_lines(lines)
            } else {
                DocumentBuffer::empty()
            }
        } else {
            DocumentBuffer::empty()
        };

        let mut states = Vec::with_capacity(events.len() + 1);
        states.push(baseline);
        for event in &events {
            let next = states
                .last()
                .map(|state| state.apply(event))
                .unwrap_or_default();
            states.push(next);
        }

        debug!(states = states.len(), events = events.len(), "timeline built");
        Self {
            states,
            events,
            diagnostics: log.diagnostics,
        }
    }

    /// Number of snapshots; always `event_count() + 1`
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the timeline holds no snapshots.
    ///
    /// Always false: even a session with no usable data degrades to a
    /// single empty-document baseline.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Snapshot at a timeline cursor position
    #[must_use]
    pub fn state(&self, index: usize) -> Option<&DocumentBuffer> {
        self.states.get(index)
    }

    /// The baseline snapshot (index 0)
    #[must_use]
    pub fn baseline(&self) -> &DocumentBuffer {
        &self.states[0]
    }

    /// The final snapshot
    #[must_use]
    pub fn last(&self) -> &DocumentBuffer {
        self.states.last().expect("timeline holds the baseline")
    }

    /// All snapshots in order
    #[must_use]
    pub fn states(&self) -> &[DocumentBuffer] {
        &self.states
    }

    /// The replayed events; `events()[i]` produced `states()[i + 1]`
    #[must_use]
    pub fn events(&self) -> &[EditEvent] {
        &self.events
    }

    /// Number of replayed events
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// The event that produced the snapshot at `index`, if any
    #[must_use]
    pub fn event_for(&self, index: usize) -> Option<&EditEvent> {
        index.checked_sub(1).and_then(|i| self.events.get(i))
    }

    /// Defects noticed while loading and normalizing
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
