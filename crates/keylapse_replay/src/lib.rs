//! Keylapse Replay Engine
//!
//! Deterministic reconstruction of document states from edit-event logs.
//! A timeline is a pure fold of the per-event apply algorithm over a
//! normalized event sequence; every snapshot owns its storage.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod apply;
pub mod buffer;
pub mod timeline;

pub use buffer::DocumentBuffer;
pub use timeline::Timeline;
