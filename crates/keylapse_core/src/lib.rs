//! Keylapse Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Positions, ranges, and timestamps used by the replay engine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod lines;
pub mod range;
pub mod time;

// Re-exports
pub use error::DecodeError;
pub use lines::split_lines;
pub use range::{Position, TextRange};
pub use time::EventTime;
