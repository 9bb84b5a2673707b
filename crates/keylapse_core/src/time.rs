//! Event timestamps.
//!
//! Timestamps order events during merge; they never address buffers.

use crate::error::DecodeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An absolute, totally-ordered instant attached to every event.
///
/// Wraps a UTC instant parsed from the ISO-8601 strings the trackers emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventTime(DateTime<Utc>);

impl EventTime {
    /// Parse from an ISO-8601 / RFC 3339 string
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedTimestamp`] if the text is not a
    /// valid instant.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|_| DecodeError::MalformedTimestamp {
                text: text.to_string(),
            })
    }

    /// The earliest representable instant.
    ///
    /// Synthesized baseline events carry this time so that a stable sort
    /// places them before every real event.
    #[must_use]
    pub const fn floor() -> Self {
        Self(DateTime::<Utc>::MIN_UTC)
    }

    /// The wrapped UTC instant
    #[must_use]
    pub const fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
