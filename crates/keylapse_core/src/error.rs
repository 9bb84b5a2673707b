//! Core error types for Keylapse.

use std::fmt;

/// Error decoding a textual field of a log record.
///
/// The offending text is always carried verbatim so that callers can
/// surface it in a diagnostic instead of fabricating a default position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Range descriptor does not have the `"L:C-L:C"` shape
    MalformedRange {
        /// The text that failed to decode
        text: String,
    },

    /// A range component is not a non-negative integer
    RangeComponent {
        /// The full range text
        text: String,
        /// The component that failed to parse
        component: String,
    },

    /// Timestamp is not a valid ISO-8601 instant
    MalformedTimestamp {
        /// The text that failed to decode
        text: String,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRange { text } => {
                write!(f, "Malformed range descriptor: {:?}", text)
            }
            Self::RangeComponent { text, component } => {
                write!(f, "Non-integer component {:?} in range {:?}", component, text)
            }
            Self::MalformedTimestamp { text } => {
                write!(f, "Malformed timestamp: {:?}", text)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_malformed_range() {
        let err = DecodeError::MalformedRange {
            text: "1:2".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed range descriptor: \"1:2\"");
    }

    #[test]
    fn test_display_component() {
        let err = DecodeError::RangeComponent {
            text: "a:0-0:0".to_string(),
            component: "a".to_string(),
        };
        assert!(err.to_string().contains("\"a\""));
    }
}
