//! Core types for the sigrok capture decoder library
//!
//! This module defines the channel record, the error taxonomy, and the fixed
//! entry names of the `.sr` container layout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Container entry holding the schema version marker
pub const VERSION_ENTRY: &str = "version";

/// Container entry holding the key=value metadata text
pub const METADATA_ENTRY: &str = "metadata";

/// Prefix of the numbered binary sample segments (`logic-1-1`, `logic-1-2`, ...)
pub const SEGMENT_PREFIX: &str = "logic-1-";

/// The only supported schema version (ASCII `'2'`)
pub const SUPPORTED_VERSION: u8 = b'2';

/// Default maximum length of a channel name, in characters
pub const LENGTH_NAME_MAX: usize = 20;

/// One logic probe declared in the capture metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Probe number as declared (`probe<N>=...`), 1-based
    pub number: u32,
    /// Human-readable probe name
    pub name: String,
}

impl Channel {
    /// Create a new channel record
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }

    /// Zero-based bit index of this channel inside a sample word
    ///
    /// `probe0` has no valid position and yields `None`.
    pub fn bit_position(&self) -> Option<u32> {
        self.number.checked_sub(1)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (probe {})", self.name, self.number)
    }
}

/// Errors that can occur during decoding or querying a capture
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Missing container entry: {0}")]
    MissingEntry(String),

    #[error("Read failure: {0}")]
    ReadFailure(String),

    #[error("Unsupported sr format version {0:?} (only version 2 supported)")]
    UnsupportedVersion(String),

    #[error("Invalid unit size 0: metadata never declared a non-zero unitsize")]
    InvalidUnitSize,

    #[error("Invalid channel name: {0}")]
    InvalidChannelName(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Channel {0} is declared as probe0 and has no bit position")]
    NoBitPosition(String),

    #[error("Out of range: bit position {bit_position}, sample {sample_index}")]
    OutOfRange { bit_position: u32, sample_index: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_position_is_number_minus_one() {
        assert_eq!(Channel::new(1, "CLK").bit_position(), Some(0));
        assert_eq!(Channel::new(9, "D8").bit_position(), Some(8));
        assert_eq!(Channel::new(0, "BAD").bit_position(), None);
    }

    #[test]
    fn test_error_display() {
        let err = DecoderError::UnsupportedVersion("3".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported sr format version \"3\" (only version 2 supported)"
        );

        let err = DecoderError::OutOfRange {
            bit_position: 8,
            sample_index: 2,
        };
        assert_eq!(err.to_string(), "Out of range: bit position 8, sample 2");

        let err = DecoderError::NoBitPosition("GND".to_string());
        assert_eq!(
            err.to_string(),
            "Channel GND is declared as probe0 and has no bit position"
        );
    }
}
