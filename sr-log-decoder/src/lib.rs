//! Sigrok Capture Decoder Library
//!
//! Decodes sigrok `.sr` logic-analyzer captures into an in-memory sample matrix
//! addressable by (channel, sample index).
//!
//! # Architecture
//!
//! Decoding is one sequential pipeline over the capture's zip container:
//! - Version gate: the `version` entry must be `2`
//! - Metadata parser: `probe<N>=<name>` and `unitsize=<N>` lines from `metadata`
//! - Segment assembler: `logic-1-1`, `logic-1-2`, ... concatenated in order
//!
//! The result is a [`DecodedCapture`] that answers sample queries. It is
//! read-only and can be shared across threads.
//!
//! The library does NOT:
//! - Write or modify capture files
//! - Support sr format versions other than 2
//! - Analyze samples beyond extracting logic levels
//!
//! # Example Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let capture = sr_log_decoder::open(Path::new("i2c.sr")).unwrap();
//! let sda = capture.channel_bit_position("SDA").unwrap();
//!
//! for sample in 0..capture.sample_count().min(16) {
//!     print!("{}", capture.sample_value(sda, sample).unwrap() as u8);
//! }
//! println!();
//! capture.close();
//! ```

// Public modules
pub mod capture;
pub mod config;
pub mod container;
pub mod decoder;
pub mod formats;
pub mod types;

// Re-export main types for convenience
pub use capture::{ChannelLevels, DecodedCapture};
pub use config::DecoderConfig;
pub use container::{EntrySource, MemoryContainer, ZipContainer};
pub use decoder::Decoder;
pub use types::{Channel, DecoderError, Result};

use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open and decode a `.sr` capture with the default configuration
pub fn open(path: &Path) -> Result<DecodedCapture> {
    Decoder::new().open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        let decoder = Decoder::new();
        assert_eq!(decoder.config(), &DecoderConfig::default());
    }
}
