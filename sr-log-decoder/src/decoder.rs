//! Main decoder API
//!
//! The Decoder runs the decode pipeline: version gate, metadata, segments.
//! Any failure aborts the whole decode; a [`DecodedCapture`] is only returned
//! once every stage has succeeded.

use crate::capture::DecodedCapture;
use crate::config::DecoderConfig;
use crate::container::{EntrySource, ZipContainer};
use crate::formats;
use crate::types::Result;
use std::path::Path;

/// The main decoder struct - entry point for all decoding operations
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a new decoder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Open and fully decode a `.sr` capture file
    ///
    /// The archive handle lives only for the duration of this call and is
    /// released on every return path.
    ///
    /// # Example
    /// ```no_run
    /// use sr_log_decoder::Decoder;
    /// use std::path::Path;
    ///
    /// let decoder = Decoder::new();
    /// let capture = decoder.open(Path::new("capture.sr")).unwrap();
    /// let clk = capture.channel_bit_position("CLK").unwrap();
    /// println!("CLK at t0: {}", capture.sample_value(clk, 0).unwrap());
    /// ```
    pub fn open(&self, path: &Path) -> Result<DecodedCapture> {
        log::info!("Decoding capture file: {:?}", path);

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());
        if extension.as_deref() != Some("sr") {
            log::warn!("File {:?} does not have the .sr extension", path);
        }

        let mut container = ZipContainer::open(path)?;
        self.decode(&mut container)
    }

    /// Decode a capture from any container accessor
    pub fn decode<S: EntrySource + ?Sized>(&self, source: &mut S) -> Result<DecodedCapture> {
        formats::check_version(source)?;
        let metadata = formats::read_metadata(source, &self.config)?;
        let samples = formats::assemble_segments(source)?;

        let capture = DecodedCapture::new(metadata, samples);
        log::info!(
            "Capture decoded: {} channels, {} samples",
            capture.channel_count(),
            capture.sample_count()
        );
        Ok(capture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;
    use crate::types::DecoderError;

    fn valid_source() -> MemoryContainer {
        MemoryContainer::new()
            .with_entry("version", b"2".to_vec())
            .with_entry("metadata", b"probe1=CLK\nprobe2=DATA\nunitsize=1\n".to_vec())
            .with_entry("logic-1-1", vec![0x01u8, 0x02])
    }

    #[test]
    fn test_decode_in_memory() {
        let capture = Decoder::new().decode(&mut valid_source()).unwrap();
        assert_eq!(capture.channel_count(), 2);
        assert_eq!(capture.sample_count(), 2);
        assert!(capture.sample_value(1, 1).unwrap());
    }

    #[test]
    fn test_version_checked_before_metadata() {
        let mut source = valid_source().with_entry("version", b"3".to_vec());
        let result = Decoder::new().decode(&mut source);
        assert!(matches!(result, Err(DecoderError::UnsupportedVersion(_))));
    }

    #[test]
    fn test_missing_metadata() {
        let mut source = MemoryContainer::new().with_entry("version", b"2".to_vec());
        let result = Decoder::new().decode(&mut source);
        assert!(matches!(result, Err(DecoderError::MissingEntry(name)) if name == "metadata"));
    }

    #[test]
    fn test_config_is_applied() {
        let metadata = b"probe1=CLOCK\nunitsize=1\n".to_vec();
        let mut source = valid_source().with_entry("metadata", metadata);
        let decoder = Decoder::with_config(
            DecoderConfig::new()
                .with_name_length_max(3)
                .with_reject_long_names(true),
        );
        let result = decoder.decode(&mut source);
        assert!(matches!(result, Err(DecoderError::InvalidChannelName(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = Decoder::new().open(Path::new("nonexistent.sr"));
        assert!(matches!(result, Err(DecoderError::ReadFailure(_))));
    }
}
