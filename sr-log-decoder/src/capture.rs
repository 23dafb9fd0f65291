//! Decoded capture and sample access
//!
//! A [`DecodedCapture`] owns the channel table, the unit size and the sample
//! buffer of one `.sr` file. It is immutable once built, so a shared reference
//! can be queried from any number of threads.
//!
//! ## Bit layout
//! Sample `i` occupies bytes `[unit_size * i, unit_size * (i + 1))` of the
//! buffer. Channel bit `b` lives in byte `b / 8` of that word, at bit `b % 8`
//! (least significant bit first).

use crate::formats::Metadata;
use crate::types::{Channel, DecoderError, Result};

/// A fully decoded logic capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCapture {
    channels: Vec<Channel>,
    unit_size: u8,
    samples: Vec<u8>,
}

impl DecodedCapture {
    /// Build a capture from parsed metadata and an assembled sample buffer
    pub(crate) fn new(metadata: Metadata, samples: Vec<u8>) -> Self {
        Self {
            channels: metadata.channels,
            unit_size: metadata.unit_size,
            samples,
        }
    }

    /// Number of channels declared in the metadata
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Channel table in metadata order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// First channel with the given name (case-sensitive)
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Zero-based bit position of the named channel
    ///
    /// If several channels share a name, the first declared one wins.
    pub fn channel_bit_position(&self, name: &str) -> Result<u32> {
        let channel = self
            .channel(name)
            .ok_or_else(|| DecoderError::UnknownChannel(name.to_string()))?;

        channel
            .bit_position()
            .ok_or_else(|| DecoderError::NoBitPosition(channel.name.clone()))
    }

    /// Bytes per sample word
    pub fn unit_size(&self) -> u8 {
        self.unit_size
    }

    /// Number of complete sample words in the buffer
    pub fn sample_count(&self) -> u64 {
        (self.samples.len() / self.unit_size as usize) as u64
    }

    /// Raw sample buffer
    pub fn sample_bytes(&self) -> &[u8] {
        &self.samples
    }

    /// Bytes of one sample word
    pub fn sample_word(&self, sample_index: u64) -> Result<&[u8]> {
        if sample_index >= self.sample_count() {
            return Err(DecoderError::OutOfRange {
                bit_position: 0,
                sample_index,
            });
        }
        let unit = self.unit_size as usize;
        let start = unit * sample_index as usize;
        Ok(&self.samples[start..start + unit])
    }

    /// Logic level of a bit position at a sample index
    pub fn sample_value(&self, bit_position: u32, sample_index: u64) -> Result<bool> {
        if sample_index >= self.sample_count() || bit_position >= 8 * self.unit_size as u32 {
            return Err(DecoderError::OutOfRange {
                bit_position,
                sample_index,
            });
        }
        Ok(self.bit_at(bit_position, sample_index as usize))
    }

    /// Logic levels of one bit position across every sample, in order
    pub fn channel_levels(&self, bit_position: u32) -> Result<ChannelLevels<'_>> {
        if bit_position >= 8 * self.unit_size as u32 {
            return Err(DecoderError::OutOfRange {
                bit_position,
                sample_index: 0,
            });
        }
        Ok(ChannelLevels {
            capture: self,
            bit_position,
            next: 0,
            end: self.sample_count() as usize,
        })
    }

    /// Release the capture
    ///
    /// Equivalent to dropping it; provided so call sites can mark the end of use.
    pub fn close(self) {
        log::debug!(
            "Closing capture ({} channels, {} bytes)",
            self.channels.len(),
            self.samples.len()
        );
    }

    fn bit_at(&self, bit_position: u32, sample_index: usize) -> bool {
        let offset = self.unit_size as usize * sample_index + (bit_position / 8) as usize;
        let shift = bit_position % 8;
        (self.samples[offset] >> shift) & 1 == 1
    }
}

/// Iterator over the levels of one channel, see [`DecodedCapture::channel_levels`]
pub struct ChannelLevels<'a> {
    capture: &'a DecodedCapture,
    bit_position: u32,
    next: usize,
    end: usize,
}

impl Iterator for ChannelLevels<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.next >= self.end {
            return None;
        }
        let level = self.capture.bit_at(self.bit_position, self.next);
        self.next += 1;
        Some(level)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChannelLevels<'_> {}
