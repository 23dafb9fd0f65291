//! Report generation
//!
//! Builds a serializable summary of one decoded capture and renders it as
//! plain text or JSON.

use anyhow::Result;
use serde::Serialize;
use sr_log_decoder::DecodedCapture;
use std::path::Path;

/// Summary of one capture
#[derive(Debug, Clone, Serialize)]
pub struct CaptureReport {
    pub path: String,
    pub unit_size: u8,
    pub sample_count: u64,
    pub channels: Vec<ChannelReport>,
}

/// One channel row, with the first few levels when selected
#[derive(Debug, Clone, Serialize)]
pub struct ChannelReport {
    pub name: String,
    pub probe: u32,
    pub bit_position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<String>,
}

impl CaptureReport {
    /// Build a report, rendering up to `max_samples` levels for selected channels
    ///
    /// An empty `selected` list selects every channel. A channel named in
    /// `selected` must resolve to a readable bit position; with no selection,
    /// channels that cannot be read are reported without levels.
    pub fn build(
        path: &Path,
        capture: &DecodedCapture,
        selected: &[String],
        max_samples: u64,
    ) -> Result<Self> {
        for name in selected {
            capture.channel_bit_position(name)?;
        }

        let mut channels = Vec::with_capacity(capture.channel_count());
        for channel in capture.channels() {
            let explicit = selected.contains(&channel.name);
            let levels = match channel.bit_position() {
                Some(bit) if explicit => Some(render_levels(capture, bit, max_samples)?),
                Some(bit) if selected.is_empty() => {
                    match render_levels(capture, bit, max_samples) {
                        Ok(levels) => Some(levels),
                        Err(e) => {
                            log::warn!("No levels for channel {}: {}", channel.name, e);
                            None
                        }
                    }
                }
                _ => None,
            };

            channels.push(ChannelReport {
                name: channel.name.clone(),
                probe: channel.number,
                bit_position: channel.bit_position(),
                levels,
            });
        }

        Ok(Self {
            path: path.display().to_string(),
            unit_size: capture.unit_size(),
            sample_count: capture.sample_count(),
            channels,
        })
    }

    /// Render as human-readable text
    pub fn to_text(&self) -> String {
        let mut out = format!("Capture: {}\n", self.path);
        out.push_str(&format!("  Unit size: {} bytes\n", self.unit_size));
        out.push_str(&format!("  Samples:   {}\n", self.sample_count));
        out.push_str(&format!("  Channels:  {}\n", self.channels.len()));

        for channel in &self.channels {
            let bit = channel
                .bit_position
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "    {:<20} probe {:>3}  bit {:>3}",
                channel.name, channel.probe, bit
            ));
            if let Some(levels) = &channel.levels {
                out.push_str("  ");
                out.push_str(levels);
            }
            out.push('\n');
        }
        out
    }
}

/// First `max_samples` levels of one bit position as a `0`/`1` string
fn render_levels(capture: &DecodedCapture, bit: u32, max_samples: u64) -> Result<String> {
    let levels = capture.channel_levels(bit)?;
    Ok(levels
        .take(max_samples as usize)
        .map(|high| if high { '1' } else { '0' })
        .collect())
}

/// Render several reports as one JSON array
pub fn to_json(reports: &[CaptureReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_log_decoder::{Decoder, DecoderError, MemoryContainer};

    fn capture() -> DecodedCapture {
        let mut source = MemoryContainer::new()
            .with_entry("version", b"2".to_vec())
            .with_entry("metadata", b"probe1=CLK\nprobe2=DATA\nunitsize=1\n".to_vec())
            .with_entry("logic-1-1", vec![0x01u8, 0x02, 0x03]);
        Decoder::new().decode(&mut source).unwrap()
    }

    #[test]
    fn test_report_all_channels() {
        let report = CaptureReport::build(Path::new("a.sr"), &capture(), &[], 2).unwrap();
        assert_eq!(report.sample_count, 3);
        assert_eq!(report.channels[0].levels.as_deref(), Some("10"));
        assert_eq!(report.channels[1].levels.as_deref(), Some("01"));
    }

    #[test]
    fn test_report_selected_channel() {
        let selected = vec!["DATA".to_string()];
        let report = CaptureReport::build(Path::new("a.sr"), &capture(), &selected, 32).unwrap();
        assert_eq!(report.channels[0].levels, None);
        assert_eq!(report.channels[1].levels.as_deref(), Some("011"));
    }

    #[test]
    fn test_report_unknown_channel() {
        let selected = vec!["MISO".to_string()];
        let result = CaptureReport::build(Path::new("a.sr"), &capture(), &selected, 32);
        assert!(result.is_err());
    }

    fn wide_capture() -> DecodedCapture {
        // channel 9 needs a second byte but unitsize is 1
        let mut source = MemoryContainer::new()
            .with_entry("version", b"2".to_vec())
            .with_entry("metadata", b"probe1=CLK\nprobe9=HIGH\nunitsize=1\n".to_vec())
            .with_entry("logic-1-1", vec![0x01u8, 0x00]);
        Decoder::new().decode(&mut source).unwrap()
    }

    #[test]
    fn test_selected_channel_beyond_unit_size_is_an_error() {
        let selected = vec!["HIGH".to_string()];
        let result = CaptureReport::build(Path::new("a.sr"), &wide_capture(), &selected, 32);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DecoderError>(),
            Some(DecoderError::OutOfRange { bit_position: 8, .. })
        ));
    }

    #[test]
    fn test_unreadable_channel_skipped_when_reporting_all() {
        let report = CaptureReport::build(Path::new("a.sr"), &wide_capture(), &[], 32).unwrap();
        assert_eq!(report.channels[0].levels.as_deref(), Some("10"));
        assert_eq!(report.channels[1].levels, None);
    }

    #[test]
    fn test_text_and_json_rendering() {
        let report = CaptureReport::build(Path::new("a.sr"), &capture(), &[], 4).unwrap();
        let text = report.to_text();
        assert!(text.contains("Samples:   3"));
        assert!(text.contains("CLK"));

        let json = to_json(&[report]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["unit_size"], 1);
        assert_eq!(value[0]["channels"][1]["levels"], "011");
    }
}
