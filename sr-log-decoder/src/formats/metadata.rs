//! Metadata parser
//!
//! The `metadata` entry is newline separated text. Two kinds of line matter:
//!
//! - `probe<N>=<name>` declares a channel whose bit position is `N - 1`
//! - `unitsize=<N>` declares the number of bytes in one sample word
//!
//! Everything else (section headers, samplerate, device info, ...) is skipped.

use crate::config::DecoderConfig;
use crate::container::EntrySource;
use crate::types::{Channel, DecoderError, Result, METADATA_ENTRY};

/// Channel table and unit size extracted from the metadata entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Channels in the order they appear in the metadata text
    pub channels: Vec<Channel>,
    /// Bytes per sample word, always non-zero
    pub unit_size: u8,
}

/// One classified metadata line
#[derive(Debug, Clone, PartialEq, Eq)]
enum MetadataLine<'a> {
    Probe { number: u32, name: &'a str },
    UnitSize(u8),
    Other,
}

/// Read and parse the metadata entry of a container
pub fn read_metadata<S: EntrySource + ?Sized>(
    source: &mut S,
    config: &DecoderConfig,
) -> Result<Metadata> {
    let bytes = source
        .read_entry(METADATA_ENTRY)?
        .ok_or_else(|| DecoderError::MissingEntry(METADATA_ENTRY.to_string()))?;

    let text = String::from_utf8_lossy(&bytes);
    parse_metadata(&text, config)
}

/// Parse metadata text into a channel table and unit size
pub fn parse_metadata(text: &str, config: &DecoderConfig) -> Result<Metadata> {
    let mut channels = Vec::new();
    let mut unit_size = 0u8;

    for line in text.split('\n').filter(|l| !l.is_empty()) {
        match classify_line(line) {
            MetadataLine::Probe { number, name } => {
                let name = fit_name(name, config)?;
                log::debug!("Parsed channel {} (probe {})", name, number);
                if number == 0 {
                    log::warn!("Channel {} declared as probe0, it has no bit position", name);
                }
                channels.push(Channel::new(number, name));
            }
            MetadataLine::UnitSize(size) => {
                log::debug!("Parsed unitsize {}", size);
                unit_size = size;
            }
            MetadataLine::Other => {
                log::trace!("Ignoring metadata line: {:?}", line);
            }
        }
    }

    if unit_size == 0 {
        return Err(DecoderError::InvalidUnitSize);
    }

    log::info!(
        "Parsed {} channels, unitsize {}",
        channels.len(),
        unit_size
    );

    Ok(Metadata {
        channels,
        unit_size,
    })
}

fn classify_line(line: &str) -> MetadataLine<'_> {
    if let Some(rest) = line.strip_prefix("probe") {
        if let Some((number, rest)) = leading_number(rest) {
            if let Some(rest) = rest.strip_prefix('=') {
                let name = first_token(rest);
                if !name.is_empty() {
                    if let Ok(number) = number.parse::<u32>() {
                        return MetadataLine::Probe { number, name };
                    }
                    log::warn!("Probe number out of range in metadata line: {:?}", line);
                    return MetadataLine::Other;
                }
            }
        }
    }

    if let Some(rest) = line.strip_prefix("unitsize=") {
        if let Some((number, _)) = leading_number(rest) {
            match number.parse::<u8>() {
                Ok(size) => return MetadataLine::UnitSize(size),
                Err(_) => log::warn!("unitsize does not fit in one byte: {:?}", line),
            }
        }
    }

    MetadataLine::Other
}

/// Split off a run of ASCII digits, skipping leading whitespace
fn leading_number(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s.split_at(end))
}

/// First whitespace delimited token, skipping leading whitespace
fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

fn fit_name(name: &str, config: &DecoderConfig) -> Result<String> {
    // 0 disables the limit
    if config.name_length_max == 0 || name.chars().count() <= config.name_length_max {
        return Ok(name.to_string());
    }

    if config.reject_long_names {
        return Err(DecoderError::InvalidChannelName(format!(
            "{} exceeds {} characters",
            name, config.name_length_max
        )));
    }

    let truncated: String = name.chars().take(config.name_length_max).collect();
    log::warn!("Channel name {} truncated to {}", name, truncated);
    Ok(truncated)
}
