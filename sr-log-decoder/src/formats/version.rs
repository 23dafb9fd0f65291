//! Schema version gate
//!
//! The `version` entry of a supported capture is exactly one byte, ASCII `'2'`.

use crate::container::EntrySource;
use crate::types::{DecoderError, Result, SUPPORTED_VERSION, VERSION_ENTRY};

/// Fail unless the container declares the supported schema version
pub fn check_version<S: EntrySource + ?Sized>(source: &mut S) -> Result<()> {
    let version = source
        .read_entry(VERSION_ENTRY)?
        .ok_or_else(|| DecoderError::MissingEntry(VERSION_ENTRY.to_string()))?;

    if version.as_slice() != [SUPPORTED_VERSION] {
        return Err(DecoderError::UnsupportedVersion(
            String::from_utf8_lossy(&version).into_owned(),
        ));
    }

    log::debug!("sr format version {} accepted", SUPPORTED_VERSION as char);
    Ok(())
}
