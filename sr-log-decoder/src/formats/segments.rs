//! Segment assembler
//!
//! Sample data is split across `logic-1-1`, `logic-1-2`, ... entries. Discovery
//! stops at the first missing index; the segments found are copied back to
//! back, in index order, into one buffer sized from their summed lengths.

use crate::container::EntrySource;
use crate::types::{DecoderError, Result, SEGMENT_PREFIX};

/// Entry name of the segment with the given 1-based index
pub fn segment_name(index: u32) -> String {
    format!("{}{}", SEGMENT_PREFIX, index)
}

/// Concatenate all contiguous logic segments into one sample buffer
pub fn assemble_segments<S: EntrySource + ?Sized>(source: &mut S) -> Result<Vec<u8>> {
    let mut sizes = Vec::new();
    let mut total: u64 = 0;

    let mut index = 1u32;
    while let Some(size) = source.entry_size(&segment_name(index))? {
        log::debug!("Found segment {} ({} bytes)", segment_name(index), size);
        total = total.checked_add(size).ok_or_else(|| {
            DecoderError::ReadFailure("total segment size overflows".to_string())
        })?;
        sizes.push(size as usize);
        index += 1;
    }

    let total = usize::try_from(total).map_err(|_| {
        DecoderError::ReadFailure(format!("sample data too large ({} bytes)", total))
    })?;

    let mut data = vec![0u8; total];
    let mut pos = 0usize;
    for (i, size) in sizes.iter().enumerate() {
        let name = segment_name(i as u32 + 1);
        source.read_entry_into(&name, &mut data[pos..pos + size])?;
        pos += size;
    }

    log::info!(
        "Assembled {} segments into {} bytes of sample data",
        sizes.len(),
        total
    );

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;

    #[test]
    fn test_segment_name() {
        assert_eq!(segment_name(1), "logic-1-1");
        assert_eq!(segment_name(12), "logic-1-12");
    }

    #[test]
    fn test_segments_concatenated_in_order() {
        let mut source = MemoryContainer::new()
            .with_entry("logic-1-2", vec![3u8, 4, 5])
            .with_entry("logic-1-1", vec![1u8, 2])
            .with_entry("logic-1-3", vec![6u8]);

        let data = assemble_segments(&mut source).unwrap();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_no_segments_is_empty_buffer() {
        let mut source = MemoryContainer::new();
        let data = assemble_segments(&mut source).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_gap_stops_discovery() {
        let mut source = MemoryContainer::new()
            .with_entry("logic-1-1", vec![1u8])
            .with_entry("logic-1-3", vec![3u8]);

        let data = assemble_segments(&mut source).unwrap();
        assert_eq!(data, vec![1]);
    }

    #[test]
    fn test_empty_segment_in_sequence() {
        let mut source = MemoryContainer::new()
            .with_entry("logic-1-1", vec![1u8])
            .with_entry("logic-1-2", Vec::<u8>::new())
            .with_entry("logic-1-3", vec![3u8]);

        let data = assemble_segments(&mut source).unwrap();
        assert_eq!(data, vec![1, 3]);
    }
}
