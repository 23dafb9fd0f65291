//! `.sr` entry parsers
//!
//! One module per pipeline stage: the version gate, the metadata parser and
//! the segment assembler. Each works against any [`EntrySource`](crate::container::EntrySource).

pub mod metadata;
pub mod segments;
pub mod version;

pub use metadata::{parse_metadata, read_metadata, Metadata};
pub use segments::{assemble_segments, segment_name};
pub use version::check_version;
