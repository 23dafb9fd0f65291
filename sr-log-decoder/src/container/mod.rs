//! Container access for `.sr` captures
//!
//! A capture is a zip archive of named entries. The decode pipeline only needs
//! three things from it: whether an entry exists and how big it is, and its
//! bytes copied into a caller-supplied buffer. [`EntrySource`] is that seam;
//! [`ZipContainer`] backs it with a real archive and [`MemoryContainer`] with
//! blobs already in memory.

use crate::types::{DecoderError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Read access to the named entries of a capture container
pub trait EntrySource {
    /// Byte size of an entry, or `None` if the container has no such entry
    fn entry_size(&mut self, name: &str) -> Result<Option<u64>>;

    /// Read an entry completely into `buf`
    ///
    /// The entry size must equal `buf.len()`; anything else is a read failure.
    fn read_entry_into(&mut self, name: &str, buf: &mut [u8]) -> Result<()>;

    /// Read a whole entry into a new buffer, or `None` if it does not exist
    fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let Some(size) = self.entry_size(name)? else {
            return Ok(None);
        };
        let len = usize::try_from(size).map_err(|_| {
            DecoderError::ReadFailure(format!("entry {} too large ({} bytes)", name, size))
        })?;
        let mut buf = vec![0u8; len];
        self.read_entry_into(name, &mut buf)?;
        Ok(Some(buf))
    }
}

/// Zip archive backed container
pub struct ZipContainer<R> {
    archive: ZipArchive<R>,
}

impl ZipContainer<BufReader<File>> {
    /// Open a capture archive by path
    pub fn open(path: &Path) -> Result<Self> {
        log::debug!("Opening capture archive: {:?}", path);

        let file = File::open(path).map_err(|e| {
            DecoderError::ReadFailure(format!("failed to open {:?}: {}", path, e))
        })?;

        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            DecoderError::ReadFailure(msg) => {
                DecoderError::ReadFailure(format!("{:?}: {}", path, msg))
            }
            other => other,
        })
    }
}

impl<R: Read + Seek> ZipContainer<R> {
    /// Wrap any seekable reader holding a zip archive
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| DecoderError::ReadFailure(format!("not a valid zip archive: {}", e)))?;
        Ok(Self { archive })
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// True if the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

impl<R: Read + Seek> EntrySource for ZipContainer<R> {
    fn entry_size(&mut self, name: &str) -> Result<Option<u64>> {
        match self.archive.by_name(name) {
            Ok(file) => Ok(Some(file.size())),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(DecoderError::ReadFailure(format!(
                "failed to stat {}: {}",
                name, e
            ))),
        }
    }

    fn read_entry_into(&mut self, name: &str, buf: &mut [u8]) -> Result<()> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(DecoderError::MissingEntry(name.to_string()))
            }
            Err(e) => {
                return Err(DecoderError::ReadFailure(format!(
                    "failed to open {}: {}",
                    name, e
                )))
            }
        };

        if file.size() != buf.len() as u64 {
            return Err(DecoderError::ReadFailure(format!(
                "{} is {} bytes, expected {}",
                name,
                file.size(),
                buf.len()
            )));
        }

        file.read_exact(buf)
            .map_err(|e| DecoderError::ReadFailure(format!("failed to read {}: {}", name, e)))?;

        // Reading to EOF is what makes the zip reader verify the CRC
        let mut trailing = [0u8; 1];
        match file.read(&mut trailing) {
            Ok(0) => Ok(()),
            Ok(_) => Err(DecoderError::ReadFailure(format!(
                "{} holds more than its declared {} bytes",
                name,
                buf.len()
            ))),
            Err(e) => Err(DecoderError::ReadFailure(format!(
                "failed to read {}: {}",
                name, e
            ))),
        }
    }
}

/// In-memory container of named blobs
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add (or replace) an entry
    pub fn with_entry(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(name, data);
        self
    }

    /// Add (or replace) an entry
    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), data.into());
    }
}

impl EntrySource for MemoryContainer {
    fn entry_size(&mut self, name: &str) -> Result<Option<u64>> {
        Ok(self.entries.get(name).map(|data| data.len() as u64))
    }

    fn read_entry_into(&mut self, name: &str, buf: &mut [u8]) -> Result<()> {
        let data = self
            .entries
            .get(name)
            .ok_or_else(|| DecoderError::MissingEntry(name.to_string()))?;

        if data.len() != buf.len() {
            return Err(DecoderError::ReadFailure(format!(
                "{} is {} bytes, expected {}",
                name,
                data.len(),
                buf.len()
            )));
        }

        buf.copy_from_slice(data);
        Ok(())
    }
}
