//! Zip decompression for monthly kline archives.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Errors that can occur while reading an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container is corrupt or unsupported.
    #[error("Zip error: {0}")]
    Zip(#[from] ZipError),

    /// The archive holds no members.
    #[error("Archive has no members")]
    Empty,
}

/// Reads the raw bytes of the first member of the zip archive at `path`.
///
/// Binance monthly archives hold a single CSV member named after the
/// archive; any further members are ignored. Text decoding is left to the
/// line parser so one bad line cannot spoil the rest of the member.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not a valid zip or
/// holds no members.
pub fn read_archive_member(path: &Path) -> Result<Vec<u8>, ArchiveError> {
    let file = File::open(path)?;
    read_first_member(BufReader::new(file))
}

/// Reads the first member of a zip archive from any seekable reader.
///
/// # Errors
///
/// See [`read_archive_member`].
pub fn read_first_member<R: Read + Seek>(reader: R) -> Result<Vec<u8>, ArchiveError> {
    let mut archive = ZipArchive::new(reader)?;
    if archive.is_empty() {
        return Err(ArchiveError::Empty);
    }

    let mut member = archive.by_index(0)?;
    let mut bytes = Vec::with_capacity(usize::try_from(member.size()).unwrap_or(0));
    member.read_to_end(&mut bytes)?;

    Ok(bytes)
}
