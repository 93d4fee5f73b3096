//! TIFF stream reader
//!
//! This module implements the two public decode entry points. The
//! canonical path walks the IFD chain with true random access, seeking
//! to each directory offset in turn. The fast path reads the header,
//! seeks once to the first IFD offset and bulk-reads the remainder of
//! the stream into a single window, then decodes directories
//! back-to-back without seeking between them. The fast path is only
//! valid when all metadata (directories and every out-of-line value
//! they reference) lies at or after the first IFD offset, which holds
//! for camera files that pack their pixel payload first.

use std::collections::HashSet;
use std::io::{Cursor, Read, Seek, SeekFrom};

use log::{debug, info};

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::io::window::ReadWindow;
use crate::tiff::constants::header;
use crate::tiff::directory::Directory;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::types::Tiff;

/// Cycle detection policy for the IFD chain walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleCheck {
    /// Reject only a next-offset that repeats the immediately
    /// preceding offset. This is the historical behavior; longer
    /// cycles (A -> B -> A) are not detected.
    Legacy,
    /// Track every directory offset seen and reject any revisit. This
    /// rejects some chains the legacy check accepts.
    Strict,
}

/// Reader for TIFF metadata streams
pub struct TiffReader {
    cycle_check: CycleCheck,
}

impl Default for TiffReader {
    fn default() -> Self {
        TiffReader::new()
    }
}

impl TiffReader {
    /// Creates a reader with the legacy cycle check
    pub fn new() -> Self {
        TiffReader { cycle_check: CycleCheck::Legacy }
    }

    /// Creates a reader with an explicit cycle detection policy
    pub fn with_cycle_check(cycle_check: CycleCheck) -> Self {
        TiffReader { cycle_check }
    }

    /// Decodes a TIFF stream using true random access
    ///
    /// The first read from `reader` must be the first byte of the
    /// TIFF data. Directories may live anywhere in the stream, in any
    /// order; each one is sought independently. Each chain offset is
    /// checked against the stream length before seeking so a malformed
    /// offset fails instead of walking past end-of-stream.
    pub fn read(&self, reader: &mut dyn SeekableReader) -> TiffResult<Tiff> {
        debug!("Canonical decode starting");
        let (order, handler, first_offset) = read_header(reader)?;

        let stream_len = stream_length(reader)?;
        let mut directories = Vec::new();
        let mut visited = HashSet::new();
        let mut offset = first_offset;

        while offset != 0 {
            if offset as u64 >= stream_len {
                return Err(TiffError::OffsetBeyondEnd(offset as u64));
            }

            debug!("Reading IFD at offset {}", offset);
            reader.seek(SeekFrom::Start(offset as u64))?;

            let mut window = ReadWindow::new(&mut *reader, 0);
            let (directory, next) = Directory::decode(&mut window, handler.as_ref())?;

            self.check_cycle(offset, next, &mut visited)?;

            directories.push(directory);
            offset = next;
        }

        info!("Decoded {} IFDs from TIFF stream", directories.len());
        Ok(Tiff { order, directories })
    }

    /// Decodes a TIFF stream with one seek and one bulk read
    ///
    /// Intended for large files whose metadata sits after the pixel
    /// payload. The caller asserts (this is not verified) that every
    /// directory and every out-of-line value lies at or after the
    /// first IFD offset, and that directories are packed back-to-back:
    /// the next-offset fields are not followed, decoding simply
    /// continues from wherever the previous directory ended. Any tag
    /// offset pointing before the first IFD offset fails as
    /// unresolvable because those bytes were never read.
    pub fn read_fast(&self, reader: &mut dyn SeekableReader) -> TiffResult<Tiff> {
        debug!("Fast decode starting");
        let (order, handler, first_offset) = read_header(reader)?;

        reader.seek(SeekFrom::Start(first_offset as u64))?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        debug!("Read {} bytes of trailing metadata at offset {}", data.len(), first_offset);

        let mut buffer = Cursor::new(data);
        let mut window = ReadWindow::new(&mut buffer, first_offset as u64);

        let mut directories = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(first_offset);
        let mut prev = first_offset;
        let mut next = first_offset;

        while next != 0 {
            let (directory, n) = Directory::decode(&mut window, handler.as_ref())?;

            // Directories are not independently sought here, so a
            // repeated next-offset signals a malformed field rather
            // than an actual backward jump.
            match self.cycle_check {
                CycleCheck::Legacy => {
                    if n == prev {
                        return Err(TiffError::RecursiveIfd(n as u64));
                    }
                }
                CycleCheck::Strict => {
                    if n != 0 && !visited.insert(n) {
                        return Err(TiffError::RecursiveIfd(n as u64));
                    }
                }
            }

            prev = n;
            next = n;
            directories.push(directory);
        }

        info!("Decoded {} IFDs from TIFF stream (fast path)", directories.len());
        Ok(Tiff { order, directories })
    }

    fn check_cycle(&self, offset: u32, next: u32, visited: &mut HashSet<u32>) -> TiffResult<()> {
        match self.cycle_check {
            CycleCheck::Legacy => {
                if next == offset {
                    return Err(TiffError::RecursiveIfd(next as u64));
                }
            }
            CycleCheck::Strict => {
                visited.insert(offset);
                if next != 0 && visited.contains(&next) {
                    return Err(TiffError::RecursiveIfd(next as u64));
                }
            }
        }
        Ok(())
    }
}

/// Reads the 8-byte TIFF header
///
/// Establishes the byte order from the marker, validates the magic
/// value under that order and returns the absolute offset of the
/// first IFD.
fn read_header(
    reader: &mut dyn SeekableReader,
) -> TiffResult<(ByteOrder, Box<dyn ByteOrderHandler>, u32)> {
    let order = ByteOrder::detect(reader)?;
    debug!("Detected byte order: {}", order.name());
    let handler = order.create_handler();

    let magic = handler
        .read_u16(reader)
        .map_err(|e| TiffError::truncated("header magic value", e))?;
    if magic != header::TIFF_MAGIC {
        return Err(TiffError::InvalidMagic(magic));
    }

    let first_offset = handler
        .read_u32(reader)
        .map_err(|e| TiffError::truncated("first IFD offset", e))?;
    debug!("First IFD offset: {}", first_offset);

    Ok((order, handler, first_offset))
}

/// Probes the stream length, restoring the cursor afterwards
fn stream_length(reader: &mut dyn SeekableReader) -> TiffResult<u64> {
    let cursor = reader.stream_position()?;
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(cursor))?;
    Ok(len)
}
