//! Read window over a byte source
//!
//! TIFF tag values that do not fit inline are addressed by absolute
//! offsets from the start of the TIFF stream, while decoding itself
//! proceeds sequentially. A `ReadWindow` couples a seekable source
//! with the absolute stream offset its position 0 corresponds to (the
//! window base), so absolute offsets can be translated into
//! source-relative reads.
//!
//! Canonical decoding uses a window with base 0 over the whole stream.
//! Fast decoding reads everything from the first IFD onward into one
//! buffer and wraps it in a window whose base is the first IFD offset,
//! which makes any reference into the skipped leading region
//! unresolvable by construction.

use std::io::{Read, Seek, SeekFrom};

use log::trace;

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{TiffError, TiffResult};

/// A byte source plus the absolute stream offset of its position 0
pub struct ReadWindow<'a> {
    source: &'a mut dyn SeekableReader,
    base: u64,
}

impl<'a> ReadWindow<'a> {
    /// Creates a window over `source` whose first byte sits at
    /// absolute stream offset `base`
    pub fn new(source: &'a mut dyn SeekableReader, base: u64) -> Self {
        ReadWindow { source, base }
    }

    /// The absolute stream offset of window position 0
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Reads exactly `buf.len()` bytes at the given absolute stream
    /// offset, preserving the sequential cursor
    ///
    /// Offsets before the window base cannot be resolved: those bytes
    /// were never read into the window (fast mode) or lie outside the
    /// stream entirely.
    pub fn read_exact_at(&mut self, buf: &mut [u8], offset: u64) -> TiffResult<()> {
        let relative = match offset.checked_sub(self.base) {
            Some(r) => r,
            None => return Err(TiffError::UnresolvableOffset(offset)),
        };

        trace!("Random read of {} bytes at offset {} (window base {})",
               buf.len(), offset, self.base);

        let cursor = self.source.stream_position()?;
        self.source.seek(SeekFrom::Start(relative))?;
        let result = self.source.read_exact(buf);
        self.source.seek(SeekFrom::Start(cursor))?;

        result?;
        Ok(())
    }
}

// Sequential reads pass straight through to the source, so the
// byte order handlers can consume a window like any other reader.
impl Read for ReadWindow<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.source.read(buf)
    }
}

impl Seek for ReadWindow<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.source.seek(pos)
    }
}
