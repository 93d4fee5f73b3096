//! Core decoded TIFF structures

use std::fmt;

use crate::io::byte_order::ByteOrder;
use crate::tiff::directory::Directory;

/// A decoded TIFF stream
///
/// Produced in a single decode pass and handed to the caller as an
/// immutable snapshot. The byte order is fixed when the header is read
/// and applies to every value in every directory.
#[derive(Debug)]
pub struct Tiff {
    /// Byte order the stream was decoded under
    pub order: ByteOrder,
    /// Image File Directories, index 0 is the primary directory
    pub directories: Vec<Directory>,
}

impl Tiff {
    /// Returns the primary (first) directory if available
    pub fn primary(&self) -> Option<&Directory> {
        self.directories.first()
    }

    /// Returns the number of directories in the stream
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }
}

impl fmt::Display for Tiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF stream:")?;
        writeln!(f, "  Byte order: {}", self.order.name())?;
        writeln!(f, "  Number of directories: {}", self.directories.len())?;

        for directory in &self.directories {
            write!(f, "{}", directory)?;
        }

        Ok(())
    }
}
