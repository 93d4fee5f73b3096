//! Seekable reader trait
//!
//! TIFF structures are offset-addressed, so every byte source the
//! decoder consumes must support both sequential reads and seeks to
//! absolute positions.

use std::io::{Read, Seek};

/// Trait for byte sources that can both read and seek
///
/// Files, in-memory cursors and anything else implementing the
/// standard traits qualify through the blanket implementation.
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
