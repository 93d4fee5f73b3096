//! Structural TIFF/EXIF metadata decoding
//!
//! This crate decodes the self-describing directory structure of
//! TIFF-family containers (including the TIFF blob embedded as EXIF
//! data in JPEG files) without touching the bulk pixel payload. The
//! result of a decode is an ordered tree: a container with its byte
//! order, an ordered list of Image File Directories, and per-directory
//! ordered lists of tags with typed values.
//!
//! Two entry points are provided. [`TiffReader::read`] is the
//! canonical decode over any readable and seekable source, following
//! directory and value offsets wherever they point.
//! [`TiffReader::read_fast`] seeks once to the first IFD offset and
//! bulk-reads the remainder of the stream, which avoids random access
//! into very large files but requires all metadata to sit at or after
//! that offset.

pub mod io;
pub mod tiff;

pub use crate::io::byte_order::ByteOrder;
pub use crate::tiff::{
    CycleCheck, Directory, FieldType, MakernoteRegistry, Tag, TagValue, Tiff, TiffError,
    TiffReader, TiffResult,
};
