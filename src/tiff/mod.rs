//! TIFF metadata decoding module
//!
//! Structures and functions for decoding the directory tree of a
//! TIFF stream: header, IFD chain, tags and their typed values.

pub mod constants;
pub mod directory;
pub mod errors;
pub mod makernote;
pub mod reader;
pub mod tag;
pub(crate) mod types;
pub mod value;

#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use directory::Directory;
pub use errors::{TiffError, TiffResult};
pub use makernote::{MakernoteDecoder, MakernoteRegistry};
pub use reader::{CycleCheck, TiffReader};
pub use tag::Tag;
pub use types::Tiff;
pub use value::{FieldType, TagValue};
