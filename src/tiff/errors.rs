//! Custom error types for TIFF metadata decoding

use std::fmt;
use std::io;

/// TIFF-specific error types
///
/// Every error is fatal to the enclosing decode call: there is no
/// partial result and no local recovery. Unknown tag value types are
/// deliberately not represented here, they degrade to opaque byte
/// storage instead of failing the decode.
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Invalid byte order marker (raw marker bytes, big-endian)
    InvalidByteOrder(u16),
    /// Header magic value was not 42
    InvalidMagic(u16),
    /// Short read, naming the structure that was being decoded
    Truncated(String),
    /// An out-of-line value offset falls before the current read window
    UnresolvableOffset(u64),
    /// A directory offset points at or past the end of the stream
    OffsetBeyondEnd(u64),
    /// Next-directory offset repeats a directory already walked
    RecursiveIfd(u64),
    /// A typed accessor was called on a tag of a different value type
    WrongValueType {
        /// Value type the accessor expected
        expected: &'static str,
        /// Value type the tag actually holds
        actual: &'static str,
    },
    /// A typed accessor asked for an index at or past the value count
    IndexOutOfRange {
        /// Requested value index
        index: usize,
        /// Number of values the tag holds
        count: usize,
    },
    /// No makernote decoder registered for the vendor
    NoMakernoteDecoder(String),
    /// Generic error with message
    GenericError(String),
}

impl TiffError {
    /// Maps a short read into a `Truncated` error naming the missing
    /// structure, passing other I/O failures through unchanged
    pub fn truncated(what: &str, error: io::Error) -> TiffError {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            TiffError::Truncated(what.to_string())
        } else {
            TiffError::IoError(error)
        }
    }
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            TiffError::InvalidMagic(v) => write!(f, "Invalid TIFF magic value: {} (expected 42)", v),
            TiffError::Truncated(what) => write!(f, "Truncated stream while reading {}", what),
            TiffError::UnresolvableOffset(o) => write!(f, "Value offset {} falls before the read window", o),
            TiffError::OffsetBeyondEnd(o) => write!(f, "Directory offset {} is beyond the end of the stream", o),
            TiffError::RecursiveIfd(o) => write!(f, "Recursive IFD chain at offset {}", o),
            TiffError::WrongValueType { expected, actual } => {
                write!(f, "Wrong value type: expected {}, tag holds {}", expected, actual)
            }
            TiffError::IndexOutOfRange { index, count } => {
                write!(f, "Value index {} out of range for count {}", index, count)
            }
            TiffError::NoMakernoteDecoder(vendor) => {
                write!(f, "No makernote decoder registered for vendor: {}", vendor)
            }
            TiffError::GenericError(msg) => write!(f, "TIFF error: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

impl From<String> for TiffError {
    fn from(msg: String) -> Self {
        TiffError::GenericError(msg)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
