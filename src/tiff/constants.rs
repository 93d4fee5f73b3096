//! TIFF format constants
//!
//! Constants used throughout the decoding code, replacing magic
//! numbers with descriptive names.

/// TIFF header constants
pub mod header {
    /// Fixed magic value that follows the byte order marker (42)
    pub const TIFF_MAGIC: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x4D, 0x4D];

    /// Total header size: marker + magic + first IFD offset
    pub const HEADER_SIZE: u64 = 8;
}

/// Field types as defined in the TIFF 6.0 spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
}

/// Directory entry layout
pub mod entry {
    /// Size of one IFD entry: tag id + type + count + value slot
    pub const ENTRY_SIZE: usize = 12;

    /// Size of the inline value slot inside an entry
    pub const INLINE_SIZE: usize = 4;
}

/// Tags commonly consumed by metadata callers
pub mod tags {
    // Basic image structure tags
    pub const IMAGE_WIDTH: u16 = 256;        // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257;       // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 258;    // Bits per component
    pub const COMPRESSION: u16 = 259;        // Compression scheme
    pub const ORIENTATION: u16 = 274;        // Image orientation

    // Descriptive tags
    pub const MAKE: u16 = 271;               // Camera manufacturer
    pub const MODEL: u16 = 272;              // Camera model
    pub const SOFTWARE: u16 = 305;           // Software used to create the image
    pub const DATE_TIME: u16 = 306;          // Date and time of image creation
    pub const ARTIST: u16 = 315;             // Person who created the image
    pub const COPYRIGHT: u16 = 33432;        // Copyright notice

    // Resolution tags
    pub const X_RESOLUTION: u16 = 282;       // Horizontal resolution
    pub const Y_RESOLUTION: u16 = 283;       // Vertical resolution
    pub const RESOLUTION_UNIT: u16 = 296;    // Unit of measurement for resolution

    // EXIF structure tags
    pub const EXIF_IFD_POINTER: u16 = 34665; // Offset to the EXIF sub-IFD
    pub const GPS_IFD_POINTER: u16 = 34853;  // Offset to the GPS sub-IFD
    pub const MAKER_NOTE: u16 = 37500;       // Vendor-proprietary opaque blob
    pub const USER_COMMENT: u16 = 37510;     // Free-form user comment
}
