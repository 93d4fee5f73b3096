//! Typed tag values
//!
//! This module classifies the twelve TIFF 6.0 field types and holds
//! the materialized payload of a decoded tag. Type codes outside the
//! known set are kept as opaque bytes so that private vendor tags do
//! not abort decoding of the rest of a directory.

use std::fmt;

use crate::tiff::constants::field_types;

/// Classification of a tag's value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 8-bit unsigned integer
    Byte,
    /// 8-bit bytes holding an ASCII string, usually NUL-terminated
    Ascii,
    /// 16-bit unsigned integer
    Short,
    /// 32-bit unsigned integer
    Long,
    /// Unsigned (numerator, denominator) pair of LONGs
    Rational,
    /// 8-bit signed integer
    SByte,
    /// 8-bit byte with unspecified format
    Undefined,
    /// 16-bit signed integer
    SShort,
    /// 32-bit signed integer
    SLong,
    /// Signed (numerator, denominator) pair of SLONGs
    SRational,
    /// Single precision IEEE floating point
    Float,
    /// Double precision IEEE floating point
    Double,
}

impl FieldType {
    /// Classifies a raw type code, returning None for codes outside
    /// the TIFF 6.0 set
    pub fn from_code(code: u16) -> Option<FieldType> {
        match code {
            field_types::BYTE => Some(FieldType::Byte),
            field_types::ASCII => Some(FieldType::Ascii),
            field_types::SHORT => Some(FieldType::Short),
            field_types::LONG => Some(FieldType::Long),
            field_types::RATIONAL => Some(FieldType::Rational),
            field_types::SBYTE => Some(FieldType::SByte),
            field_types::UNDEFINED => Some(FieldType::Undefined),
            field_types::SSHORT => Some(FieldType::SShort),
            field_types::SLONG => Some(FieldType::SLong),
            field_types::SRATIONAL => Some(FieldType::SRational),
            field_types::FLOAT => Some(FieldType::Float),
            field_types::DOUBLE => Some(FieldType::Double),
            _ => None,
        }
    }

    /// Size in bytes of a single value of this type
    pub fn size(&self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Human-readable name for this field type
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Materialized payload of a decoded tag
///
/// Each variant holds exactly `count` elements of the type the entry
/// declared. Rationals keep their raw (numerator, denominator) pairs,
/// never reduced and never validated for a non-zero denominator.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// BYTE values
    Bytes(Vec<u8>),
    /// ASCII values, raw bytes including any trailing NUL
    Ascii(Vec<u8>),
    /// SHORT values
    Shorts(Vec<u16>),
    /// LONG values
    Longs(Vec<u32>),
    /// RATIONAL pairs
    Rationals(Vec<(u32, u32)>),
    /// SBYTE values
    SBytes(Vec<i8>),
    /// UNDEFINED values, format unspecified by the container
    Undefined(Vec<u8>),
    /// SSHORT values
    SShorts(Vec<i16>),
    /// SLONG values
    SLongs(Vec<i32>),
    /// SRATIONAL pairs
    SRationals(Vec<(i32, i32)>),
    /// FLOAT values
    Floats(Vec<f32>),
    /// DOUBLE values
    Doubles(Vec<f64>),
    /// Raw bytes of a type code this decoder does not recognize
    Opaque(Vec<u8>),
}

impl TagValue {
    /// Number of materialized values
    pub fn len(&self) -> usize {
        match self {
            TagValue::Bytes(v) => v.len(),
            TagValue::Ascii(v) => v.len(),
            TagValue::Shorts(v) => v.len(),
            TagValue::Longs(v) => v.len(),
            TagValue::Rationals(v) => v.len(),
            TagValue::SBytes(v) => v.len(),
            TagValue::Undefined(v) => v.len(),
            TagValue::SShorts(v) => v.len(),
            TagValue::SLongs(v) => v.len(),
            TagValue::SRationals(v) => v.len(),
            TagValue::Floats(v) => v.len(),
            TagValue::Doubles(v) => v.len(),
            TagValue::Opaque(v) => v.len(),
        }
    }

    /// Whether the tag carried no values (count == 0)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the variant, used in accessor error reporting
    pub fn kind_name(&self) -> &'static str {
        match self {
            TagValue::Bytes(_) => "BYTE",
            TagValue::Ascii(_) => "ASCII",
            TagValue::Shorts(_) => "SHORT",
            TagValue::Longs(_) => "LONG",
            TagValue::Rationals(_) => "RATIONAL",
            TagValue::SBytes(_) => "SBYTE",
            TagValue::Undefined(_) => "UNDEFINED",
            TagValue::SShorts(_) => "SSHORT",
            TagValue::SLongs(_) => "SLONG",
            TagValue::SRationals(_) => "SRATIONAL",
            TagValue::Floats(_) => "FLOAT",
            TagValue::Doubles(_) => "DOUBLE",
            TagValue::Opaque(_) => "OPAQUE",
        }
    }
}
