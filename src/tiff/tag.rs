//! Tag decoding and typed value access
//!
//! A tag is one 12-byte directory entry: a 16-bit id, a 16-bit value
//! type code, a 32-bit value count and a 4-byte slot that holds either
//! the value itself (when it fits) or the absolute offset where the
//! values are stored. This module decodes entries into materialized
//! typed values and exposes the typed accessors consumers use to pull
//! them back out.

use std::fmt;
use std::io::Cursor;

use log::{debug, trace};

use crate::io::byte_order::ByteOrderHandler;
use crate::io::window::ReadWindow;
use crate::tiff::constants::entry;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::value::{FieldType, TagValue};

/// One decoded directory entry
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// TIFF tag identifier
    pub id: u16,
    /// Raw value type code as stored in the entry
    pub type_code: u16,
    /// Classified field type, None for codes outside the TIFF 6.0 set
    pub field_type: Option<FieldType>,
    /// Number of values the entry declared
    pub count: u32,
    /// Materialized values, exactly `count` of them
    value: TagValue,
}

impl Tag {
    /// Decodes one entry from the window's sequential cursor
    ///
    /// `index` is the tag's position inside its directory, used only
    /// to name the failing structure on a short read. When the value
    /// does not fit in the 4-byte slot, the slot is reinterpreted as
    /// an absolute offset and the payload is fetched through the
    /// window without disturbing the sequential cursor.
    pub fn decode(
        window: &mut ReadWindow,
        handler: &dyn ByteOrderHandler,
        index: usize,
    ) -> TiffResult<Tag> {
        let id = handler
            .read_u16(window)
            .map_err(|e| TiffError::truncated(&format!("id of tag {}", index), e))?;
        let type_code = handler
            .read_u16(window)
            .map_err(|e| TiffError::truncated(&format!("type of tag {}", index), e))?;
        let count = handler
            .read_u32(window)
            .map_err(|e| TiffError::truncated(&format!("count of tag {}", index), e))?;

        let mut slot = [0u8; entry::INLINE_SIZE];
        std::io::Read::read_exact(window, &mut slot)
            .map_err(|e| TiffError::truncated(&format!("value slot of tag {}", index), e))?;

        let field_type = FieldType::from_code(type_code);
        // Unknown type codes are carried as opaque bytes, one byte per
        // declared value.
        let elem_size = field_type.map(|t| t.size()).unwrap_or(1);
        let total_size = elem_size as u64 * count as u64;

        let raw = if count == 0 {
            Vec::new()
        } else if total_size <= entry::INLINE_SIZE as u64 {
            slot[..total_size as usize].to_vec()
        } else {
            let offset = handler.read_u32(&mut Cursor::new(&slot[..]))?;
            trace!("Tag {} stores {} bytes out of line at offset {}", id, total_size, offset);

            let mut buf = vec![0u8; total_size as usize];
            window.read_exact_at(&mut buf, offset as u64).map_err(|e| match e {
                TiffError::IoError(io) => {
                    TiffError::truncated(&format!("out-of-line value of tag {:#06x}", id), io)
                }
                other => other,
            })?;
            buf
        };

        let value = materialize(field_type, count, raw, handler)?;

        debug!("Decoded tag: id={:#06x}, type={} ({}), count={}",
               id,
               type_code,
               field_type.map(|t| t.name()).unwrap_or("unknown"),
               count);

        Ok(Tag { id, type_code, field_type, count, value })
    }

    /// The materialized value payload
    pub fn value(&self) -> &TagValue {
        &self.value
    }

    /// Unsigned integer value at index `i`
    ///
    /// Valid for BYTE, SHORT and LONG tags.
    pub fn uint(&self, i: usize) -> TiffResult<u64> {
        self.check_index(i)?;
        match &self.value {
            TagValue::Bytes(v) => Ok(v[i] as u64),
            TagValue::Shorts(v) => Ok(v[i] as u64),
            TagValue::Longs(v) => Ok(v[i] as u64),
            other => Err(self.wrong_type("BYTE, SHORT or LONG", other)),
        }
    }

    /// Signed integer value at index `i`
    ///
    /// Valid for any integer-typed tag; unsigned values widen.
    pub fn int(&self, i: usize) -> TiffResult<i64> {
        self.check_index(i)?;
        match &self.value {
            TagValue::Bytes(v) => Ok(v[i] as i64),
            TagValue::Shorts(v) => Ok(v[i] as i64),
            TagValue::Longs(v) => Ok(v[i] as i64),
            TagValue::SBytes(v) => Ok(v[i] as i64),
            TagValue::SShorts(v) => Ok(v[i] as i64),
            TagValue::SLongs(v) => Ok(v[i] as i64),
            other => Err(self.wrong_type("an integer type", other)),
        }
    }

    /// Floating point value at index `i`
    ///
    /// Valid for FLOAT and DOUBLE tags.
    pub fn float(&self, i: usize) -> TiffResult<f64> {
        self.check_index(i)?;
        match &self.value {
            TagValue::Floats(v) => Ok(v[i] as f64),
            TagValue::Doubles(v) => Ok(v[i]),
            other => Err(self.wrong_type("FLOAT or DOUBLE", other)),
        }
    }

    /// Unsigned rational pair at index `i`
    ///
    /// The pair is returned exactly as stored: not reduced, and the
    /// denominator may be zero.
    pub fn rational(&self, i: usize) -> TiffResult<(u32, u32)> {
        self.check_index(i)?;
        match &self.value {
            TagValue::Rationals(v) => Ok(v[i]),
            other => Err(self.wrong_type("RATIONAL", other)),
        }
    }

    /// Signed rational pair at index `i`
    pub fn srational(&self, i: usize) -> TiffResult<(i32, i32)> {
        self.check_index(i)?;
        match &self.value {
            TagValue::SRationals(v) => Ok(v[i]),
            other => Err(self.wrong_type("SRATIONAL", other)),
        }
    }

    /// The ASCII value as a string, trailing NUL bytes removed
    pub fn ascii(&self) -> TiffResult<String> {
        match &self.value {
            TagValue::Ascii(raw) => {
                let mut bytes = raw.clone();
                while bytes.last() == Some(&0) {
                    bytes.pop();
                }
                String::from_utf8(bytes)
                    .map_err(|e| TiffError::GenericError(format!("Invalid ASCII value: {}", e)))
            }
            other => Err(self.wrong_type("ASCII", other)),
        }
    }

    /// The raw byte payload of an opaque tag
    ///
    /// This is the surface makernote decoders consume: UNDEFINED,
    /// BYTE, ASCII and unrecognized types all expose their bytes.
    pub fn raw_bytes(&self) -> TiffResult<&[u8]> {
        match &self.value {
            TagValue::Bytes(v) | TagValue::Ascii(v) | TagValue::Undefined(v) | TagValue::Opaque(v) => {
                Ok(v)
            }
            other => Err(self.wrong_type("a byte-valued type", other)),
        }
    }

    /// Returns a human-readable description of this tag
    pub fn description(&self) -> String {
        format!(
            "Tag: {:#06x}, Type: {} ({}), Count: {}",
            self.id,
            self.type_code,
            self.field_type.map(|t| t.name()).unwrap_or("unknown"),
            self.count
        )
    }

    fn check_index(&self, i: usize) -> TiffResult<()> {
        let count = self.value.len();
        if i >= count {
            return Err(TiffError::IndexOutOfRange { index: i, count });
        }
        Ok(())
    }

    fn wrong_type(&self, expected: &'static str, actual: &TagValue) -> TiffError {
        TiffError::WrongValueType {
            expected,
            actual: actual.kind_name(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Interprets `raw` as `count` values of the declared type under the
/// stream's byte order
fn materialize(
    field_type: Option<FieldType>,
    count: u32,
    raw: Vec<u8>,
    handler: &dyn ByteOrderHandler,
) -> TiffResult<TagValue> {
    let field_type = match field_type {
        Some(t) => t,
        None => return Ok(TagValue::Opaque(raw)),
    };

    // Single-byte types keep their raw buffer, everything else is
    // re-read value by value under the established byte order.
    let n = count as usize;
    let mut cursor = Cursor::new(raw);

    let value = match field_type {
        FieldType::Byte => TagValue::Bytes(cursor.into_inner()),
        FieldType::Ascii => TagValue::Ascii(cursor.into_inner()),
        FieldType::Undefined => TagValue::Undefined(cursor.into_inner()),
        FieldType::SByte => {
            TagValue::SBytes(cursor.into_inner().into_iter().map(|b| b as i8).collect())
        }
        FieldType::Short => {
            let mut v = Vec::with_capacity(n);
            for _ in 0..n {
                v.push(handler.read_u16(&mut cursor)?);
            }
            TagValue::Shorts(v)
        }
        FieldType::SShort => {
            let mut v = Vec::with_capacity(n);
            for _ in 0..n {
                v.push(handler.read_i16(&mut cursor)?);
            }
            TagValue::SShorts(v)
        }
        FieldType::Long => {
            let mut v = Vec::with_capacity(n);
            for _ in 0..n {
                v.push(handler.read_u32(&mut cursor)?);
            }
            TagValue::Longs(v)
        }
        FieldType::SLong => {
            let mut v = Vec::with_capacity(n);
            for _ in 0..n {
                v.push(handler.read_i32(&mut cursor)?);
            }
            TagValue::SLongs(v)
        }
        FieldType::Rational => {
            let mut v = Vec::with_capacity(n);
            for _ in 0..n {
                v.push(handler.read_rational(&mut cursor)?);
            }
            TagValue::Rationals(v)
        }
        FieldType::SRational => {
            let mut v = Vec::with_capacity(n);
            for _ in 0..n {
                v.push(handler.read_srational(&mut cursor)?);
            }
            TagValue::SRationals(v)
        }
        FieldType::Float => {
            let mut v = Vec::with_capacity(n);
            for _ in 0..n {
                v.push(handler.read_f32(&mut cursor)?);
            }
            TagValue::Floats(v)
        }
        FieldType::Double => {
            let mut v = Vec::with_capacity(n);
            for _ in 0..n {
                v.push(handler.read_f64(&mut cursor)?);
            }
            TagValue::Doubles(v)
        }
    };

    Ok(value)
}
