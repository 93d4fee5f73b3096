//! Vendor makernote decoder registry
//!
//! Makernotes are vendor-proprietary blobs stored as opaque tag
//! values, frequently TIFF-structured themselves. The core does not
//! know any vendor format; instead callers populate a registry at
//! startup mapping vendor identifiers to decode functions. A decode
//! function receives the raw tag bytes plus the enclosing container's
//! byte order, which is all a nested TIFF-like structure needs to be
//! decoded by recursively invoking this same crate.

use std::collections::HashMap;

use log::debug;

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::tag::Tag;
use crate::tiff::types::Tiff;

/// Decode function for one vendor's makernote layout
pub type MakernoteDecoder = Box<dyn Fn(&[u8], ByteOrder) -> TiffResult<Tiff> + Send + Sync>;

/// Caller-populated table of vendor makernote decoders
///
/// There is no implicit global registry; each consumer builds its own
/// and owns it.
#[derive(Default)]
pub struct MakernoteRegistry {
    decoders: HashMap<String, MakernoteDecoder>,
}

impl MakernoteRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        MakernoteRegistry { decoders: HashMap::new() }
    }

    /// Registers a decoder for a vendor identifier
    ///
    /// A later registration for the same vendor replaces the earlier
    /// one.
    pub fn register<F>(&mut self, vendor: &str, decoder: F)
    where
        F: Fn(&[u8], ByteOrder) -> TiffResult<Tiff> + Send + Sync + 'static,
    {
        debug!("Registering makernote decoder for vendor: {}", vendor);
        self.decoders.insert(vendor.to_string(), Box::new(decoder));
    }

    /// Whether a decoder is registered for the vendor
    pub fn supports(&self, vendor: &str) -> bool {
        self.decoders.contains_key(vendor)
    }

    /// Decodes a vendor tag's raw bytes with the registered decoder
    ///
    /// `order` is the byte order of the enclosing container, which
    /// most vendor layouts inherit.
    pub fn decode_tag(&self, vendor: &str, tag: &Tag, order: ByteOrder) -> TiffResult<Tiff> {
        let decoder = self
            .decoders
            .get(vendor)
            .ok_or_else(|| TiffError::NoMakernoteDecoder(vendor.to_string()))?;

        let raw = tag.raw_bytes()?;
        debug!("Decoding {} byte makernote for vendor: {}", raw.len(), vendor);
        decoder(raw, order)
    }
}
