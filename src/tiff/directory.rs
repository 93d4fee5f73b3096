//! Image File Directory (IFD) decoding
//!
//! An IFD is a 16-bit tag count, that many 12-byte tag entries, then
//! the absolute offset of the next IFD (0 meaning none). Tags are kept
//! in on-disk order, not sorted by id.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::io::byte_order::ByteOrderHandler;
use crate::io::window::ReadWindow;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::tag::Tag;

/// One decoded Image File Directory
#[derive(Debug, Clone)]
pub struct Directory {
    /// Tags in this directory, in on-disk order
    pub tags: Vec<Tag>,
    /// Cached id -> position lookup
    tag_index: HashMap<u16, usize>,
}

impl Directory {
    /// Decodes one IFD from the window's sequential cursor
    ///
    /// Returns the directory together with the absolute offset of the
    /// next IFD as stored in the trailing field. The first failing tag
    /// aborts the whole directory.
    pub fn decode(
        window: &mut ReadWindow,
        handler: &dyn ByteOrderHandler,
    ) -> TiffResult<(Directory, u32)> {
        let tag_count = handler
            .read_u16(window)
            .map_err(|e| TiffError::truncated("IFD tag count", e))?;
        debug!("Decoding IFD with {} tags", tag_count);

        let mut directory = Directory {
            tags: Vec::with_capacity(tag_count as usize),
            tag_index: HashMap::new(),
        };

        for index in 0..tag_count as usize {
            let tag = Tag::decode(window, handler, index)?;
            directory.add_tag(tag);
        }

        let next_offset = handler
            .read_u32(window)
            .map_err(|e| TiffError::truncated("next-directory offset", e))?;
        debug!("Next IFD offset: {}", next_offset);

        Ok((directory, next_offset))
    }

    fn add_tag(&mut self, tag: Tag) {
        self.tag_index.insert(tag.id, self.tags.len());
        self.tags.push(tag);
    }

    /// Gets a tag by id
    ///
    /// When a malformed directory repeats an id, the last occurrence
    /// wins, matching the lookup cache a sequential scan would build.
    pub fn get_tag(&self, id: u16) -> Option<&Tag> {
        self.tag_index.get(&id).map(|&i| &self.tags[i])
    }

    /// Checks whether this directory contains a tag with the given id
    pub fn has_tag(&self, id: u16) -> bool {
        self.tag_index.contains_key(&id)
    }

    /// Number of tags in this directory
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Directory with {} tags:", self.tags.len())?;
        for tag in &self.tags {
            writeln!(f, "  {}", tag)?;
        }
        Ok(())
    }
}
