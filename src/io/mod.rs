//! I/O abstractions for offset-addressed decoding
//!
//! This module provides the reader traits and the read window used to
//! translate absolute TIFF offsets into source-relative reads.

pub mod byte_order;
pub mod seekable;
pub mod window;
