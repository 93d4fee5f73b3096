//! Unit tests for the TIFF decoding module
