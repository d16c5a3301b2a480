//! Common utilities for ImpossibleAtlas.
//!
//! The level editor that produces atlas files is written in Java, so every
//! multi-byte field on disk is big-endian and strings use the 16-bit length
//! prefix of `DataOutputStream::writeUTF`. String payloads are handled as raw
//! bytes and never decoded. This crate provides the two halves
//! of that encoding:
//!
//! - [`BinaryReader`] - Bounds-checked big-endian cursor over a byte slice
//! - [`BinaryWriter`] - Big-endian writer over any [`std::io::Write`]

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Largest byte length a length-prefixed string can carry.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;
