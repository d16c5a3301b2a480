//! Big-endian binary reader over byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads the
//! Java-style big-endian primitives found in atlas files without copying.

use crate::{Error, Result};

/// A binary reader that reads big-endian values from a byte slice.
///
/// Every read is bounds-checked. A read that would run past the end of the
/// buffer fails with [`Error::UnexpectedEof`] and leaves the position untouched.
///
/// # Example
///
/// ```
/// use imatlas_common::BinaryReader;
///
/// let data = [0x00, 0x02, b'B', b'g', 0x01, 0x02];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_prefixed_bytes().unwrap(), b"Bg");
/// assert_eq!(reader.read_u16_be().unwrap(), 0x0102);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Read a big-endian i32.
    #[inline]
    pub fn read_i32_be(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    /// Read a big-endian f32.
    ///
    /// The four bytes are reassembled into a `u32` and reinterpreted as an
    /// IEEE-754 binary32 bit pattern, so NaN payloads survive untouched.
    #[inline]
    pub fn read_f32_be(&mut self) -> Result<f32> {
        self.read_array().map(|b| f32::from_bits(u32::from_be_bytes(b)))
    }

    /// Read a big-endian u16 byte length followed by that many bytes.
    ///
    /// The bytes are returned verbatim; no character set is assumed. On
    /// failure the position is left where it was before the length prefix.
    pub fn read_prefixed_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.position;
        let len = self.read_u16_be()? as usize;
        self.read_bytes(len).map_err(|e| {
            self.position = start;
            e
        })
    }
}
