//! Big-endian binary writer.
//!
//! [`BinaryWriter`] produces exactly the layout [`crate::BinaryReader`]
//! consumes.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::{Error, Result, MAX_STRING_LEN};

/// Writer for Java-style big-endian primitives.
///
/// # Example
///
/// ```
/// use imatlas_common::BinaryWriter;
///
/// let mut writer = BinaryWriter::new(Vec::new());
/// writer.write_u16_be(1).unwrap();
/// writer.write_prefixed_bytes(b"Bg").unwrap();
///
/// assert_eq!(writer.into_inner(), vec![0x00, 0x01, 0x00, 0x02, b'B', b'g']);
/// ```
#[derive(Debug)]
pub struct BinaryWriter<W: Write> {
    writer: W,
}

impl<W: Write> BinaryWriter<W> {
    /// Create a new binary writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a big-endian u16.
    #[inline]
    pub fn write_u16_be(&mut self, value: u16) -> Result<()> {
        self.writer.write_u16::<BigEndian>(value)?;
        Ok(())
    }

    /// Write a big-endian i32.
    #[inline]
    pub fn write_i32_be(&mut self, value: i32) -> Result<()> {
        self.writer.write_i32::<BigEndian>(value)?;
        Ok(())
    }

    /// Write a big-endian f32 from its raw bit pattern.
    #[inline]
    pub fn write_f32_be(&mut self, value: f32) -> Result<()> {
        self.writer.write_u32::<BigEndian>(value.to_bits())?;
        Ok(())
    }

    /// Write a big-endian u16 byte length followed by `bytes` verbatim.
    ///
    /// Nothing is written if `bytes` is longer than [`MAX_STRING_LEN`].
    pub fn write_prefixed_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > MAX_STRING_LEN {
            return Err(Error::StringTooLong { len: bytes.len() });
        }
        self.write_u16_be(bytes.len() as u16)?;
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Get a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume the writer and return the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinaryReader;

    #[test]
    fn test_write_primitives() {
        let mut writer = BinaryWriter::new(Vec::new());
        writer.write_u16_be(0x0102).unwrap();
        writer.write_i32_be(-2).unwrap();
        writer.write_f32_be(0.892578125).unwrap();

        assert_eq!(
            writer.into_inner(),
            vec![0x01, 0x02, 0xFF, 0xFF, 0xFF, 0xFE, 0x3F, 0x64, 0x80, 0x00]
        );
    }

    #[test]
    fn test_endian_symmetry() {
        let mut writer = BinaryWriter::new(Vec::new());
        for v in [0u16, 1, 0x00FF, 0xFF00, u16::MAX] {
            writer.write_u16_be(v).unwrap();
        }
        for v in [0i32, -1, i32::MIN, i32::MAX, 0x0102_0304] {
            writer.write_i32_be(v).unwrap();
        }
        let floats = [0.0f32, -0.0, 0.45703125, -1.5e-7, f32::MAX, f32::INFINITY, f32::NAN];
        for v in floats {
            writer.write_f32_be(v).unwrap();
        }

        let bytes = writer.into_inner();
        let mut reader = BinaryReader::new(&bytes);
        for v in [0u16, 1, 0x00FF, 0xFF00, u16::MAX] {
            assert_eq!(reader.read_u16_be().unwrap(), v);
        }
        for v in [0i32, -1, i32::MIN, i32::MAX, 0x0102_0304] {
            assert_eq!(reader.read_i32_be().unwrap(), v);
        }
        for v in floats {
            assert_eq!(reader.read_f32_be().unwrap().to_bits(), v.to_bits());
        }
        assert!(reader.is_empty());
    }

    #[test]
    fn test_prefixed_bytes_round_trip() {
        let long = vec![b'x'; MAX_STRING_LEN];
        let cases: [&[u8]; 5] = [
            b"",
            b"CstBgtest",
            "h\u{e9}llo w\u{f6}rld".as_bytes(),
            &[0xC0, 0x80, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80],
            &long,
        ];
        for bytes in cases {
            let mut writer = BinaryWriter::new(Vec::new());
            writer.write_prefixed_bytes(bytes).unwrap();
            let out = writer.into_inner();
            assert_eq!(&out[..2], &(bytes.len() as u16).to_be_bytes());

            let mut reader = BinaryReader::new(&out);
            assert_eq!(reader.read_prefixed_bytes().unwrap(), bytes);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_string_too_long() {
        let mut writer = BinaryWriter::new(Vec::new());
        let bytes = vec![b'x'; MAX_STRING_LEN + 1];

        let err = writer.write_prefixed_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::StringTooLong { len } if len == MAX_STRING_LEN + 1));
        assert!(writer.get_ref().is_empty());
    }
}
