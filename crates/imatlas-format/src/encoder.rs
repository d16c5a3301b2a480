//! Binary atlas encoder.

use std::io::Write;

use imatlas_common::BinaryWriter;

use crate::{Atlas, Error, Fragment, Image, Result};

/// Writer for the binary atlas format.
///
/// The layout is exactly what [`crate::AtlasDecoder`] consumes. Positions
/// and the atlas-wide fragment total are derived, so they are not written.
#[derive(Debug)]
pub struct AtlasEncoder<W: Write> {
    writer: BinaryWriter<W>,
}

impl<W: Write> AtlasEncoder<W> {
    /// Create a new encoder writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BinaryWriter::new(writer),
        }
    }

    /// Write a complete atlas.
    ///
    /// Counts are checked against their 16-bit fields before anything is written.
    pub fn write_atlas(&mut self, atlas: &Atlas) -> Result<()> {
        let image_count = count_u16("image", atlas.image_count())?;
        for image in atlas.images() {
            count_u16("fragment", image.fragment_count())?;
        }

        self.writer.write_u16_be(image_count)?;
        for image in atlas.images() {
            self.write_image(image)?;
        }
        Ok(())
    }

    fn write_image(&mut self, image: &Image) -> Result<()> {
        self.writer.write_prefixed_bytes(image.name.as_bytes())?;
        self.writer
            .write_u16_be(count_u16("fragment", image.fragment_count())?)?;
        self.writer.write_prefixed_bytes(image.alpha_ref.as_bytes())?;

        for fragment in image.fragments() {
            self.write_fragment(fragment)?;
        }
        Ok(())
    }

    fn write_fragment(&mut self, fragment: &Fragment) -> Result<()> {
        self.writer.write_prefixed_bytes(fragment.name.as_bytes())?;
        self.writer.write_f32_be(fragment.x)?;
        self.writer.write_f32_be(fragment.y)?;
        self.writer.write_f32_be(fragment.w)?;
        self.writer.write_f32_be(fragment.h)?;
        Ok(())
    }

    /// Consume the encoder and return the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

fn count_u16(kind: &'static str, count: usize) -> Result<u16> {
    u16::try_from(count).map_err(|_| Error::CountOverflow { kind, count })
}

impl Atlas {
    /// Encode the atlas to the binary format.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut encoder = AtlasEncoder::new(Vec::new());
        encoder.write_atlas(self)?;
        Ok(encoder.into_inner())
    }

    /// Encode the atlas to a writer.
    pub fn encode_to<W: Write>(&self, writer: W) -> Result<()> {
        AtlasEncoder::new(writer).write_atlas(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AtlasDecoder;

    fn sample_atlas() -> Atlas {
        let mut atlas = Atlas::new();
        atlas.add_image(Image::with_fragments(
            "Bg",
            "BgAlpha",
            [Fragment::new("CstBgtest", 0.892578125, 0.45703125, 0.078125, 0.533203125)],
        ));
        atlas.add_image(Image::with_fragments(
            "Tiles_png",
            "",
            [
                Fragment::new("grass", 0.0, 0.0, 0.25, 0.25),
                Fragment::new("stone", 0.25, 0.0, 0.25, 0.25),
                Fragment::new("wätter", 0.5, 0.0, 0.25, 0.25),
            ],
        ));
        atlas.add_image(Image::new("Empty", "EmptyAlpha"));
        atlas
    }

    #[test]
    fn test_encode_blank() {
        assert_eq!(Atlas::new().encode().unwrap(), vec![0x00, 0x00]);
    }

    #[test]
    fn test_encode_layout() {
        let mut atlas = Atlas::new();
        atlas.add_image(Image::with_fragments(
            "Bg",
            "A",
            [Fragment::new("f", 1.0, 0.5, 0.25, 0.0)],
        ));

        let mut expected = vec![0x00, 0x01];
        expected.extend_from_slice(b"\x00\x02Bg\x00\x01\x00\x01A\x00\x01f");
        expected.extend_from_slice(&[0x3F, 0x80, 0x00, 0x00]);
        expected.extend_from_slice(&[0x3F, 0x00, 0x00, 0x00]);
        expected.extend_from_slice(&[0x3E, 0x80, 0x00, 0x00]);
        expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        assert_eq!(atlas.encode().unwrap(), expected);
    }

    #[test]
    fn test_round_trip() {
        let atlas = sample_atlas();
        let bytes = atlas.encode().unwrap();
        let decoded = AtlasDecoder::new().decode(&bytes).unwrap();

        assert_eq!(decoded, atlas);
        assert_eq!(decoded.fragment_count(), 4);
        assert_eq!(decoded.encode().unwrap(), bytes);
    }

    #[test]
    fn test_round_trip_after_mutation() {
        let mut atlas = sample_atlas();
        atlas.remove_image_by_index(0).unwrap();
        atlas.remove_fragment_by_name("stone").unwrap();

        let decoded = Atlas::decode(&atlas.encode().unwrap()).unwrap();
        assert_eq!(decoded, atlas);
        assert_eq!(decoded.get_fragment_by_position(0, 1).unwrap().name, "wätter");
    }

    #[test]
    fn test_float_bits_preserved() {
        let mut atlas = Atlas::new();
        atlas.add_image(Image::with_fragments(
            "odd",
            "",
            [Fragment::new("nan", f32::NAN, -0.0, f32::MIN_POSITIVE, f32::INFINITY)],
        ));
        let bytes = atlas.encode().unwrap();

        let decoded = Atlas::decode(&bytes).unwrap();
        assert_eq!(decoded.encode().unwrap(), bytes);
        let rect = decoded.get_fragment_by_position(0, 0).unwrap().rect();
        assert!(rect[0].is_nan());
        assert_eq!(rect[1].to_bits(), (-0.0f32).to_bits());
    }

    #[test]
    fn test_encode_to_writer() {
        let atlas = sample_atlas();
        let mut out = Vec::new();
        atlas.encode_to(&mut out).unwrap();
        assert_eq!(out, atlas.encode().unwrap());
    }

    #[test]
    fn test_fragment_count_overflow() {
        let image = Image::with_fragments(
            "big",
            "",
            (0..=u16::MAX as usize).map(|_| Fragment::new("", 0.0, 0.0, 0.0, 0.0)),
        );
        let mut atlas = Atlas::new();
        atlas.add_image(image);

        let mut out = Vec::new();
        let err = atlas.encode_to(&mut out).unwrap_err();
        assert!(matches!(err, Error::CountOverflow { kind: "fragment", count: 65536 }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_string_too_long() {
        let mut atlas = Atlas::new();
        atlas.add_image(Image::new("x".repeat(70_000), ""));

        assert!(matches!(
            atlas.encode(),
            Err(Error::StringTooLong { len: 70_000 })
        ));
    }

    #[test]
    fn test_modified_utf8_names_round_trip() {
        // Image name "\0" as written by writeUTF, empty alpha, no fragments.
        let data = [0x00, 0x01, 0x00, 0x02, 0xC0, 0x80, 0x00, 0x00, 0x00, 0x00];

        let atlas = Atlas::decode(&data).unwrap();
        let image = atlas.get_image_by_index(0).unwrap();
        assert_eq!(image.name.as_bytes(), &[0xC0, 0x80]);
        assert_eq!(atlas.encode().unwrap(), data);
    }

    #[test]
    fn test_non_utf8_lookup_and_round_trip() {
        let surrogate_pair: &[u8] = &[0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80];
        let mut atlas = Atlas::new();
        atlas.add_image(Image::with_fragments(
            surrogate_pair,
            vec![0xFFu8, 0xFE],
            [Fragment::new(&[b'f', 0xC0, 0x80][..], 0.5, 0.5, 0.5, 0.5)],
        ));

        let decoded = Atlas::decode(&atlas.encode().unwrap()).unwrap();
        assert_eq!(decoded, atlas);
        let image = decoded.get_image_by_name(surrogate_pair).unwrap();
        assert_eq!(image.alpha_ref.as_bytes(), &[0xFF, 0xFE]);
        assert!(decoded.get_fragment_by_name([b'f', 0xC0, 0x80]).is_ok());
        assert!(decoded.get_fragment_by_name("f\0").is_err());
    }
}
