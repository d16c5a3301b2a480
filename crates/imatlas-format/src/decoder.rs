//! Binary atlas decoder.
//!
//! The decoder walks the flat big-endian stream and materializes the
//! image/fragment tree. Progress is reported to a [`DecodeObserver`] rather
//! than printed, so callers choose whether and how decoding is logged.

use imatlas_common::BinaryReader;

use crate::{Atlas, Fragment, Image, Result};

/// Smallest encoded image: name length, fragment count, alpha length.
const MIN_IMAGE_SIZE: usize = 6;

/// Smallest encoded fragment: name length and four floats.
const MIN_FRAGMENT_SIZE: usize = 18;

/// Receives decoding progress.
///
/// Every method has an empty default, so implementors only override what
/// they care about. Callbacks fire in stream order.
pub trait DecodeObserver {
    /// The header was read.
    fn on_header(&mut self, _image_count: u16) {}

    /// A fragment of the image at `image_index` was read.
    fn on_fragment(&mut self, _image_index: usize, _fragment: &Fragment) {}

    /// An image and all of its fragments were read.
    fn on_image(&mut self, _index: usize, _image: &Image) {}

    /// The atlas was fully decoded. `trailing` is the number of unread bytes
    /// left after the last record.
    fn on_complete(&mut self, _atlas: &Atlas, _trailing: usize) {}
}

impl<O: DecodeObserver + ?Sized> DecodeObserver for &mut O {
    fn on_header(&mut self, image_count: u16) {
        (**self).on_header(image_count)
    }

    fn on_fragment(&mut self, image_index: usize, fragment: &Fragment) {
        (**self).on_fragment(image_index, fragment)
    }

    fn on_image(&mut self, index: usize, image: &Image) {
        (**self).on_image(index, image)
    }

    fn on_complete(&mut self, atlas: &Atlas, trailing: usize) {
        (**self).on_complete(atlas, trailing)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DecodeObserver for NoopObserver {}

/// Observer that forwards progress to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DecodeObserver for TracingObserver {
    fn on_header(&mut self, image_count: u16) {
        tracing::debug!(image_count, "reading atlas header");
    }

    fn on_fragment(&mut self, image_index: usize, fragment: &Fragment) {
        tracing::trace!(
            image_index,
            position = fragment.position(),
            name = %fragment.name,
            x = fragment.x,
            y = fragment.y,
            w = fragment.w,
            h = fragment.h,
            "loaded fragment"
        );
    }

    fn on_image(&mut self, index: usize, image: &Image) {
        tracing::debug!(
            index,
            name = %image.name,
            alpha = %image.alpha_ref,
            fragments = image.fragment_count(),
            "loaded image"
        );
    }

    fn on_complete(&mut self, atlas: &Atlas, trailing: usize) {
        if trailing > 0 {
            tracing::warn!(trailing, "ignoring trailing bytes after last image");
        }
        tracing::debug!(
            images = atlas.image_count(),
            fragments = atlas.fragment_count(),
            "loaded entire atlas"
        );
    }
}

/// Decoder for the binary atlas format.
///
/// # Example
///
/// ```
/// use imatlas_format::AtlasDecoder;
///
/// let atlas = AtlasDecoder::new().decode(&[0x00, 0x00]).unwrap();
/// assert!(atlas.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct AtlasDecoder<O = NoopObserver> {
    observer: O,
}

impl AtlasDecoder<NoopObserver> {
    /// Create a decoder that reports nothing.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: DecodeObserver> AtlasDecoder<O> {
    /// Create a decoder that reports progress to `observer`.
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Get the observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Consume the decoder and return the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Decode an atlas from bytes.
    ///
    /// An empty buffer yields a blank atlas. Running out of data anywhere in
    /// the walk fails with [`crate::Error::Truncated`] and nothing is returned.
    /// The counts on the wire only bound the loops; the atlas's own counters
    /// are recomputed from what was actually read.
    pub fn decode(&mut self, data: &[u8]) -> Result<Atlas> {
        if data.is_empty() {
            let atlas = Atlas::new();
            self.observer.on_complete(&atlas, 0);
            return Ok(atlas);
        }

        let mut reader = BinaryReader::new(data);
        let image_count = reader.read_u16_be()?;
        self.observer.on_header(image_count);

        let capacity = (image_count as usize).min(reader.remaining() / MIN_IMAGE_SIZE);
        let mut images = Vec::with_capacity(capacity);
        for index in 0..image_count as usize {
            let image = self.read_image(&mut reader, index)?;
            self.observer.on_image(index, &image);
            images.push(image);
        }

        let atlas = Atlas::from_images(images);
        self.observer.on_complete(&atlas, reader.remaining());
        Ok(atlas)
    }

    fn read_image(&mut self, reader: &mut BinaryReader<'_>, index: usize) -> Result<Image> {
        let name = reader.read_prefixed_bytes()?;
        let fragment_count = reader.read_u16_be()?;
        let alpha_ref = reader.read_prefixed_bytes()?;

        let mut image = Image::new(name, alpha_ref);
        image.set_position(index);

        for _ in 0..fragment_count {
            let fragment = read_fragment(reader)?;
            let position = image.push_fragment(fragment);
            self.observer.on_fragment(index, &image.fragments()[position]);
        }

        Ok(image)
    }
}

fn read_fragment(reader: &mut BinaryReader<'_>) -> Result<Fragment> {
    // Fail before allocating the name if the fixed part cannot fit.
    reader.peek_bytes(MIN_FRAGMENT_SIZE)?;

    let name = reader.read_prefixed_bytes()?;
    let x = reader.read_f32_be()?;
    let y = reader.read_f32_be()?;
    let w = reader.read_f32_be()?;
    let h = reader.read_f32_be()?;
    Ok(Fragment::new(name, x, y, w, h))
}

impl Atlas {
    /// Decode an atlas from the binary format, logging progress through `tracing`.
    ///
    /// This does not sniff for XML; use [`Atlas::load`] for untrusted input.
    pub fn decode(data: &[u8]) -> Result<Self> {
        AtlasDecoder::with_observer(TracingObserver).decode(data)
    }
}
