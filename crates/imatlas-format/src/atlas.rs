//! The atlas root aggregate and its mutation operations.

use crate::{Error, Fragment, Image, Result};

/// An image atlas: an ordered list of images plus aggregate counters.
///
/// The atlas never hands out mutable access to its images, so every
/// structural change goes through a method that keeps positions and the
/// fragment total in step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atlas {
    images: Vec<Image>,
    fragment_count: usize,
}

impl Atlas {
    /// Create a blank atlas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an atlas from decoded images, numbering them and totalling fragments.
    pub(crate) fn from_images(mut images: Vec<Image>) -> Self {
        for (i, image) in images.iter_mut().enumerate() {
            image.set_position(i);
            image.renumber();
        }
        let fragment_count = images.iter().map(Image::fragment_count).sum();
        Self {
            images,
            fragment_count,
        }
    }

    /// Number of images.
    #[inline]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Total number of fragments across all images.
    #[inline]
    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    /// Check if the atlas has no images.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The images in stored order.
    #[inline]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Iterate every fragment with its parent image, in image-then-fragment order.
    pub fn fragments(&self) -> impl Iterator<Item = (&Image, &Fragment)> {
        self.images
            .iter()
            .flat_map(|image| image.fragments().iter().map(move |f| (image, f)))
    }

    /// Append an image and return its position.
    pub fn add_image(&mut self, mut image: Image) -> usize {
        let position = self.images.len();
        image.set_position(position);
        image.renumber();
        self.fragment_count += image.fragment_count();
        self.images.push(image);
        position
    }

    /// Append a fragment to the image at `image_index` and return its position.
    pub fn add_fragment(&mut self, image_index: usize, fragment: Fragment) -> Result<usize> {
        let len = self.images.len();
        let image = self.images.get_mut(image_index).ok_or(Error::IndexOutOfRange {
            kind: "image",
            index: image_index,
            len,
        })?;
        let position = image.push_fragment(fragment);
        self.fragment_count += 1;
        Ok(position)
    }

    /// Get an image by position.
    pub fn get_image_by_index(&self, index: usize) -> Result<&Image> {
        self.images.get(index).ok_or(Error::IndexOutOfRange {
            kind: "image",
            index,
            len: self.images.len(),
        })
    }

    /// Get the first image with the given name.
    pub fn get_image_by_name(&self, name: impl AsRef<[u8]>) -> Result<&Image> {
        let name = name.as_ref();
        self.images
            .iter()
            .find(|image| image.name.as_bytes() == name)
            .ok_or_else(|| Error::not_found("image", name))
    }

    /// Get a fragment by image position and fragment position.
    pub fn get_fragment_by_position(
        &self,
        image_index: usize,
        fragment_index: usize,
    ) -> Result<&Fragment> {
        self.get_image_by_index(image_index)?
            .get_fragment(fragment_index)
    }

    /// Get the first fragment with the given name, searching images in order.
    pub fn get_fragment_by_name(&self, name: impl AsRef<[u8]>) -> Result<&Fragment> {
        let name = name.as_ref();
        self.fragments()
            .map(|(_, fragment)| fragment)
            .find(|fragment| fragment.name.as_bytes() == name)
            .ok_or_else(|| Error::not_found("fragment", name))
    }

    /// Remove every image with the given name, keeping the survivors in order.
    ///
    /// Returns the removed images, or [`Error::NotFound`] if none matched.
    pub fn remove_image_by_name(&mut self, name: impl AsRef<[u8]>) -> Result<Vec<Image>> {
        let name = name.as_ref();
        if !self.images.iter().any(|image| image.name.as_bytes() == name) {
            return Err(Error::not_found("image", name));
        }

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.images)
            .into_iter()
            .partition(|image| image.name.as_bytes() == name);

        self.images = kept;
        self.fragment_count -= removed.iter().map(Image::fragment_count).sum::<usize>();
        self.renumber();
        Ok(removed)
    }

    /// Remove the image at `index`, renumbering the ones after it.
    pub fn remove_image_by_index(&mut self, index: usize) -> Result<Image> {
        if index >= self.images.len() {
            return Err(Error::IndexOutOfRange {
                kind: "image",
                index,
                len: self.images.len(),
            });
        }
        let removed = self.images.remove(index);
        self.fragment_count -= removed.fragment_count();
        self.renumber();
        Ok(removed)
    }

    /// Remove every fragment with the given name from every image.
    ///
    /// Returns the removed fragments in image-then-fragment order, or
    /// [`Error::NotFound`] if none matched.
    pub fn remove_fragment_by_name(&mut self, name: impl AsRef<[u8]>) -> Result<Vec<Fragment>> {
        let name = name.as_ref();
        let removed: Vec<Fragment> = self
            .images
            .iter_mut()
            .flat_map(|image| image.remove_fragments_named(name))
            .collect();

        if removed.is_empty() {
            return Err(Error::not_found("fragment", name));
        }
        self.fragment_count -= removed.len();
        Ok(removed)
    }

    /// Remove one fragment by image position and fragment position.
    pub fn remove_fragment_by_position(
        &mut self,
        image_index: usize,
        fragment_index: usize,
    ) -> Result<Fragment> {
        let len = self.images.len();
        let image = self.images.get_mut(image_index).ok_or(Error::IndexOutOfRange {
            kind: "image",
            index: image_index,
            len,
        })?;
        let removed = image.remove_fragment(fragment_index)?;
        self.fragment_count -= 1;
        Ok(removed)
    }

    fn renumber(&mut self) {
        for (i, image) in self.images.iter_mut().enumerate() {
            image.set_position(i);
        }
    }
}
