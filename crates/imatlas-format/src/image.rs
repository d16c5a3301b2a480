//! Atlas image record.

use crate::{Error, Fragment, RawString, Result};

/// A named sprite sheet entry owning an ordered list of fragments.
///
/// The fragment list is private so that every fragment's position always
/// matches its index and the fragment count always matches the list length.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Image identifier. The editor embeds a type suffix in it; it is kept as opaque bytes.
    pub name: RawString,
    /// Name of the associated alpha/mask resource.
    pub alpha_ref: RawString,
    fragments: Vec<Fragment>,
    position: usize,
}

impl Image {
    /// Create an image with no fragments.
    pub fn new(name: impl Into<RawString>, alpha_ref: impl Into<RawString>) -> Self {
        Self {
            name: name.into(),
            alpha_ref: alpha_ref.into(),
            fragments: Vec::new(),
            position: 0,
        }
    }

    /// Create an image from a list of fragments, numbering them in order.
    pub fn with_fragments(
        name: impl Into<RawString>,
        alpha_ref: impl Into<RawString>,
        fragments: impl IntoIterator<Item = Fragment>,
    ) -> Self {
        let mut image = Self::new(name, alpha_ref);
        image.fragments = fragments.into_iter().collect();
        image.renumber();
        image
    }

    /// Index of this image within its atlas.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The fragments in stored order.
    #[inline]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Number of fragments in this image.
    #[inline]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Append a fragment and return its position.
    pub fn push_fragment(&mut self, mut fragment: Fragment) -> usize {
        let position = self.fragments.len();
        fragment.set_position(position);
        self.fragments.push(fragment);
        position
    }

    /// Get a fragment by position.
    pub fn get_fragment(&self, index: usize) -> Result<&Fragment> {
        self.fragments.get(index).ok_or(Error::IndexOutOfRange {
            kind: "fragment",
            index,
            len: self.fragments.len(),
        })
    }

    /// Get the first fragment with the given name.
    pub fn get_fragment_by_name(&self, name: impl AsRef<[u8]>) -> Result<&Fragment> {
        let name = name.as_ref();
        self.fragments
            .iter()
            .find(|f| f.name.as_bytes() == name)
            .ok_or_else(|| Error::not_found("fragment", name))
    }

    /// Remove the fragment at `index`, renumbering the ones after it.
    pub fn remove_fragment(&mut self, index: usize) -> Result<Fragment> {
        if index >= self.fragments.len() {
            return Err(Error::IndexOutOfRange {
                kind: "fragment",
                index,
                len: self.fragments.len(),
            });
        }
        let removed = self.fragments.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Remove every fragment with the given name and return them in order.
    ///
    /// Returns an empty list when nothing matches.
    pub fn remove_fragments_named(&mut self, name: impl AsRef<[u8]>) -> Vec<Fragment> {
        let name = name.as_ref();
        if !self.fragments.iter().any(|f| f.name.as_bytes() == name) {
            return Vec::new();
        }
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.fragments)
            .into_iter()
            .partition(|f| f.name.as_bytes() == name);
        self.fragments = kept;
        self.renumber();
        removed
    }

    #[inline]
    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub(crate) fn renumber(&mut self) {
        for (i, fragment) in self.fragments.iter_mut().enumerate() {
            fragment.set_position(i);
        }
    }
}
