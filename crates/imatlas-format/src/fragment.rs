//! Atlas fragment record.

use crate::RawString;

/// A named rectangular region of an image.
///
/// Coordinates are normalized to the parent image, so they are usually in
/// `0.0..=1.0`. On disk the fields are four big-endian `f32` values in
/// `x, y, w, h` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Identifier, unique within the parent image by convention only.
    pub name: RawString,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
    position: usize,
}

impl Fragment {
    /// Create a new fragment. Its position is assigned when it is added to an image.
    pub fn new(name: impl Into<RawString>, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            w,
            h,
            position: 0,
        }
    }

    /// Index of this fragment within its parent image.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The region as `[x, y, w, h]`.
    #[inline]
    pub fn rect(&self) -> [f32; 4] {
        [self.x, self.y, self.w, self.h]
    }

    #[inline]
    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}
