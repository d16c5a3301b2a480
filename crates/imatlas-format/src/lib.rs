//! ImpossibleAtlas image atlas codec.
//!
//! Sprite sheets for the game are described by a binary "image atlas" file
//! written by the Java level editor. An atlas is a list of images, each with
//! an alpha resource and a list of named, normalized fragments.
//!
//! # File Format
//!
//! All multi-byte fields are big-endian. Strings are a `u16` byte length
//! followed by that many bytes, kept verbatim as [`RawString`].
//!
//! ```text
//! u16        image count
//! per image:
//!   string   name
//!   u16      fragment count
//!   string   alpha resource
//!   per fragment:
//!     string name
//!     f32    x, y, w, h
//! ```
//!
//! Files starting with `<?xm` are XML exports, which cannot be read back.
//!
//! # Example
//!
//! ```no_run
//! use imatlas_format::{Atlas, Fragment, Image};
//!
//! let mut atlas = Atlas::open("level.atlas")?;
//! println!("{} images, {} fragments", atlas.image_count(), atlas.fragment_count());
//!
//! let mut image = Image::new("Bg", "BgAlpha");
//! image.push_fragment(Fragment::new("CstBgtest", 0.892578125, 0.45703125, 0.078125, 0.533203125));
//! atlas.add_image(image);
//!
//! atlas.save_bin("level.atlas")?;
//! atlas.save_xml("level.xml")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod atlas;
mod decoder;
mod encoder;
mod error;
mod format;
mod fragment;
mod image;
mod raw_string;
#[cfg(feature = "xml-output")]
mod xml;

pub use atlas::Atlas;
pub use decoder::{AtlasDecoder, DecodeObserver, NoopObserver, TracingObserver};
pub use encoder::AtlasEncoder;
pub use error::{Error, Result};
pub use format::{AtlasFormat, XML_SIGNATURE};
pub use fragment::Fragment;
pub use image::Image;
pub use raw_string::RawString;
#[cfg(feature = "xml-output")]
pub use xml::XmlExporter;
