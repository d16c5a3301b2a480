//! ImpossibleAtlas - image atlas reading, writing and XML export.
//!
//! This crate provides a unified interface to the ImpossibleAtlas crates.
//!
//! # Crates
//!
//! - [`imatlas_common`] - Big-endian binary reader and writer
//! - [`imatlas_format`] - Atlas model, binary codec and XML export
//!
//! # Example
//!
//! ```no_run
//! use imatlas::prelude::*;
//!
//! let atlas = Atlas::open("level.atlas")?;
//! for (image, fragment) in atlas.fragments() {
//!     println!("{}/{}: {:?}", image.name, fragment.name, fragment.rect());
//! }
//! atlas.save_xml("level.xml")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use imatlas_common as common;
pub use imatlas_format as format;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use imatlas_common::{BinaryReader, BinaryWriter};
    #[cfg(feature = "full")]
    pub use imatlas_format::XmlExporter;
    pub use imatlas_format::{
        Atlas, AtlasDecoder, AtlasEncoder, AtlasFormat, DecodeObserver, Fragment, Image,
        RawString, TracingObserver,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
