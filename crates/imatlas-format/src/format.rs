//! Format detection and file access.

use std::fs;
use std::path::Path;

use crate::{Atlas, Error, Result};

/// Prefix identifying an XML atlas.
pub const XML_SIGNATURE: &[u8; 4] = b"<?xm";

/// The kind of data handed to [`Atlas::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtlasFormat {
    /// No data; loads as a blank atlas.
    Empty,
    /// An XML document.
    Xml,
    /// The binary atlas format.
    Binary,
}

impl AtlasFormat {
    /// Detect the format of `data` from its first bytes.
    pub fn detect(data: &[u8]) -> Self {
        if data.is_empty() {
            Self::Empty
        } else if data.starts_with(XML_SIGNATURE) {
            Self::Xml
        } else {
            Self::Binary
        }
    }
}

impl Atlas {
    /// Load an atlas from bytes of either format.
    ///
    /// XML input always fails with [`Error::UnsupportedFormat`].
    pub fn load(data: &[u8]) -> Result<Self> {
        match AtlasFormat::detect(data) {
            AtlasFormat::Empty => Ok(Self::new()),
            AtlasFormat::Xml => {
                let xml = std::str::from_utf8(data).map_err(|_| Error::UnsupportedFormat)?;
                Self::from_xml(xml)
            }
            AtlasFormat::Binary => Self::decode(data),
        }
    }

    /// Import an atlas from XML.
    ///
    /// The editor never implemented this direction, so it is always an error.
    pub fn from_xml(_xml: &str) -> Result<Self> {
        Err(Error::UnsupportedFormat)
    }

    /// Read an atlas file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading atlas");
        let data = fs::read(path)?;
        Self::load(&data)
    }

    /// Write the atlas to disk in the binary format.
    ///
    /// The file is only created once the whole atlas has encoded.
    pub fn save_bin<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.encode()?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Write the atlas to disk as XML.
    #[cfg(feature = "xml-output")]
    pub fn save_xml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let xml = self.to_xml()?;
        fs::write(path, xml)?;
        Ok(())
    }
}
