//! XML export for image atlases.
//!
//! The document layout is fixed and mirrors the field names the level editor
//! uses internally:
//!
//! ```text
//! <ImageAtlas>
//!     <ImagesArr>
//!         <Image name_imageType_0=".." alpha="..">
//!             <FragmentArr>
//!                 <Fragment name_utf_0=".." x_short_1=".." y_short_2=".." w_short_3=".." h_short_4=".." />
//! ```
//!
//! Names are stored as raw bytes; they are rendered as UTF-8 with invalid
//! sequences replaced by U+FFFD.

use std::borrow::Cow;
use std::io::Write;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use crate::{Atlas, Error, Fragment, Image, RawString, Result};

/// XML exporter for an atlas.
///
/// Attribute values are escaped by default. The editor's own exporter wrote
/// them verbatim; [`XmlExporter::escape_attributes`] restores that form for
/// consumers that depend on it, at the cost of malformed output when a name
/// contains `"`, `<` or `&`.
///
/// Coordinates are widened to `f64` and printed exactly, so a value that is
/// not a short binary fraction prints long: `0.1f32` is written as
/// `0.10000000149011612`, its true stored value.
#[derive(Debug, Clone, Copy)]
pub struct XmlExporter<'a> {
    atlas: &'a Atlas,
    escape: bool,
}

impl<'a> XmlExporter<'a> {
    /// Create a new XML exporter.
    pub fn new(atlas: &'a Atlas) -> Self {
        Self {
            atlas,
            escape: true,
        }
    }

    /// Choose whether reserved characters in attribute values are escaped.
    pub fn escape_attributes(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Export to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write XML to a writer.
    pub fn write_xml<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', 4);

        write(
            &mut xml_writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        write(&mut xml_writer, Event::Start(BytesStart::new("ImageAtlas")))?;
        write(&mut xml_writer, Event::Start(BytesStart::new("ImagesArr")))?;

        for image in self.atlas.images() {
            self.write_image(&mut xml_writer, image)?;
        }

        write(&mut xml_writer, Event::End(BytesEnd::new("ImagesArr")))?;
        write(&mut xml_writer, Event::End(BytesEnd::new("ImageAtlas")))?;
        xml_writer.get_mut().write_all(b"\n")?;

        Ok(())
    }

    fn write_image<W: Write>(&self, writer: &mut Writer<W>, image: &Image) -> Result<()> {
        let mut elem = BytesStart::new("Image");
        self.push_attribute(&mut elem, "name_imageType_0", &image.name);
        self.push_attribute(&mut elem, "alpha", &image.alpha_ref);

        write(writer, Event::Start(elem))?;
        write(writer, Event::Start(BytesStart::new("FragmentArr")))?;

        for fragment in image.fragments() {
            self.write_fragment(writer, fragment)?;
        }

        write(writer, Event::End(BytesEnd::new("FragmentArr")))?;
        write(writer, Event::End(BytesEnd::new("Image")))
    }

    fn write_fragment<W: Write>(&self, writer: &mut Writer<W>, fragment: &Fragment) -> Result<()> {
        let mut elem = BytesStart::new("Fragment");
        self.push_attribute(&mut elem, "name_utf_0", &fragment.name);

        let keys = ["x_short_1", "y_short_2", "w_short_3", "h_short_4"];
        for (key, value) in keys.into_iter().zip(fragment.rect()) {
            elem.push_attribute((key, format_float(value).as_str()));
        }

        // Event::Empty closes with "/>"; fragments close with " />".
        writer.write_indent()?;
        let out = writer.get_mut();
        out.write_all(b"<")?;
        out.write_all(&elem)?;
        out.write_all(b" />")?;
        Ok(())
    }

    fn push_attribute(&self, elem: &mut BytesStart<'_>, key: &str, value: &RawString) {
        let text = value.to_str_lossy();
        if self.escape {
            elem.push_attribute((key, text.as_ref()));
        } else {
            elem.push_attribute(Attribute {
                key: QName(key.as_bytes()),
                value: Cow::Owned(text.into_owned().into_bytes()),
            });
        }
    }
}

fn write<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(e.to_string()))
}

/// Render a stored float exactly.
///
/// Widening to `f64` is lossless, and the shortest `f64` representation of a
/// value that came from an `f32` spells out its exact binary value, so
/// `0.892578125` is written as such rather than as the shortest `f32` form
/// `0.8925781`.
fn format_float(value: f32) -> String {
    f64::from(value).to_string()
}

impl Atlas {
    /// Export the atlas as an XML document with escaped attribute values.
    pub fn to_xml(&self) -> Result<String> {
        XmlExporter::new(self).to_xml_string()
    }
}
