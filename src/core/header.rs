/// The `<header>` element is the very first element within the `<OpenDRIVE>`
/// element. The compiler keeps the revision attributes and the geodetic
/// reference; the projection string is the text (usually CDATA) content of
/// the `<geoReference>` child and decides whether the emitted network gets a
/// coordinate offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub rev_major: u16,
    pub rev_minor: u16,
    pub name: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
    pub geo_reference: Option<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            rev_major: 1,
            rev_minor: 7,
            name: None,
            version: None,
            date: None,
            geo_reference: None,
        }
    }
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Header
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut geo_reference = None;

        read.each_child(|name, child| {
            if name.eq_ignore_ascii_case("geoReference") {
                let text = child.text()?;
                if !text.is_empty() {
                    geo_reference = Some(text);
                }
            } else {
                let _ = child;
            }
            Ok(())
        })?;

        Ok(Self {
            rev_major: read.attribute_opt("revMajor")?.unwrap_or(1),
            rev_minor: read.attribute_opt("revMinor")?.unwrap_or(7),
            name: read.attribute_opt("name")?,
            version: read.attribute_opt("version")?,
            date: read.attribute_opt("date")?,
            geo_reference,
        })
    }
}
