use crate::road::speed::Speed;
use uom::si::f64::Length;
use uom::si::length::meter;

/// A `<type>` entry along the road. Only the type string and the default
/// speed limit are consumed; the type is kept as declared rather than being
/// mapped onto an enum, because it flows straight through to the emitted
/// edge's `type` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    /// s-coordinate of start position
    pub s: Length,
    /// Type of the road defined for the current s-range
    pub r#type: String,
    pub speed: Option<Speed>,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Type
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut speed = None;

        read_children!(
            read,
            "speed" => Speed => |v| speed = Some(v),
        );

        Ok(Self {
            s: read
                .attribute_opt("s")?
                .map(Length::new::<meter>)
                .unwrap_or_else(|| Length::new::<meter>(0.0)),
            r#type: read.attribute("type")?,
            speed,
        })
    }
}
