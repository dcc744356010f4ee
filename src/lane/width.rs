use uom::si::f64::Length;
use uom::si::length::meter;

/// A width polynomial along the lane's t-coordinate. Several entries with
/// increasing `sOffset` may exist; the compiler takes the first one with a
/// usable constant coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct Width {
    /// Polynom parameter a, width at @s (ds=0)
    pub a: f64,
    /// Polynom parameter b
    pub b: f64,
    /// Polynom parameter c
    pub c: f64,
    /// Polynom parameter d
    pub d: f64,
    /// s-coordinate of start position relative to the preceding
    /// `<laneSection>` element
    pub s_offset: Length,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Width
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            a: read.attribute("a")?,
            b: read.attribute_opt("b")?.unwrap_or(0.0),
            c: read.attribute_opt("c")?.unwrap_or(0.0),
            d: read.attribute_opt("d")?.unwrap_or(0.0),
            s_offset: read
                .attribute_opt("sOffset")?
                .map(Length::new::<meter>)
                .unwrap_or_else(|| Length::new::<meter>(0.0)),
        })
    }
}
