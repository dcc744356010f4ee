use uom::si::curvature::radian_per_meter;
use uom::si::f64::Curvature;

/// A constant-curvature segment. Positive curvature turns left, negative
/// turns right; the radius is the reciprocal of the magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Constant curvature throughout the element
    pub curvature: Curvature,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Arc
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            curvature: read
                .attribute("curvature")
                .map(Curvature::new::<radian_per_meter>)?,
        })
    }
}
