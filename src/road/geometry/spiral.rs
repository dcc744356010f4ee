use uom::si::curvature::radian_per_meter;
use uom::si::f64::Curvature;

/// A clothoid segment whose curvature varies linearly in arc length from
/// `curvature_start` to `curvature_end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spiral {
    /// Curvature at the start of the element
    pub curvature_start: Curvature,
    /// Curvature at the end of the element
    pub curvature_end: Curvature,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Spiral
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            curvature_start: read
                .attribute("curvStart")
                .map(Curvature::new::<radian_per_meter>)?,
            curvature_end: read
                .attribute("curvEnd")
                .map(Curvature::new::<radian_per_meter>)?,
        })
    }
}
