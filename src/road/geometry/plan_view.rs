use crate::road::geometry::Geometry;
use vec1::Vec1;

/// Contains geometry elements that define the layout of the road reference
/// line in the x/y-plane (plan view). Segment order follows source order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanView {
    pub geometry: Vec1<Geometry>,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for PlanView
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut geometry = Vec::new();

        read_children!(
            read,
            "geometry" required => Geometry => |v| geometry.push(v),
        );

        Ok(Self {
            geometry: Vec1::try_from_vec(geometry).unwrap(),
        })
    }
}
