use crate::lane::left::Left;
use crate::lane::right::Right;

/// One cross-section of the road. Left lanes carry positive ids counted
/// outward from the centerline, right lanes negative ids; the center lane
/// (id 0) is not modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSection {
    /// s-coordinate of start position
    pub s: f64,
    pub left: Option<Left>,
    pub right: Option<Right>,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for LaneSection
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut left = None;
        let mut right = None;

        read_children!(
            read,
            "left" => Left => |v| left = Some(v),
            "right" => Right => |v| right = Some(v),
        );

        Ok(Self {
            s: read.attribute_opt("s")?.unwrap_or(0.0),
            left,
            right,
        })
    }
}
