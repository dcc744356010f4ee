use crate::lane::left_lane::LeftLane;
use vec1::Vec1;

/// The lanes left of the reference line, listed from left to right, that is,
/// with descending ID.
#[derive(Debug, Clone, PartialEq)]
pub struct Left {
    pub lane: Vec1<LeftLane>,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Left
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut lane = Vec::new();

        read_children!(
            read,
            "lane" required => LeftLane => |v| lane.push(v),
        );

        Ok(Self {
            lane: Vec1::try_from_vec(lane).unwrap(),
        })
    }
}
