use crate::lane::right_lane::RightLane;
use vec1::Vec1;

/// The lanes right of the reference line, listed from left to right, that
/// is, with descending ID.
#[derive(Debug, Clone, PartialEq)]
pub struct Right {
    pub lane: Vec1<RightLane>,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Right
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut lane = Vec::new();

        read_children!(
            read,
            "lane" required => RightLane => |v| lane.push(v),
        );

        Ok(Self {
            lane: Vec1::try_from_vec(lane).unwrap(),
        })
    }
}
