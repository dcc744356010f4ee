use crate::lane::lane_section::LaneSection;
use vec1::Vec1;

/// Contains the lane sections of a road. The compiler only evaluates section
/// 0; later sections are parsed and carried but not consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Lanes {
    pub lane_section: Vec1<LaneSection>,
}

impl Lanes {
    /// The first lane section, the only one the compiler consumes.
    pub fn section_zero(&self) -> &LaneSection {
        self.lane_section.first()
    }
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Lanes
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut lane_section = Vec::new();

        read_children!(
            read,
            "laneSection" required => LaneSection => |v| lane_section.push(v),
        );

        Ok(Self {
            lane_section: Vec1::try_from_vec(lane_section).unwrap(),
        })
    }
}
