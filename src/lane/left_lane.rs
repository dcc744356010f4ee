use crate::lane::Lane;

/// A lane left of the reference line; ids are positive and grow outward from
/// the centerline.
#[derive(Debug, Clone, PartialEq)]
pub struct LeftLane {
    /// ID of the lane
    pub id: i64,
    pub base: Lane,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for LeftLane
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: read.attribute("id")?,
            base: Lane::try_from(read)?,
        })
    }
}
