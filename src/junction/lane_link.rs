/// Pairs an incoming-road lane with the connecting-road lane it enters.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneLink {
    /// ID of the incoming lane
    pub from: i64,
    /// ID of the connection lane
    pub to: i64,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for LaneLink
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            from: read.attribute("from")?,
            to: read.attribute("to")?,
        })
    }
}
