#[derive(Debug, Clone, PartialEq)]
pub struct PredecessorSuccessor {
    /// ID of the preceding / succeeding linked lane
    pub id: i64,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for PredecessorSuccessor
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: read.attribute("id")?,
        })
    }
}
