/// A straight segment of the reference line. Carries no extra data; the
/// common `<geometry>` header fully determines it.
#[derive(Debug, Clone, PartialEq)]
pub struct Line;

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Line
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
