use crate::junction::connection::Connection;
use vec1::Vec1;

pub mod connection;
pub mod contact_point;
pub mod lane_link;

/// A `<junction>` element: the set of connections joining incoming roads to
/// outgoing roads through connecting roads.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub connection: Vec1<Connection>,
    /// Unique ID within database
    pub id: String,
    /// Name of the junction. May be chosen freely.
    pub name: Option<String>,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Junction
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut connection = Vec::new();

        read_children!(
            read,
            "connection" required => Connection => |v| connection.push(v),
        );

        Ok(Self {
            connection: Vec1::try_from_vec(connection).unwrap(),
            id: read.attribute("id")?,
            name: read.attribute_opt("name")?,
        })
    }
}
