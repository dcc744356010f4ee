use crate::junction::contact_point::ContactPoint;
use crate::junction::lane_link::LaneLink;

/// Provides information about a single connection within a junction: which
/// incoming road reaches which connecting road, at which of the connecting
/// road's ends, and how the lanes pair up.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub lane_link: Vec<LaneLink>,
    /// ID of the connecting road
    pub connecting_road: Option<String>,
    /// Contact point on the connecting road
    pub contact_point: Option<ContactPoint>,
    /// Unique ID within the junction
    pub id: String,
    /// ID of the incoming road
    pub incoming_road: Option<String>,
}

impl Connection {
    /// The contact point, defaulting to `start` as the source convention.
    pub fn contact(&self) -> ContactPoint {
        self.contact_point.unwrap_or(ContactPoint::Start)
    }
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Connection
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut lane_link = Vec::new();

        read_children!(
            read,
            "laneLink" => LaneLink => |v| lane_link.push(v),
        );

        Ok(Self {
            lane_link,
            connecting_road: read.attribute_opt("connectingRoad")?,
            contact_point: read.attribute_opt("contactPoint")?,
            id: read.attribute("id")?,
            incoming_road: read.attribute_opt("incomingRoad")?,
        })
    }
}
