use crate::geom::Point;
use crate::writer::fmt2;
use xml::writer::{EventWriter, XmlEvent};

/// A node of the target network, placed at a junction centroid, a free road
/// endpoint, or one of the two ends of a highway-merge zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub point: Point,
    pub node_type: NodeType,
}

/// Node control discipline, decided by the junction complexity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Priority,
    TrafficLight,
}

string_enum!(NodeType {
    Priority => "priority",
    TrafficLight => "traffic_light",
});

impl Node {
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> xml::writer::Result<()> {
        writer.write(
            XmlEvent::start_element("node")
                .attr("id", &self.id)
                .attr("x", &fmt2(self.point.x))
                .attr("y", &fmt2(self.point.y))
                .attr("type", self.node_type.as_str()),
        )?;
        writer.write(XmlEvent::end_element())
    }
}
