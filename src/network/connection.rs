use crate::geom::Point;
use crate::writer::fmt_polyline;
use xml::writer::{EventWriter, XmlEvent};

/// A lane-exact link between two edges. The optional via polyline preserves
/// the curved turning path the connecting road described through the
/// junction.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from_edge: String,
    pub to_edge: String,
    pub from_lane: usize,
    pub to_lane: usize,
    pub via: Option<Vec<Point>>,
}

impl Connection {
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> xml::writer::Result<()> {
        let from_lane = self.from_lane.to_string();
        let to_lane = self.to_lane.to_string();
        let via = self.via.as_ref().map(|v| fmt_polyline(v));

        let mut element = XmlEvent::start_element("connection")
            .attr("from", &self.from_edge)
            .attr("to", &self.to_edge)
            .attr("fromLane", &from_lane)
            .attr("toLane", &to_lane);
        if let Some(via) = &via {
            element = element.attr("via", via);
        }
        writer.write(element)?;
        writer.write(XmlEvent::end_element())
    }
}
