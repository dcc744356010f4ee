use crate::geom::Point;
use crate::writer::{fmt2, fmt_polyline};
use xml::writer::{EventWriter, XmlEvent};

/// A directed edge of the target network: one driving direction of a through
/// road, or a synthesized highway-merge zone. Lane index 0 is the outermost
/// (rightmost) lane.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub num_lanes: usize,
    /// Speed limit in m/s
    pub speed: f64,
    pub name: Option<String>,
    pub r#type: Option<String>,
    /// Centerline polyline; at least two points when present
    pub shape: Option<Vec<Point>>,
    pub lanes: Vec<EdgeLane>,
}

/// Per-lane attributes attached to an edge, serialized with the lane's
/// positional index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeLane {
    pub width: Option<f64>,
    pub r#type: Option<String>,
    pub allow: Option<String>,
    pub disallow: Option<String>,
}

impl Edge {
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> xml::writer::Result<()> {
        let num_lanes = self.num_lanes.to_string();
        let speed = fmt2(self.speed);
        let shape = self.shape.as_ref().map(|s| fmt_polyline(s));

        let mut element = XmlEvent::start_element("edge")
            .attr("id", &self.id)
            .attr("from", &self.from)
            .attr("to", &self.to)
            .attr("numLanes", &num_lanes)
            .attr("speed", &speed);
        if let Some(name) = &self.name {
            element = element.attr("name", name);
        }
        if let Some(kind) = &self.r#type {
            element = element.attr("type", kind);
        }
        if let Some(shape) = &shape {
            element = element.attr("shape", shape);
        }
        writer.write(element)?;

        for (index, lane) in self.lanes.iter().enumerate() {
            lane.write_to(index, writer)?;
        }
        writer.write(XmlEvent::end_element())
    }
}

impl EdgeLane {
    fn write_to<W: std::io::Write>(
        &self,
        index: usize,
        writer: &mut EventWriter<W>,
    ) -> xml::writer::Result<()> {
        let index = index.to_string();
        let width = self.width.map(fmt2);

        let mut element = XmlEvent::start_element("lane").attr("index", &index);
        if let Some(width) = &width {
            element = element.attr("width", width);
        }
        if let Some(kind) = &self.r#type {
            element = element.attr("type", kind);
        }
        if let Some(allow) = &self.allow {
            element = element.attr("allow", allow);
        }
        if let Some(disallow) = &self.disallow {
            element = element.attr("disallow", disallow);
        }
        writer.write(element)?;
        writer.write(XmlEvent::end_element())
    }
}
