use crate::geom::Point;

pub mod connection;
pub mod edge;
pub mod location;
pub mod node;
pub mod writer;

pub use connection::Connection;
pub use edge::{Edge, EdgeLane};
pub use location::Location;
pub use node::{Node, NodeType};

/// The compiled intermediate network: the three element sequences the plain
/// XML artifacts serialize, plus the optional coordinate-offset preamble.
/// Sequences keep their construction order so repeated runs serialize
/// byte-identically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Network {
    pub location: Option<Location>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub connections: Vec<Connection>,
}

impl Network {
    pub fn edge_by_id(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The bounding box over every emitted coordinate: nodes, edge shapes,
    /// and connection via points. `None` for an empty network.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut any = false;

        let mut take = |p: &Point| {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            any = true;
        };

        for node in &self.nodes {
            take(&node.point);
        }
        for edge in &self.edges {
            if let Some(shape) = &edge.shape {
                shape.iter().for_each(&mut take);
            }
        }
        for connection in &self.connections {
            if let Some(via) = &connection.via {
                via.iter().for_each(&mut take);
            }
        }

        any.then_some((min, max))
    }

    /// Shifts every emitted coordinate by `(dx, dy)` in a single pass over
    /// each container.
    pub fn apply_offset(&mut self, dx: f64, dy: f64) {
        let shift = |p: &mut Point| {
            p.x += dx;
            p.y += dy;
        };

        for node in &mut self.nodes {
            shift(&mut node.point);
        }
        for edge in &mut self.edges {
            if let Some(shape) = &mut edge.shape {
                shape.iter_mut().for_each(shift);
            }
        }
        for connection in &mut self.connections {
            if let Some(via) = &mut connection.via {
                via.iter_mut().for_each(shift);
            }
        }
    }

    /// Anchors the network's bounding box at (0,0) and records the applied
    /// translation together with `proj_parameter` in the location preamble.
    /// A no-op for an empty network.
    pub fn anchor_at_origin(&mut self, proj_parameter: String) {
        let Some((min, max)) = self.bounds() else {
            return;
        };

        self.apply_offset(-min.x, -min.y);
        self.location = Some(Location {
            net_offset: (-min.x, -min.y),
            conv_boundary: (0.0, 0.0, max.x - min.x, max.y - min.y),
            orig_boundary: (min.x, min.y, max.x, max.y),
            proj_parameter,
        });
    }
}
