//! Pass 4: produce the node set. One node per junction (at the centroid of
//! its connection points), two per highway merge, and one per free road
//! endpoint. Nodes within 1 cm of an existing node are never duplicated.

use crate::compiler::{NetworkCompiler, Result, RoadEnd};
use crate::geom::Point;
use crate::junction::contact_point::ContactPoint;
use crate::junction::Junction;
use crate::network::NodeType;
use crate::road::Road;
use log::{debug, info, warn};
use std::collections::BTreeSet;

impl<'a> NetworkCompiler<'a> {
    pub(super) fn build_nodes(&mut self) -> Result<()> {
        for junction in &self.doc.junction {
            if self.classes.merges.contains_key(junction.id.as_str()) {
                self.build_merge_nodes(junction.id.as_str())?;
            } else {
                self.build_junction_node(junction);
            }
        }

        for road in &self.doc.road {
            if self.classes.is_connecting(&road.id) {
                continue;
            }
            let start = self.resolve_endpoint_node(road, RoadEnd::Start);
            self.endpoint_nodes
                .insert((road.id.as_str(), RoadEnd::Start), start);
            let end = self.resolve_endpoint_node(road, RoadEnd::End);
            self.endpoint_nodes
                .insert((road.id.as_str(), RoadEnd::End), end);
        }

        info!(
            "created {} nodes ({} junction nodes, {} highway merges)",
            self.network.nodes.len(),
            self.junction_nodes.len(),
            self.merge_nodes.len()
        );
        Ok(())
    }

    /// One shared node per junction, at the arithmetic centroid of every
    /// point where a road meets it: through-road endpoints referencing the
    /// junction, and both ends of each connecting road.
    fn build_junction_node(&mut self, junction: &'a Junction) {
        let mut points: Vec<Point> = Vec::new();

        for road in &self.doc.road {
            if self.classes.is_connecting(&road.id) {
                continue;
            }
            if road.predecessor().and_then(|l| l.junction_id()) == Some(junction.id.as_str()) {
                points.extend(self.road_start_point(&road.id));
            }
            if road.successor().and_then(|l| l.junction_id()) == Some(junction.id.as_str()) {
                points.extend(self.road_end_point(&road.id));
            }
        }
        for road in &self.doc.road {
            if self.classes.connecting.get(road.id.as_str()).copied() == Some(junction.id.as_str())
            {
                points.extend(self.road_start_point(&road.id));
                points.extend(self.road_end_point(&road.id));
            }
        }

        let centroid = if points.is_empty() {
            warn!(
                "junction {} has no geometry to place its node, using origin",
                junction.id
            );
            Point::new(0.0, 0.0)
        } else {
            let n = points.len() as f64;
            Point::new(
                points.iter().map(|p| p.x).sum::<f64>() / n,
                points.iter().map(|p| p.y).sum::<f64>() / n,
            )
        };

        let node_type = self.junction_node_type(junction);
        let id = self.add_node(format!("junction_{}", junction.id), centroid, node_type);
        debug!("junction {} node {} at {}", junction.id, id, centroid);
        self.junction_nodes.insert(junction.id.as_str(), id);
    }

    /// Complexity rule: at least four distinct incident roads with more than
    /// eight lanes through the junction warrant a traffic light, as do
    /// exactly four with more than six; everything else runs on priority.
    fn junction_node_type(&self, junction: &'a Junction) -> NodeType {
        let mut incident: BTreeSet<&str> = BTreeSet::new();
        let mut total_lanes = 0usize;

        for road in self.junction_connecting_roads(junction) {
            if let Some(id) = road.predecessor().and_then(|l| l.road_id()) {
                incident.insert(id);
            }
            if let Some(id) = road.successor().and_then(|l| l.road_id()) {
                incident.insert(id);
            }
            total_lanes += super::edges::mapped_right_lanes(road).len()
                + super::edges::mapped_left_lanes(road).len();
        }

        match incident.len() {
            n if n >= 4 && total_lanes > 8 => NodeType::TrafficLight,
            4 if total_lanes > 6 => NodeType::TrafficLight,
            _ => NodeType::Priority,
        }
    }

    /// A merge junction materializes as two plain nodes: the merge zone
    /// starts where the main road ends and ends where the outgoing road
    /// starts.
    fn build_merge_nodes(&mut self, junction_id: &'a str) -> Result<()> {
        let record = self.classes.merges.get(junction_id).cloned().ok_or_else(|| {
            super::Error::InvariantViolation(format!(
                "merge nodes requested for junction {junction_id} without a merge record"
            ))
        })?;

        let start_point = self.road_end_point(record.main_road).ok_or_else(|| {
            super::Error::InvariantViolation(format!(
                "merge junction {junction_id}: main road {} has no geometry",
                record.main_road
            ))
        })?;
        let end_point = self.road_start_point(record.outgoing_road).ok_or_else(|| {
            super::Error::InvariantViolation(format!(
                "merge junction {junction_id}: outgoing road {} has no geometry",
                record.outgoing_road
            ))
        })?;

        let start = self.add_node(
            format!("j_merge_start_{junction_id}"),
            start_point,
            NodeType::Priority,
        );
        let end = self.add_node(
            format!("j_merge_end_{junction_id}"),
            end_point,
            NodeType::Priority,
        );
        debug!(
            "merge zone {junction_id}: {start} at {start_point} -> {end} at {end_point}"
        );
        self.merge_nodes.insert(junction_id, (start, end));
        Ok(())
    }

    /// The node representing one end of a through-road: the junction (or
    /// merge) node when the side links to a junction, the linked road's
    /// contact-point node when it links to a road, a fresh deduplicated node
    /// otherwise.
    fn resolve_endpoint_node(&mut self, road: &'a Road, end: RoadEnd) -> String {
        let point = match end {
            RoadEnd::Start => self.road_start_point(&road.id),
            RoadEnd::End => self.road_end_point(&road.id),
        }
        .unwrap_or_else(|| Point::new(0.0, 0.0));

        let link = match end {
            RoadEnd::Start => road.predecessor(),
            RoadEnd::End => road.successor(),
        };

        if let Some(junction_id) = link.and_then(|l| l.junction_id()) {
            if let Some((merge_start, merge_end)) = self.merge_nodes.get(junction_id) {
                // Incoming roads stop at the merge start; outgoing roads
                // depart from the merge end.
                return match end {
                    RoadEnd::End => merge_start.clone(),
                    RoadEnd::Start => merge_end.clone(),
                };
            }
            if let Some(node) = self.junction_nodes.get(junction_id) {
                return node.clone();
            }
            // Referenced junction without a declaration of its own: place its
            // node at the contact point.
            warn!(
                "road {} references undeclared junction {junction_id}, placing its node at \
                 the road endpoint",
                road.id
            );
            let id = self.add_node(format!("junction_{junction_id}"), point, NodeType::Priority);
            self.junction_nodes.insert(junction_id, id.clone());
            return id;
        }

        if let Some(target) = link.and_then(|l| l.road_id()) {
            let contact = match link.unwrap().contact_point {
                Some(ContactPoint::End) => RoadEnd::End,
                _ => RoadEnd::Start,
            };
            if let Some(node) = self.endpoint_nodes.get(&(target, contact)) {
                return node.clone();
            }
            // Shared node not registered yet; the coordinate dedup makes the
            // later registration land on this same node.
        }

        let suffix = match end {
            RoadEnd::Start => "start",
            RoadEnd::End => "end",
        };
        self.add_node(format!("node_{}_{suffix}", road.id), point, NodeType::Priority)
    }
}
