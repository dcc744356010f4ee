//! Pass 6: resolve each junction lane link through the lane-mapping table
//! into a lane-exact connection, carrying the connecting road's geometry as
//! via points.

use crate::compiler::{Direction, NetworkCompiler, Result};
use crate::geom::Point;
use crate::junction::contact_point::ContactPoint;
use crate::junction::Junction;
use crate::lane::lane_type::LaneType;
use crate::lane::Lane;
use crate::network::Connection;
use crate::road::Road;
use log::{debug, info, warn};

impl<'a> NetworkCompiler<'a> {
    pub(super) fn build_connections(&mut self) -> Result<()> {
        for junction in &self.doc.junction {
            if let Some(record) = self.classes.merges.get(junction.id.as_str()).cloned() {
                self.build_merge_connections(&record);
                continue;
            }

            let Some(junction_node) = self.junction_nodes.get(junction.id.as_str()).cloned()
            else {
                warn!(
                    "junction {} has no node, skipping its connections",
                    junction.id
                );
                continue;
            };

            for connection in junction.connection.iter() {
                self.build_junction_connection(junction, &junction_node, connection);
            }
        }

        info!("created {} connections", self.network.connections.len());
        Ok(())
    }

    fn build_junction_connection(
        &mut self,
        junction: &'a Junction,
        junction_node: &str,
        connection: &'a crate::junction::connection::Connection,
    ) {
        let Some(incoming_id) = connection.incoming_road.as_deref() else {
            warn!(
                "junction {} connection {}: no incoming road",
                junction.id, connection.id
            );
            return;
        };
        let Some(connecting_id) = connection.connecting_road.as_deref() else {
            warn!(
                "junction {} connection {}: no connecting road",
                junction.id, connection.id
            );
            return;
        };
        let (Some(incoming), Some(connecting)) = (
            self.roads.get(incoming_id).copied(),
            self.roads.get(connecting_id).copied(),
        ) else {
            warn!(
                "junction {}: missing roads for connection {incoming_id} -> {connecting_id}",
                junction.id
            );
            return;
        };

        let contact = connection.contact();

        // With an end contact the connecting road is traversed in reverse,
        // so the outgoing road sits at its predecessor.
        let outgoing_link = match contact {
            ContactPoint::Start => connecting.successor(),
            ContactPoint::End => connecting.predecessor(),
        };
        let Some(outgoing_id) = outgoing_link.and_then(|l| l.road_id()) else {
            warn!(
                "junction {}: cannot determine outgoing road for connecting road {connecting_id}",
                junction.id
            );
            return;
        };
        let Some(outgoing) = self.roads.get(outgoing_id).copied() else {
            warn!(
                "junction {}: outgoing road {outgoing_id} not in the document",
                junction.id
            );
            return;
        };

        let via = self.via_points(connecting_id, contact);

        for lane_link in &connection.lane_link {
            self.build_lane_connection(
                junction_node,
                incoming,
                connecting,
                outgoing,
                contact,
                lane_link,
                via.as_deref(),
            );
        }
    }

    /// Resolution of a single lane link; any unresolvable step drops just
    /// this link with a diagnostic.
    #[allow(clippy::too_many_arguments)]
    fn build_lane_connection(
        &mut self,
        junction_node: &str,
        incoming: &'a Road,
        connecting: &'a Road,
        outgoing: &'a Road,
        contact: ContactPoint,
        lane_link: &crate::junction::lane_link::LaneLink,
        via: Option<&[Point]>,
    ) {
        let incoming_dir = direction_of_lane(lane_link.from);
        let Some((from_edge, from_lane)) = self
            .lane_map
            .get(&incoming.id, lane_link.from, incoming_dir)
            .cloned()
        else {
            warn!(
                "no lane mapping for incoming road {} lane {}",
                incoming.id, lane_link.from
            );
            return;
        };

        let Some(connecting_lane) = find_lane(connecting, lane_link.to) else {
            warn!(
                "lane {} not found in connecting road {}",
                lane_link.to, connecting.id
            );
            return;
        };

        // The connecting lane names its continuation on the outgoing road;
        // without an explicit link the id carries over, sign-inverted when
        // the connecting road is traversed backwards.
        let outgoing_lane_id = match contact {
            ContactPoint::Start => connecting_lane.successor_id().unwrap_or(lane_link.to),
            ContactPoint::End => connecting_lane.predecessor_id().unwrap_or(-lane_link.to),
        };

        if lane_type_of(incoming, lane_link.from) == Some(LaneType::Shoulder)
            || lane_type_of(outgoing, outgoing_lane_id) == Some(LaneType::Shoulder)
        {
            debug!(
                "skipping shoulder lane link {} -> {} ({} -> {})",
                lane_link.from, outgoing_lane_id, incoming.id, outgoing.id
            );
            return;
        }

        let outgoing_dir = direction_of_lane(outgoing_lane_id);
        let Some((to_edge, to_lane)) = self
            .lane_map
            .get(&outgoing.id, outgoing_lane_id, outgoing_dir)
            .cloned()
        else {
            warn!(
                "no lane mapping for outgoing road {} lane {outgoing_lane_id}",
                outgoing.id
            );
            return;
        };

        // Both edges must meet at the junction node the connection crosses.
        let from_meets = self.edge(&from_edge).map(|e| e.to == junction_node);
        let to_meets = self.edge(&to_edge).map(|e| e.from == junction_node);
        if from_meets != Some(true) || to_meets != Some(true) {
            warn!(
                "connection {from_edge} -> {to_edge} does not meet at junction node \
                 {junction_node}, dropped"
            );
            return;
        }

        let from_lanes = self.edge(&from_edge).map(|e| e.num_lanes).unwrap_or(0);
        let to_lanes = self.edge(&to_edge).map(|e| e.num_lanes).unwrap_or(0);
        if from_lane >= from_lanes || to_lane >= to_lanes {
            warn!(
                "connection {from_edge}:{from_lane} -> {to_edge}:{to_lane} exceeds lane \
                 counts ({from_lanes}/{to_lanes}), dropped"
            );
            return;
        }

        debug!("connection {from_edge}:{from_lane} -> {to_edge}:{to_lane}");
        self.network.connections.push(Connection {
            from_edge,
            to_edge,
            from_lane,
            to_lane,
            via: via.map(<[Point]>::to_vec),
        });
    }

    /// The connecting road's polyline as via points: reversed for an end
    /// contact, with the two junction-boundary endpoints trimmed away.
    fn via_points(&self, connecting_id: &str, contact: ContactPoint) -> Option<Vec<Point>> {
        let mut points = self.polyline(connecting_id).to_vec();
        if contact == ContactPoint::End {
            points.reverse();
        }
        if points.len() > 2 {
            Some(points[1..points.len() - 1].to_vec())
        } else {
            None
        }
    }
}

fn direction_of_lane(lane_id: i64) -> Direction {
    if lane_id < 0 {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// Looks a lane up by signed id in section 0 of a road.
fn find_lane(road: &Road, lane_id: i64) -> Option<&Lane> {
    let section = road.lanes.section_zero();
    if lane_id < 0 {
        section
            .right
            .as_ref()?
            .lane
            .iter()
            .find(|l| l.id == lane_id)
            .map(|l| &l.base)
    } else {
        section
            .left
            .as_ref()?
            .lane
            .iter()
            .find(|l| l.id == lane_id)
            .map(|l| &l.base)
    }
}

fn lane_type_of(road: &Road, lane_id: i64) -> Option<LaneType> {
    find_lane(road, lane_id).map(|l| l.r#type)
}
