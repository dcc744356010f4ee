//! Pass 5: emit one forward edge per road with mapped right-side lanes and
//! one backward edge per road with mapped left-side lanes, and populate the
//! lane-mapping table the connection builder resolves against.

use crate::compiler::{Direction, Error, NetworkCompiler, Result, RoadEnd};
use crate::lane::lane_type::LaneType;
use crate::lane::Lane;
use crate::network::{Edge, EdgeLane};
use crate::road::Road;
use log::{debug, info, warn};
use std::collections::HashMap;

/// The canonical translation from signed source lane ids to target
/// `(edge, lane index)` slots. Every key is written exactly once, during the
/// edge pass; the connection pass only reads.
#[derive(Debug, Default)]
pub struct LaneMapping {
    map: HashMap<(String, i64, Direction), (String, usize)>,
}

impl LaneMapping {
    pub fn insert(
        &mut self,
        road: &str,
        lane: i64,
        direction: Direction,
        edge: String,
        index: usize,
    ) -> Result<()> {
        let previous = self
            .map
            .insert((road.to_string(), lane, direction), (edge, index));
        match previous {
            None => Ok(()),
            Some(previous) => Err(Error::InvariantViolation(format!(
                "lane mapping for road {road} lane {lane} ({direction:?}) written twice \
                 (previous value {previous:?})"
            ))),
        }
    }

    pub fn get(&self, road: &str, lane: i64, direction: Direction) -> Option<&(String, usize)> {
        self.map.get(&(road.to_string(), lane, direction))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &(String, usize)> {
        self.map.values()
    }
}

/// The right-side lanes the network maps, sorted by ascending source id so
/// the outermost lane (most negative) lands on target index 0.
pub(crate) fn mapped_right_lanes(road: &Road) -> Vec<(i64, &Lane)> {
    let mut lanes: Vec<(i64, &Lane)> = road
        .lanes
        .section_zero()
        .right
        .iter()
        .flat_map(|side| side.lane.iter())
        .filter(|lane| keep_lane(road, lane.id, &lane.base))
        .map(|lane| (lane.id, &lane.base))
        .collect();
    lanes.sort_by_key(|(id, _)| *id);
    lanes
}

/// The left-side lanes the network maps, sorted by ascending source id so
/// the innermost lane (id 1) lands on target index 0.
pub(crate) fn mapped_left_lanes(road: &Road) -> Vec<(i64, &Lane)> {
    let mut lanes: Vec<(i64, &Lane)> = road
        .lanes
        .section_zero()
        .left
        .iter()
        .flat_map(|side| side.lane.iter())
        .filter(|lane| keep_lane(road, lane.id, &lane.base))
        .map(|lane| (lane.id, &lane.base))
        .collect();
    lanes.sort_by_key(|(id, _)| *id);
    lanes
}

fn keep_lane(road: &Road, lane_id: i64, lane: &Lane) -> bool {
    let keep = lane.r#type.is_mapped();
    if !keep {
        debug!(
            "road {}: lane {} has unmapped type {}, dropped",
            road.id,
            lane_id,
            lane.r#type.as_str()
        );
    }
    keep
}

/// The per-lane record attached to the edge. Shoulders stay in the lane
/// list to keep indices aligned with the roadway, but no vehicle class may
/// use them.
pub(crate) fn lane_record(lane: &Lane) -> EdgeLane {
    let mut record = EdgeLane {
        width: Some(lane.width_m()),
        ..EdgeLane::default()
    };
    if lane.r#type == LaneType::Shoulder {
        record.r#type = Some("shoulder".to_string());
        record.disallow = Some("all".to_string());
    }
    record
}

impl<'a> NetworkCompiler<'a> {
    pub(super) fn build_edges(&mut self) -> Result<()> {
        for road in &self.doc.road {
            if let Some(junction) = self.classes.connecting.get(road.id.as_str()) {
                debug!(
                    "road {} is internal to junction {junction}, no edge emitted",
                    road.id
                );
                continue;
            }

            let Some(from) = self
                .endpoint_nodes
                .get(&(road.id.as_str(), RoadEnd::Start))
                .cloned()
            else {
                warn!("road {}: start node unresolved, skipping edges", road.id);
                continue;
            };
            let Some(to) = self
                .endpoint_nodes
                .get(&(road.id.as_str(), RoadEnd::End))
                .cloned()
            else {
                warn!("road {}: end node unresolved, skipping edges", road.id);
                continue;
            };

            let shape = self.polyline(&road.id).to_vec();
            let speed = road.speed_limit_mps();

            let right = mapped_right_lanes(road);
            if !right.is_empty() {
                let edge_id = format!("{}.0", road.id);
                for (index, (lane_id, _)) in right.iter().enumerate() {
                    self.lane_map.insert(
                        &road.id,
                        *lane_id,
                        Direction::Forward,
                        edge_id.clone(),
                        index,
                    )?;
                }
                self.push_edge(Edge {
                    id: edge_id,
                    from: from.clone(),
                    to: to.clone(),
                    num_lanes: right.len(),
                    speed,
                    name: road.name.clone(),
                    r#type: Some(road.road_type().to_string()),
                    shape: (shape.len() >= 2).then(|| shape.clone()),
                    lanes: right.iter().map(|(_, lane)| lane_record(lane)).collect(),
                });
            }

            let left = mapped_left_lanes(road);
            if !left.is_empty() {
                let edge_id = format!("{}.1", road.id);
                for (index, (lane_id, _)) in left.iter().enumerate() {
                    self.lane_map.insert(
                        &road.id,
                        *lane_id,
                        Direction::Backward,
                        edge_id.clone(),
                        index,
                    )?;
                }
                let mut reversed = shape.clone();
                reversed.reverse();
                self.push_edge(Edge {
                    id: edge_id,
                    from: to,
                    to: from,
                    num_lanes: left.len(),
                    speed,
                    name: road.name.clone(),
                    r#type: Some(road.road_type().to_string()),
                    shape: (reversed.len() >= 2).then_some(reversed),
                    lanes: left.iter().map(|(_, lane)| lane_record(lane)).collect(),
                });
            }
        }

        info!(
            "created {} edges, {} lane mappings",
            self.network.edges.len(),
            self.lane_map.len()
        );
        Ok(())
    }
}
