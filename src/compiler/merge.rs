//! Highway-merge materialization. A junction passing the merge predicate
//! gets no junction node; instead the main connecting road's geometry
//! becomes a merge edge between the two merge nodes, one lane wider than the
//! main road, with the added acceleration lane at index 0.

use crate::compiler::edges::{lane_record, mapped_right_lanes};
use crate::compiler::{Direction, Error, MergeRecord, NetworkCompiler, Result};
use crate::geom::trim_polyline;
use crate::network::{Connection, Edge, EdgeLane};
use log::{info, warn};

/// Metres cut from both ends of the main connecting road's polyline so the
/// merge edge stays clear of the entry and exit gores.
const MERGE_SHAPE_TRIM: f64 = 50.0;

/// Width of the synthesized acceleration lane (12 ft).
const ACCELERATION_LANE_WIDTH: f64 = 3.66;

impl<'a> NetworkCompiler<'a> {
    pub(super) fn build_merge_edges(&mut self) -> Result<()> {
        for junction in &self.doc.junction {
            let Some(record) = self.classes.merges.get(junction.id.as_str()).cloned() else {
                continue;
            };
            self.build_merge_edge(&record)?;
        }
        Ok(())
    }

    fn build_merge_edge(&mut self, record: &MergeRecord<'a>) -> Result<()> {
        let (from, to) = self
            .merge_nodes
            .get(record.junction)
            .cloned()
            .ok_or_else(|| {
                Error::InvariantViolation(format!(
                    "merge edge for junction {} requested before its nodes exist",
                    record.junction
                ))
            })?;

        let main_road = *self.roads.get(record.main_road).ok_or_else(|| {
            Error::InvariantViolation(format!(
                "merge junction {}: main road {} vanished from the road map",
                record.junction, record.main_road
            ))
        })?;

        let shape = trim_polyline(self.polyline(record.main_connecting_road), MERGE_SHAPE_TRIM);
        let edge_id = format!("merge_zone_{}", record.junction);

        // Index 0 is the acceleration lane fed by the ramp.
        let mut lanes = vec![EdgeLane {
            width: Some(ACCELERATION_LANE_WIDTH),
            ..EdgeLane::default()
        }];
        self.lane_map.insert(
            record.ramp_connecting_road,
            -1,
            Direction::Forward,
            edge_id.clone(),
            0,
        )?;

        let main_lanes = mapped_right_lanes(main_road);
        for (index, (lane_id, lane)) in main_lanes.iter().enumerate() {
            lanes.push(lane_record(lane));
            self.lane_map.insert(
                record.main_connecting_road,
                *lane_id,
                Direction::Forward,
                edge_id.clone(),
                index + 1,
            )?;
        }

        info!(
            "created merge edge {edge_id} with {} lanes (index 0 = acceleration)",
            lanes.len()
        );
        self.push_edge(Edge {
            id: edge_id,
            from,
            to,
            num_lanes: lanes.len(),
            speed: main_road.speed_limit_mps(),
            name: Some(format!("Merge zone {}", record.junction)),
            r#type: Some("highway_merge".to_string()),
            shape: (shape.len() >= 2).then_some(shape),
            lanes,
        });
        Ok(())
    }

    /// Connection synthesis around the merge zone. The main road keeps its
    /// lane order shifted up by one, the ramp feeds the acceleration lane,
    /// and the acceleration lane drains into the outgoing road's rightmost
    /// lane.
    pub(super) fn build_merge_connections(&mut self, record: &MergeRecord<'a>) {
        let merge_edge_id = format!("merge_zone_{}", record.junction);
        let main_edge_id = format!("{}.0", record.main_road);
        let ramp_edge_id = format!("{}.0", record.ramp_road);
        let outgoing_edge_id = format!("{}.0", record.outgoing_road);

        let Some(merge_lanes) = self.edge(&merge_edge_id).map(|e| e.num_lanes) else {
            warn!(
                "merge junction {}: merge edge missing, no connections emitted",
                record.junction
            );
            return;
        };

        // Main road -> merge edge, preserving lane order above the
        // acceleration lane.
        match self.edge(&main_edge_id).map(|e| e.num_lanes) {
            Some(main_lanes) => {
                for index in 0..main_lanes.min(merge_lanes.saturating_sub(1)) {
                    self.network.connections.push(Connection {
                        from_edge: main_edge_id.clone(),
                        to_edge: merge_edge_id.clone(),
                        from_lane: index,
                        to_lane: index + 1,
                        via: None,
                    });
                }
            }
            None => warn!(
                "merge junction {}: main edge {main_edge_id} missing",
                record.junction
            ),
        }

        // Ramp -> acceleration lane.
        if self.edge(&ramp_edge_id).is_some() {
            self.network.connections.push(Connection {
                from_edge: ramp_edge_id,
                to_edge: merge_edge_id.clone(),
                from_lane: 0,
                to_lane: 0,
                via: None,
            });
        } else {
            warn!(
                "merge junction {}: ramp edge {ramp_edge_id} missing",
                record.junction
            );
        }

        // Merge edge -> outgoing road: main lanes map straight across, the
        // acceleration lane ends in the rightmost outgoing lane.
        match self.edge(&outgoing_edge_id).map(|e| e.num_lanes) {
            Some(outgoing_lanes) => {
                for index in 1..merge_lanes {
                    if index - 1 >= outgoing_lanes {
                        warn!(
                            "merge junction {}: outgoing road {} has no lane {} for merge \
                             lane {index}",
                            record.junction,
                            record.outgoing_road,
                            index - 1
                        );
                        continue;
                    }
                    self.network.connections.push(Connection {
                        from_edge: merge_edge_id.clone(),
                        to_edge: outgoing_edge_id.clone(),
                        from_lane: index,
                        to_lane: index - 1,
                        via: None,
                    });
                }
                if outgoing_lanes > 0 {
                    self.network.connections.push(Connection {
                        from_edge: merge_edge_id,
                        to_edge: outgoing_edge_id,
                        from_lane: 0,
                        to_lane: 0,
                        via: None,
                    });
                }
            }
            None => warn!(
                "merge junction {}: outgoing edge {outgoing_edge_id} missing",
                record.junction
            ),
        }
    }
}
