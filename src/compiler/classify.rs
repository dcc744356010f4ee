//! Pass 2: label every road as through-road or junction-internal, and detect
//! junctions that are really highway merges.

use crate::compiler::NetworkCompiler;
use crate::junction::Junction;
use crate::road::Road;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Connecting roads below this length look like genuine junction interiors;
/// a `-1`-tagged connector at or above it looks like a regular road and its
/// absorption is worth a warning.
pub const LONG_CONNECTOR_MIN: f64 = 10.0;

/// A junction is a highway merge when its connecting roads are long enough
/// to form a merge zone.
pub const MERGE_CONNECTOR_MIN: f64 = 150.0;

/// Pass 2 output: which roads are junction-internal, and which junctions
/// materialize as merge zones instead of nodes.
#[derive(Debug, Default)]
pub struct Classification<'a> {
    /// Road id -> owning junction id, for every road used as a connector.
    pub connecting: HashMap<&'a str, &'a str>,
    /// Junction id -> merge record, for junctions passing the merge
    /// predicate.
    pub merges: HashMap<&'a str, MergeRecord<'a>>,
}

impl<'a> Classification<'a> {
    pub fn is_connecting(&self, road_id: &str) -> bool {
        self.connecting.contains_key(road_id)
    }

    pub fn is_through(&self, road_id: &str) -> bool {
        !self.is_connecting(road_id)
    }
}

/// The roads participating in a highway merge, identified once by the
/// classifier and consumed by the node, edge and connection builders.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRecord<'a> {
    pub junction: &'a str,
    /// The incoming road with the larger right-lane count.
    pub main_road: &'a str,
    /// The other incoming road.
    pub ramp_road: &'a str,
    pub outgoing_road: &'a str,
    /// Connecting road continuing the main road; its geometry becomes the
    /// merge edge.
    pub main_connecting_road: &'a str,
    /// Connecting road continuing the ramp.
    pub ramp_connecting_road: &'a str,
}

impl<'a> NetworkCompiler<'a> {
    pub(super) fn classify(&mut self) {
        let mut classes = Classification::default();

        for road in &self.doc.road {
            if let Some(junction) = road.declares_junction() {
                classes.connecting.insert(road.id.as_str(), junction);
            }
        }

        // A road referenced as connectingRoad is internal even when its
        // junction attribute says otherwise.
        for junction in &self.doc.junction {
            for connection in junction.connection.iter() {
                let Some(connecting_id) = connection.connecting_road.as_deref() else {
                    continue;
                };
                if classes.connecting.contains_key(connecting_id) {
                    continue;
                }
                if let Some(road) = self.roads.get(connecting_id) {
                    if road.length.value >= LONG_CONNECTOR_MIN {
                        warn!(
                            "road {} is tagged junction=-1 but used as a connecting road in \
                             junction {}; {:.1} m long, absorbed into junction topology anyway",
                            connecting_id, junction.id, road.length.value
                        );
                    } else {
                        debug!(
                            "road {} is tagged junction=-1 but used as a connecting road in \
                             junction {}",
                            connecting_id, junction.id
                        );
                    }
                }
                classes.connecting.insert(connecting_id, junction.id.as_str());
            }
        }

        for junction in &self.doc.junction {
            if let Some(record) = self.detect_merge(junction, &classes) {
                info!(
                    "junction {} is a highway merge: main={}, ramp={}, outgoing={}",
                    junction.id, record.main_road, record.ramp_road, record.outgoing_road
                );
                classes.merges.insert(junction.id.as_str(), record);
            }
        }

        info!(
            "classified {} connecting roads, {} highway merges",
            classes.connecting.len(),
            classes.merges.len()
        );
        self.classes = classes;
    }

    /// The highway-merge predicate: exactly two through-road predecessors,
    /// exactly one through-road successor, and a connecting road longer than
    /// 150 m.
    fn detect_merge(
        &self,
        junction: &'a Junction,
        classes: &Classification<'a>,
    ) -> Option<MergeRecord<'a>> {
        let connecting = self.junction_connecting_roads(junction);
        if connecting.is_empty() {
            return None;
        }

        let mut incoming: Vec<&'a str> = Vec::new();
        let mut outgoing: Vec<&'a str> = Vec::new();
        let mut max_length = 0.0_f64;

        for road in &connecting {
            max_length = max_length.max(road.length.value);

            if let Some(id) = road.predecessor().and_then(|l| l.road_id()) {
                if self.roads.contains_key(id) && classes.is_through(id) && !incoming.contains(&id)
                {
                    incoming.push(id);
                }
            }
            if let Some(id) = road.successor().and_then(|l| l.road_id()) {
                if self.roads.contains_key(id) && classes.is_through(id) && !outgoing.contains(&id)
                {
                    outgoing.push(id);
                }
            }
        }

        if incoming.len() != 2 || outgoing.len() != 1 || max_length <= MERGE_CONNECTOR_MIN {
            return None;
        }

        let lanes_of = |id: &str| {
            self.roads
                .get(id)
                .map(|r| crate::compiler::edges::mapped_right_lanes(r).len())
                .unwrap_or(0)
        };
        let (main_road, ramp_road) = if lanes_of(incoming[0]) >= lanes_of(incoming[1]) {
            (incoming[0], incoming[1])
        } else {
            (incoming[1], incoming[0])
        };

        let connecting_from = |road_id: &str| {
            connecting
                .iter()
                .find(|c| c.predecessor().and_then(|l| l.road_id()) == Some(road_id))
                .map(|c| c.id.as_str())
        };
        let Some(main_connecting_road) = connecting_from(main_road) else {
            warn!(
                "junction {} looks like a highway merge but no connecting road follows \
                 the main road {}; treating as a regular junction",
                junction.id, main_road
            );
            return None;
        };
        let Some(ramp_connecting_road) = connecting_from(ramp_road) else {
            warn!(
                "junction {} looks like a highway merge but no connecting road follows \
                 the ramp {}; treating as a regular junction",
                junction.id, ramp_road
            );
            return None;
        };

        Some(MergeRecord {
            junction: junction.id.as_str(),
            main_road,
            ramp_road,
            outgoing_road: outgoing[0],
            main_connecting_road,
            ramp_connecting_road,
        })
    }

    /// The distinct connecting roads of a junction, in document order.
    pub(super) fn junction_connecting_roads(&self, junction: &'a Junction) -> Vec<&'a Road> {
        let mut seen: Vec<&str> = Vec::new();
        let mut result = Vec::new();
        for connection in junction.connection.iter() {
            let Some(id) = connection.connecting_road.as_deref() else {
                continue;
            };
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if let Some(road) = self.roads.get(id) {
                result.push(*road);
            }
        }
        result
    }
}
