//! The map compiler: a linear pipeline of passes over a parsed OpenDRIVE
//! document that produces the intermediate network the plain-XML writer
//! serializes.
//!
//! Each pass fully populates its outputs before the next pass starts; the
//! lookup maps built by one pass are read-only to the passes after it. All
//! cross-references between entities are string ids resolved through those
//! maps, never memory references.

use crate::core::OpenDrive;
use crate::geom::Point;
use crate::network::Network;
use crate::road::Road;
use log::{info, warn};
use std::collections::HashMap;

pub mod classify;
pub mod connections;
pub mod edges;
pub mod geometry;
pub mod merge;
pub mod nodes;

pub use classify::{Classification, MergeRecord};
pub use edges::LaneMapping;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal compiler errors. Recoverable conditions (unknown lane types,
/// unresolvable lane links, dropped connections) are logged at warning
/// severity instead and the offending item is skipped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document is malformed or unreadable.
    #[error("source document is malformed: {0}")]
    SourceFormat(#[from] crate::parser::Error),
    /// An internal contract was broken; this is a bug, not an input problem.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
    /// The external network assembler exited with a failure.
    #[error("network assembler failed ({status}): {stderr}")]
    BackendFailure {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Write(#[from] crate::writer::Error),
}

/// Which driving direction of a road an edge represents. Right-side lanes
/// (negative source ids) drive forward, left-side lanes backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// One end of a road's reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadEnd {
    Start,
    End,
}

/// Compiles a parsed document into the intermediate network.
pub fn compile(doc: &OpenDrive) -> Result<Network> {
    NetworkCompiler::new(doc).run()
}

/// Parses `input`, compiles it, and writes the three plain-XML artifacts
/// under `prefix`.
pub fn compile_to_plain(
    input: &std::path::Path,
    prefix: &str,
) -> Result<crate::network::writer::PlainFiles> {
    let doc = OpenDrive::from_xml_path(input)?;
    let network = compile(&doc)?;
    Ok(network.write_plain_files(prefix)?)
}

/// Holds the state shared by the compiler passes. Constructed fresh per
/// invocation; there is no global state.
pub struct NetworkCompiler<'a> {
    doc: &'a OpenDrive,
    /// Road id -> road, for link resolution.
    roads: HashMap<&'a str, &'a Road>,
    /// Pass 2 output.
    classes: Classification<'a>,
    /// Pass 3 output: road id -> sampled centerline.
    polylines: HashMap<&'a str, Vec<Point>>,
    /// Pass 4 outputs.
    junction_nodes: HashMap<&'a str, String>,
    endpoint_nodes: HashMap<(&'a str, RoadEnd), String>,
    merge_nodes: HashMap<&'a str, (String, String)>,
    /// Pass 5 outputs.
    lane_map: LaneMapping,
    edge_index: HashMap<String, usize>,
    /// The growing result.
    network: Network,
}

impl<'a> NetworkCompiler<'a> {
    pub fn new(doc: &'a OpenDrive) -> Self {
        let roads = doc.road.iter().map(|r| (r.id.as_str(), r)).collect();
        Self {
            doc,
            roads,
            classes: Classification::default(),
            polylines: HashMap::new(),
            junction_nodes: HashMap::new(),
            endpoint_nodes: HashMap::new(),
            merge_nodes: HashMap::new(),
            lane_map: LaneMapping::default(),
            edge_index: HashMap::new(),
            network: Network::default(),
        }
    }

    pub fn run(mut self) -> Result<Network> {
        self.execute()?;
        Ok(self.finish())
    }

    fn execute(&mut self) -> Result<()> {
        self.check_declared_lengths();
        self.classify();
        self.evaluate_geometry();
        self.build_nodes()?;
        self.build_edges()?;
        self.build_merge_edges()?;
        self.build_connections()?;
        Ok(())
    }

    fn finish(mut self) -> Network {
        if let Some(proj) = &self.doc.header.geo_reference {
            info!("geodetic reference present, anchoring network at (0,0)");
            self.network.anchor_at_origin(proj.clone());
        }
        info!(
            "compiled {} nodes, {} edges, {} connections",
            self.network.nodes.len(),
            self.network.edges.len(),
            self.network.connections.len()
        );
        self.network
    }

    /// The declared road length must match the summed segment lengths within
    /// 1%. A mismatch is a data-quality warning, not an abort.
    fn check_declared_lengths(&self) {
        for road in &self.doc.road {
            let declared = road.length.value;
            let summed: f64 = road
                .plan_view
                .geometry
                .iter()
                .map(|g| g.length.value)
                .sum();
            if declared > 0.0 && (summed - declared).abs() > declared * 0.01 {
                warn!(
                    "road {}: declared length {:.2} differs from summed segment lengths {:.2}",
                    road.id, declared, summed
                );
            }
        }
    }

    /// Registers a node, reusing any existing node within 1 cm on both axes.
    /// Returns the id of the node actually representing the point.
    fn add_node(&mut self, id: String, point: Point, node_type: crate::network::NodeType) -> String {
        for node in &self.network.nodes {
            if node.point.coincident(point) {
                return node.id.clone();
            }
        }
        self.network.nodes.push(crate::network::Node {
            id: id.clone(),
            point,
            node_type,
        });
        id
    }

    fn push_edge(&mut self, edge: crate::network::Edge) {
        self.edge_index
            .insert(edge.id.clone(), self.network.edges.len());
        self.network.edges.push(edge);
    }

    fn edge(&self, id: &str) -> Option<&crate::network::Edge> {
        self.edge_index.get(id).map(|&i| &self.network.edges[i])
    }
}
