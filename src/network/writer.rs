//! Serialization of the compiled network into the three plain-XML artifacts.
//! Files are staged next to their final path and renamed into place, so a
//! failed run never leaves a partially-written artifact behind.

use crate::network::Network;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use xml::writer::XmlEvent;
use xml::{EmitterConfig, EventWriter};

/// The artifact paths produced by [`Network::write_plain_files`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlainFiles {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub connections: PathBuf,
}

fn emitter_config() -> EmitterConfig {
    EmitterConfig::new().perform_indent(true)
}

fn write_root<W: std::io::Write>(
    writer: &mut EventWriter<W>,
    name: &str,
    children: impl FnOnce(&mut EventWriter<W>) -> xml::writer::Result<()>,
) -> xml::writer::Result<()> {
    writer.write(XmlEvent::StartDocument {
        version: xml::common::XmlVersion::Version10,
        encoding: None,
        standalone: Some(true),
    })?;
    writer.write(XmlEvent::start_element(name))?;
    children(writer)?;
    writer.write(XmlEvent::end_element())?;
    Ok(())
}

impl Network {
    pub fn append_nodes_to_writer<W: std::io::Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> xml::writer::Result<()> {
        write_root(writer, "nodes", |writer| {
            if let Some(location) = &self.location {
                location.write_to(writer)?;
            }
            for node in &self.nodes {
                node.write_to(writer)?;
            }
            Ok(())
        })
    }

    pub fn append_edges_to_writer<W: std::io::Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> xml::writer::Result<()> {
        write_root(writer, "edges", |writer| {
            if let Some(location) = &self.location {
                location.write_to(writer)?;
            }
            for edge in &self.edges {
                edge.write_to(writer)?;
            }
            Ok(())
        })
    }

    pub fn append_connections_to_writer<W: std::io::Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> xml::writer::Result<()> {
        write_root(writer, "connections", |writer| {
            for connection in &self.connections {
                connection.write_to(writer)?;
            }
            Ok(())
        })
    }

    pub fn nodes_to_xml_string(&self) -> crate::writer::Result<String> {
        to_xml_string(|writer| self.append_nodes_to_writer(writer))
    }

    pub fn edges_to_xml_string(&self) -> crate::writer::Result<String> {
        to_xml_string(|writer| self.append_edges_to_writer(writer))
    }

    pub fn connections_to_xml_string(&self) -> crate::writer::Result<String> {
        to_xml_string(|writer| self.append_connections_to_writer(writer))
    }

    /// Writes `{prefix}.nod.xml`, `{prefix}.edg.xml` and `{prefix}.con.xml`.
    /// Each artifact is written to a staging path and renamed into place.
    pub fn write_plain_files(&self, prefix: &str) -> crate::writer::Result<PlainFiles> {
        let files = PlainFiles {
            nodes: PathBuf::from(format!("{prefix}.nod.xml")),
            edges: PathBuf::from(format!("{prefix}.edg.xml")),
            connections: PathBuf::from(format!("{prefix}.con.xml")),
        };

        write_staged(&files.nodes, |writer| self.append_nodes_to_writer(writer))?;
        write_staged(&files.edges, |writer| self.append_edges_to_writer(writer))?;
        write_staged(&files.connections, |writer| {
            self.append_connections_to_writer(writer)
        })?;

        Ok(files)
    }
}

fn to_xml_string(
    append: impl FnOnce(&mut EventWriter<Vec<u8>>) -> xml::writer::Result<()>,
) -> crate::writer::Result<String> {
    let mut writer = EventWriter::new_with_config(Vec::new(), emitter_config());
    append(&mut writer)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_staged(
    path: &Path,
    append: impl FnOnce(&mut EventWriter<BufWriter<File>>) -> xml::writer::Result<()>,
) -> crate::writer::Result<()> {
    let staging = PathBuf::from(format!("{}.tmp", path.display()));

    let file = File::create(&staging)?;
    let mut writer = EventWriter::new_with_config(BufWriter::new(file), emitter_config());
    append(&mut writer)?;
    writer.into_inner().flush()?;

    std::fs::rename(&staging, path)?;
    Ok(())
}
