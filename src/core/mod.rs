use crate::core::header::Header;
use crate::junction::Junction;
use crate::road::Road;
use std::path::Path;
use xml::EventReader;

pub mod header;

/// The parsed OpenDRIVE document, reduced to the elements the network
/// compiler consumes: the header (for the coordinate reference), the roads,
/// and the junctions. Everything else in the source file is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenDrive {
    pub header: Header,
    pub road: Vec<Road>,
    pub junction: Vec<Junction>,
}

impl OpenDrive {
    #[inline]
    pub fn from_xml_str(s: &str) -> crate::parser::Result<Self> {
        Self::from_reader(EventReader::from_str(s.trim()))
    }

    #[inline]
    pub fn from_xml_read<T: std::io::Read>(r: T) -> crate::parser::Result<Self> {
        Self::from_reader(EventReader::new(r))
    }

    pub fn from_xml_path(path: &Path) -> Result<Self, crate::compiler::Error> {
        let file = std::fs::File::open(path)?;
        Self::from_xml_read(std::io::BufReader::new(file)).map_err(Into::into)
    }

    pub fn from_reader<T: std::io::Read>(reader: EventReader<T>) -> crate::parser::Result<Self> {
        let mut cursor = crate::parser::Cursor::new(reader.into_iter());
        let mut document = crate::parser::ElementReader::document(&mut cursor);

        let mut drive = None;
        read_children!(
            document,
            "OpenDRIVE" required => OpenDrive => |v| drive = Some(v),
        );

        Ok(drive.unwrap())
    }

    /// Looks up a road by its source id.
    pub fn road_by_id(&self, id: &str) -> Option<&Road> {
        self.road.iter().find(|r| r.id == id)
    }
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for OpenDrive
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut header = None;
        let mut roads = Vec::new();
        let mut junction = Vec::new();

        read_children!(
            read,
            "header" => Header => |v| header = Some(v),
            "road" => Road => |v| roads.push(v),
            "junction" => Junction => |v| junction.push(v),
        );

        Ok(Self {
            header: header.unwrap_or_default(),
            road: roads,
            junction,
        })
    }
}
