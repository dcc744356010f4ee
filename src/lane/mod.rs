use crate::lane::lane_link::LaneLink;
use crate::lane::lane_type::LaneType;
use crate::lane::width::Width;

pub mod lane_link;
pub mod lane_section;
pub mod lane_type;
pub mod lanes;
pub mod left;
pub mod left_lane;
pub mod predecessor_successor;
pub mod right;
pub mod right_lane;
pub mod width;

/// How wide a lane is assumed to be when the source declares no usable width
/// polynomial.
pub const DEFAULT_LANE_WIDTH: f64 = 3.5;

/// Width polynomials with a constant coefficient at or below this magnitude
/// are treated as degenerate and skipped.
pub const MIN_LANE_WIDTH: f64 = 0.01;

/// The common part of a lane on either side of the reference line. The
/// signed id lives on the side-specific wrapper types.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub link: Option<LaneLink>,
    pub width: Vec<Width>,
    /// Type of the lane
    pub r#type: LaneType,
    /// `true` = keep lane on level, that is, do not apply superelevation
    pub level: Option<bool>,
}

impl Lane {
    /// The lane width in metres: the first `<width>` entry whose constant
    /// coefficient exceeds 1 cm, else 3.5 m.
    pub fn width_m(&self) -> f64 {
        self.width
            .iter()
            .find(|w| w.a.abs() > MIN_LANE_WIDTH)
            .map(|w| w.a.abs())
            .unwrap_or(DEFAULT_LANE_WIDTH)
    }

    /// The lane id this lane continues into on the linked road, if declared.
    pub fn successor_id(&self) -> Option<i64> {
        self.link
            .as_ref()
            .and_then(|l| l.successor.as_ref())
            .map(|s| s.id)
    }

    pub fn predecessor_id(&self) -> Option<i64> {
        self.link
            .as_ref()
            .and_then(|l| l.predecessor.as_ref())
            .map(|s| s.id)
    }
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Lane
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut link = None;
        let mut width = Vec::new();

        read_children!(
            read,
            "link" => LaneLink => |v| link = Some(v),
            "width" => Width => |v| width.push(v),
        );

        Ok(Self {
            link,
            width,
            r#type: read.attribute("type")?,
            level: read.attribute_opt("level")?,
        })
    }
}
