use arc::Arc;
use line::Line;
use param_poly_3::ParamPoly3;
use spiral::Spiral;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

pub mod arc;
pub mod line;
pub mod param_poly_3;
pub mod param_poly_3_p_range;
pub mod plan_view;
pub mod spiral;

/// One segment of the road reference line. The common header places the
/// segment in the inertial frame; the tagged variant selects the parametric
/// primitive. Exactly one variant child must be present in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Start orientation (inertial heading)
    pub hdg: Angle,
    /// Length of the element's reference line
    pub length: Length,
    /// s-coordinate of start position
    pub s: Length,
    /// Start position (x inertial)
    pub x: Length,
    /// Start position (y inertial)
    pub y: Length,
    pub choice: GeometryType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryType {
    Line(Line),
    Arc(Arc),
    Spiral(Spiral),
    ParamPoly3(ParamPoly3),
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Geometry
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut choice = None;

        read_children!(
            read,
            "line" => Line => |v| choice = Some(GeometryType::Line(v)),
            "spiral" => Spiral => |v| choice = Some(GeometryType::Spiral(v)),
            "arc" => Arc => |v| choice = Some(GeometryType::Arc(v)),
            "paramPoly3" => ParamPoly3 => |v| choice = Some(GeometryType::ParamPoly3(v)),
        );

        Ok(Self {
            hdg: read.attribute("hdg").map(Angle::new::<radian>)?,
            length: read.attribute("length").map(Length::new::<meter>)?,
            s: read.attribute("s").map(Length::new::<meter>)?,
            x: read.attribute("x").map(Length::new::<meter>)?,
            y: read.attribute("y").map(Length::new::<meter>)?,
            choice: choice.ok_or_else(|| crate::parser::Error::MissingChild {
                element: read.trail().to_string(),
                name: "line|spiral|arc|paramPoly3".to_string(),
            })?,
        })
    }
}
