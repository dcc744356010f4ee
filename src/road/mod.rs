use crate::junction::contact_point::ContactPoint;
use crate::lane::lanes::Lanes;
use crate::road::geometry::plan_view::PlanView;
use crate::road::r#type::Type;
use uom::si::f64::Length;
use uom::si::length::meter;

pub mod geometry;
pub mod speed;
pub mod r#type;
pub mod unit;

/// The id a road declares when it belongs to no junction.
pub const NO_JUNCTION: &str = "-1";

/// A `<road>` element: one stretch of the network running along a single
/// reference line, with lanes on both sides and optional links to its
/// neighbours. Roads belonging to a junction reference it through the
/// `junction` attribute; free roads declare `-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    /// Unique ID within the database
    pub id: String,
    /// ID of the junction to which the road belongs as a connecting road
    /// (`-1` for none)
    pub junction: String,
    /// Total length of the reference line in the xy-plane
    pub length: Length,
    /// Name of the road. May be chosen freely.
    pub name: Option<String>,
    /// Basic rule for using the road; RHT is assumed when missing.
    pub rule: Option<Rule>,
    pub link: Option<Link>,
    pub r#type: Vec<Type>,
    pub plan_view: PlanView,
    pub lanes: Lanes,
}

impl Road {
    /// Whether the `junction` attribute marks this road as junction-owned.
    pub fn declares_junction(&self) -> Option<&str> {
        if self.junction == NO_JUNCTION {
            None
        } else {
            Some(&self.junction)
        }
    }

    /// The speed limit in m/s: the first `<type>` entry carrying a numeric
    /// `<speed>`, unit-normalized. Roads without one fall back to 50 km/h.
    pub fn speed_limit_mps(&self) -> f64 {
        self.r#type
            .iter()
            .find_map(|t| t.speed.as_ref().and_then(|s| s.max_mps()))
            .unwrap_or(crate::road::speed::DEFAULT_SPEED_MPS)
    }

    /// The declared road type string, defaulting to `town`.
    pub fn road_type(&self) -> &str {
        self.r#type
            .first()
            .map(|t| t.r#type.as_str())
            .unwrap_or("town")
    }

    pub fn predecessor(&self) -> Option<&PredecessorSuccessor> {
        self.link.as_ref().and_then(|l| l.predecessor.as_ref())
    }

    pub fn successor(&self) -> Option<&PredecessorSuccessor> {
        self.link.as_ref().and_then(|l| l.successor.as_ref())
    }
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Road
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut link = None;
        let mut r#type = Vec::new();
        let mut plan_view = None;
        let mut lanes = None;

        read_children!(
            read,
            "link" => Link => |v| link = Some(v),
            "type" => Type => |v| r#type.push(v),
            "planView" required => PlanView => |v| plan_view = Some(v),
            "lanes" required => Lanes => |v| lanes = Some(v),
        );

        Ok(Self {
            id: read.attribute("id")?,
            junction: read
                .attribute_opt("junction")?
                .unwrap_or_else(|| NO_JUNCTION.to_string()),
            length: read.attribute("length").map(Length::new::<meter>)?,
            name: read.attribute_opt("name")?,
            rule: read.attribute_opt("rule")?,
            link,
            r#type,
            plan_view: plan_view.unwrap(),
            lanes: lanes.unwrap(),
        })
    }
}

/// Follows the road header if the road is linked to a successor or a
/// predecessor. Isolated roads may omit this element.
#[derive(Debug, PartialEq, Clone)]
pub struct Link {
    pub predecessor: Option<PredecessorSuccessor>,
    pub successor: Option<PredecessorSuccessor>,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Link
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(mut read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        let mut predecessor = None;
        let mut successor = None;

        read_children!(
            read,
            "predecessor" => PredecessorSuccessor => |v| predecessor = Some(v),
            "successor" => PredecessorSuccessor => |v| successor = Some(v),
        );

        Ok(Self {
            predecessor,
            successor,
        })
    }
}

/// Successors and predecessors can be junctions or roads. For road targets
/// the contact point names which end of the target is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct PredecessorSuccessor {
    /// Contact point of link on the linked element
    pub contact_point: Option<ContactPoint>,
    /// ID of the linked element
    pub element_id: String,
    /// Type of the linked element
    pub element_type: Option<ElementType>,
}

impl PredecessorSuccessor {
    pub fn is_road(&self) -> bool {
        matches!(self.element_type, Some(ElementType::Road))
    }

    pub fn is_junction(&self) -> bool {
        matches!(self.element_type, Some(ElementType::Junction))
    }

    /// The junction id when this link points at a junction.
    pub fn junction_id(&self) -> Option<&str> {
        self.is_junction().then_some(self.element_id.as_str())
    }

    /// The road id when this link points at a road.
    pub fn road_id(&self) -> Option<&str> {
        self.is_road().then_some(self.element_id.as_str())
    }
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for PredecessorSuccessor
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            contact_point: read.attribute_opt("contactPoint")?,
            element_id: read.attribute("elementId")?,
            element_type: read.attribute_opt("elementType")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Road,
    Junction,
}

string_enum!(ElementType {
    Road => "road",
    Junction => "junction",
});

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    RightHandTraffic,
    LeftHandTraffic,
}

string_enum!(Rule {
    RightHandTraffic => "RHT",
    LeftHandTraffic => "LHT",
});
