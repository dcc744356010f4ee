use crate::road::unit::SpeedUnit;
use uom::si::f64::Velocity;
use uom::si::velocity::{kilometer_per_hour, meter_per_second, mile_per_hour};

/// Fallback speed limit for roads that declare none: 50 km/h.
pub const DEFAULT_SPEED_MPS: f64 = 13.89;

/// Defines the default maximum speed allowed in conjunction with the
/// specified road type.
#[derive(Debug, Clone, PartialEq)]
pub struct Speed {
    /// Maximum allowed speed: a numerical value in the unit of the `unit`
    /// attribute, or one of the literals `no limit` / `undefined`. m/s is
    /// assumed when the unit is missing.
    pub max: MaxSpeed,
    /// Unit of the attribute max
    pub unit: Option<SpeedUnit>,
}

impl Speed {
    /// The numeric limit normalized to m/s, `None` for `no limit` and
    /// `undefined`.
    pub fn max_mps(&self) -> Option<f64> {
        match self.max {
            MaxSpeed::Limit(limit) => {
                let velocity = match self.unit.unwrap_or(SpeedUnit::MeterPerSecond) {
                    SpeedUnit::MeterPerSecond => Velocity::new::<meter_per_second>(limit),
                    SpeedUnit::KilometerPerHour => Velocity::new::<kilometer_per_hour>(limit),
                    SpeedUnit::MilesPerHour => Velocity::new::<mile_per_hour>(limit),
                };
                Some(velocity.get::<meter_per_second>())
            }
            MaxSpeed::NoLimit | MaxSpeed::Undefined => None,
        }
    }
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for Speed
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            max: read.attribute("max")?,
            unit: read.attribute_opt("unit")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaxSpeed {
    Limit(f64),
    NoLimit,
    Undefined,
}

impl core::str::FromStr for MaxSpeed {
    type Err = crate::parser::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("no limit") {
            Self::NoLimit
        } else if s.eq_ignore_ascii_case("undefined") {
            Self::Undefined
        } else if let Ok(limit) = s.parse::<f64>() {
            Self::Limit(limit)
        } else {
            return Err(crate::parser::UnknownVariant {
                ty: "MaxSpeed",
                value: s.to_string(),
            });
        })
    }
}
