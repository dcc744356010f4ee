/// Speed units accepted by the `<speed unit>` attribute. Exporters disagree
/// on spelling, so both the compact (`ms`, `kmh`) and the canonical (`m/s`,
/// `km/h`) forms are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    MeterPerSecond,
    KilometerPerHour,
    MilesPerHour,
}

impl SpeedUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MeterPerSecond => "m/s",
            Self::KilometerPerHour => "km/h",
            Self::MilesPerHour => "mph",
        }
    }
}

impl core::str::FromStr for SpeedUnit {
    type Err = crate::parser::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            _ if s.eq_ignore_ascii_case("m/s") || s.eq_ignore_ascii_case("ms") => {
                Ok(Self::MeterPerSecond)
            }
            _ if s.eq_ignore_ascii_case("km/h") || s.eq_ignore_ascii_case("kmh") => {
                Ok(Self::KilometerPerHour)
            }
            _ if s.eq_ignore_ascii_case("mph") => Ok(Self::MilesPerHour),
            _ => Err(crate::parser::UnknownVariant {
                ty: "SpeedUnit",
                value: s.to_string(),
            }),
        }
    }
}
