/// The lane type is defined per lane. A lane type defines the main purpose
/// of a lane and its corresponding traffic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneType {
    /// Soft shoulder at the edge of the road
    Shoulder,
    /// Hard border at the edge of the road, at the height of the drivable lanes
    Border,
    /// Normal drivable lane
    Driving,
    /// Hard shoulder on motorways for emergency stops
    Stop,
    /// Invisible outermost lane, present for simulation fallback only
    None,
    /// Not for driving, but at the height of the drivable lanes
    Restricted,
    /// Lane with parking space
    Parking,
    /// Lane between opposing driving directions
    Median,
    /// Lane reserved for cyclists
    Biking,
    /// Lane on which pedestrians walk
    Sidewalk,
    /// Curbstone lane, at a different height than the drivable lanes
    Curb,
    /// Deceleration lane parallel to the main road
    Exit,
    /// Acceleration lane parallel to the main road
    Entry,
    /// Ramp leading onto a motorway from rural or urban roads
    OnRamp,
    /// Ramp leading away from a motorway onto rural or urban roads
    OffRamp,
    /// Ramp connecting two motorways
    ConnectingRamp,
    /// Single lane drivable in both directions, or a continuous two-way left
    /// turn lane
    Bidirectional,
    Special1,
    Special2,
    Special3,
    RoadWorks,
    Tram,
    Rail,
    Bus,
    Taxi,
    HOV,
}

impl LaneType {
    /// Lane types the edge builder turns into target lanes. Everything else
    /// is parsed but dropped from the network.
    pub fn is_mapped(&self) -> bool {
        matches!(
            self,
            Self::Driving | Self::Entry | Self::Exit | Self::OnRamp | Self::OffRamp | Self::Shoulder
        )
    }
}

string_enum!(LaneType {
    Shoulder => "shoulder",
    Border => "border",
    Driving => "driving",
    Stop => "stop",
    None => "none",
    Restricted => "restricted",
    Parking => "parking",
    Median => "median",
    Biking => "biking",
    Sidewalk => "sidewalk",
    Curb => "curb",
    Exit => "exit",
    Entry => "entry",
    OnRamp => "onRamp",
    OffRamp => "offRamp",
    ConnectingRamp => "connectingRamp",
    Bidirectional => "bidirectional",
    Special1 => "special1",
    Special2 => "special2",
    Special3 => "special3",
    RoadWorks => "roadWorks",
    Tram => "tram",
    Rail => "rail",
    Bus => "bus",
    Taxi => "taxi",
    HOV => "HOV",
});
