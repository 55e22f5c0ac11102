//! Ephemeris item identifiers

/// Bodies and data series a DE-family file can answer for.
///
/// `Mercury` through `Nutation` are stored items in file order; the
/// nutation series is last and carries two components (Δψ, Δε) instead
/// of three. `Libration` has its own header entry. `Ssb` and `Earth`
/// are virtual: the barycenter is the coordinate origin, and the Earth
/// is derived from the Earth-Moon barycenter and the geocentric Moon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JplEphItem {
    Mercury,
    Venus,
    EarthMoonBary,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// Geocentric
    Moon,
    Sun,
    /// Two components, not a position
    Nutation,
    /// Lunar libration Euler angles
    Libration,
    /// Solar system barycenter, the origin
    Ssb,
    /// Derived from `EarthMoonBary` and `Moon`
    Earth,
}

/// Number of items with stored coefficient-table entries in the header
/// (librations have a separate entry and are not counted).
pub const N_ITEMS: usize = 12;

impl JplEphItem {
    /// Index of this item's entry in the header coefficient table, if it
    /// has one.
    pub fn stored_index(self) -> Option<usize> {
        match self {
            JplEphItem::Mercury => Some(0),
            JplEphItem::Venus => Some(1),
            JplEphItem::EarthMoonBary => Some(2),
            JplEphItem::Mars => Some(3),
            JplEphItem::Jupiter => Some(4),
            JplEphItem::Saturn => Some(5),
            JplEphItem::Uranus => Some(6),
            JplEphItem::Neptune => Some(7),
            JplEphItem::Pluto => Some(8),
            JplEphItem::Moon => Some(9),
            JplEphItem::Sun => Some(10),
            JplEphItem::Nutation => Some(11),
            JplEphItem::Libration | JplEphItem::Ssb | JplEphItem::Earth => None,
        }
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            JplEphItem::Mercury => "Mercury",
            JplEphItem::Venus => "Venus",
            JplEphItem::EarthMoonBary => "Earth-Moon barycenter",
            JplEphItem::Mars => "Mars",
            JplEphItem::Jupiter => "Jupiter",
            JplEphItem::Saturn => "Saturn",
            JplEphItem::Uranus => "Uranus",
            JplEphItem::Neptune => "Neptune",
            JplEphItem::Pluto => "Pluto",
            JplEphItem::Moon => "Moon",
            JplEphItem::Sun => "Sun",
            JplEphItem::Nutation => "Nutation",
            JplEphItem::Libration => "Libration",
            JplEphItem::Ssb => "Solar system barycenter",
            JplEphItem::Earth => "Earth",
        }
    }

    /// Case-insensitive lookup by name; accepts a few common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mercury" => Some(JplEphItem::Mercury),
            "venus" => Some(JplEphItem::Venus),
            "emb" | "earth-moon barycenter" | "earth moon barycenter" => {
                Some(JplEphItem::EarthMoonBary)
            }
            "mars" => Some(JplEphItem::Mars),
            "jupiter" => Some(JplEphItem::Jupiter),
            "saturn" => Some(JplEphItem::Saturn),
            "uranus" => Some(JplEphItem::Uranus),
            "neptune" => Some(JplEphItem::Neptune),
            "pluto" => Some(JplEphItem::Pluto),
            "moon" => Some(JplEphItem::Moon),
            "sun" => Some(JplEphItem::Sun),
            "nutation" => Some(JplEphItem::Nutation),
            "libration" => Some(JplEphItem::Libration),
            "ssb" | "solar system barycenter" => Some(JplEphItem::Ssb),
            "earth" => Some(JplEphItem::Earth),
            _ => None,
        }
    }
}

impl std::fmt::Display for JplEphItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
