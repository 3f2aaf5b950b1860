use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Solar system bodies the reporter can follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Get all bodies for iteration
    pub fn all() -> &'static [Body] {
        &[
            Body::Sun,
            Body::Moon,
            Body::Mercury,
            Body::Venus,
            Body::Earth,
            Body::Mars,
            Body::Jupiter,
            Body::Saturn,
            Body::Uranus,
            Body::Neptune,
            Body::Pluto,
        ]
    }

    /// Bodies reported when nothing is configured
    pub fn default_set() -> Vec<Body> {
        vec![Body::Mars, Body::Sun, Body::Earth]
    }

    /// Get Swiss Ephemeris body ID
    pub fn swe_id(&self) -> i32 {
        match self {
            Body::Sun => 0,      // SE_SUN
            Body::Moon => 1,     // SE_MOON
            Body::Mercury => 2,  // SE_MERCURY
            Body::Venus => 3,    // SE_VENUS
            Body::Mars => 4,     // SE_MARS
            Body::Jupiter => 5,  // SE_JUPITER
            Body::Saturn => 6,   // SE_SATURN
            Body::Uranus => 7,   // SE_URANUS
            Body::Neptune => 8,  // SE_NEPTUNE
            Body::Pluto => 9,    // SE_PLUTO
            Body::Earth => 14,   // SE_EARTH
        }
    }

    /// The Sun's ecliptic entry is geocentric; everything else is heliocentric
    pub fn is_heliocentric(&self) -> bool {
        !matches!(self, Body::Sun)
    }

    /// Right ascension / declination as seen from Earth
    pub fn has_equatorial(&self) -> bool {
        !matches!(self, Body::Earth)
    }

    pub fn has_earth_distance(&self) -> bool {
        !matches!(self, Body::Earth)
    }

    pub fn has_sun_distance(&self) -> bool {
        !matches!(self, Body::Sun)
    }

    /// Phase, illuminated disk and magnitude only make sense for bodies lit by the Sun
    pub fn has_illumination(&self) -> bool {
        !matches!(self, Body::Sun | Body::Earth)
    }

    /// Whether the body can rise and set for an observer on Earth
    pub fn has_rise_set(&self) -> bool {
        !matches!(self, Body::Earth)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::all()
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}
