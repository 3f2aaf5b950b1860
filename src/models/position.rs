use serde::{Deserialize, Serialize};

/// Ecliptic coordinates of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    /// Ecliptic longitude (0-360 degrees)
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Radius vector in AU
    pub radius: f64,
    /// Heliocentric, or geometric geocentric for the Sun
    pub heliocentric: bool,
}

/// Apparent equatorial coordinates of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPosition {
    /// Right ascension in degrees (0-360)
    pub right_ascension: f64,
    /// Declination in degrees
    pub declination: f64,
}

impl EquatorialPosition {
    /// Right ascension in hours (0-24)
    pub fn right_ascension_hours(&self) -> f64 {
        self.right_ascension / 15.0
    }
}

/// Distances in AU; `None` where the distance is not defined for the body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distances {
    pub earth: Option<f64>,
    pub sun: Option<f64>,
}

/// Disk illumination and brightness as seen from Earth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Illumination {
    /// Sun-body-Earth angle in degrees (0-180)
    pub phase_angle: f64,
    /// Illuminated fraction of the disk (0-1)
    pub illuminated_fraction: f64,
    /// Elongation from the Sun in degrees
    pub elongation: f64,
    /// Apparent diameter of the disk in degrees
    pub apparent_diameter: f64,
    /// Apparent visual magnitude
    pub magnitude: f64,
}

/// Side of the horizon a circumpolar body stays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircumpolarKind {
    AlwaysAbove,
    AlwaysBelow,
}

/// Rise, upper transit and set instants as Julian Days (UT)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiseTransitSet {
    pub rise: f64,
    pub transit: f64,
    pub set: f64,
}

impl RiseTransitSet {
    pub fn is_ordered(&self) -> bool {
        self.rise < self.transit && self.transit < self.set
    }
}

/// Outcome of a rise/set search for one observer day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiseSet {
    Events(RiseTransitSet),
    Circumpolar { side: CircumpolarKind },
}
