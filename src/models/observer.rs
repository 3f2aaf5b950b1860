use serde::{Deserialize, Serialize};

use super::CircumpolarKind;

/// Geographic location of the observer (West and South negative)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
    /// Height above sea level in metres
    #[serde(default)]
    pub altitude: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
        }
    }

    /// Edinburgh, 55.92 N 3.18 W
    pub fn edinburgh() -> Self {
        Self::new(55.92, -3.18)
    }

    /// Julian Day of local mean midnight starting the observer's day that contains `julian_day`
    pub fn local_day_start(&self, julian_day: f64) -> f64 {
        let offset = self.longitude / 360.0;
        (julian_day + 0.5 + offset).floor() - 0.5 - offset
    }

    /// Side of the horizon a body that neither rises nor sets stays on.
    ///
    /// Taken from the geometric altitude at upper culmination, `90 - |lat - dec|`.
    /// Only meaningful once the provider has found no horizon crossing.
    pub fn circumpolar_kind(&self, declination: f64) -> CircumpolarKind {
        if (self.latitude - declination).abs() < 90.0 {
            CircumpolarKind::AlwaysAbove
        } else {
            CircumpolarKind::AlwaysBelow
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::edinburgh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_day_start_greenwich() {
        let observer = Observer::new(51.48, 0.0);
        // J2000.0 is noon UT on 2000-01-01, day starts at midnight
        assert!((observer.local_day_start(2451545.0) - 2451544.5).abs() < 1e-9);
        assert!((observer.local_day_start(2451544.5) - 2451544.5).abs() < 1e-9);
        assert!((observer.local_day_start(2451544.49) - 2451543.5).abs() < 1e-9);
    }

    #[test]
    fn test_local_day_start_shifts_with_longitude() {
        // 90 degrees East: local midnight is 6 hours before UT midnight
        let east = Observer::new(0.0, 90.0);
        let start = east.local_day_start(2451545.0);
        assert!((start - (2451544.5 - 0.25)).abs() < 1e-9);

        // 90 degrees West: at 03:00 UT it is still the previous local day
        let west = Observer::new(0.0, -90.0);
        let start = west.local_day_start(2451544.5 + 0.125);
        assert!((start - (2451543.5 + 0.25)).abs() < 1e-9);
    }

    #[test]
    fn test_circumpolar_kind() {
        let arctic = Observer::new(78.22, 15.65);
        assert_eq!(arctic.circumpolar_kind(23.4), CircumpolarKind::AlwaysAbove);
        assert_eq!(arctic.circumpolar_kind(-23.4), CircumpolarKind::AlwaysBelow);

        let antarctic = Observer::new(-77.85, 166.67);
        assert_eq!(antarctic.circumpolar_kind(-23.4), CircumpolarKind::AlwaysAbove);
        assert_eq!(antarctic.circumpolar_kind(23.4), CircumpolarKind::AlwaysBelow);
    }

    #[test]
    fn test_midnight_sun_below_the_geometric_limit() {
        // Rovaniemi at the June solstice: the Sun never sets although its
        // declination is short of 90 - latitude
        let rovaniemi = Observer::new(66.50, 25.73);
        assert_eq!(rovaniemi.circumpolar_kind(23.4372), CircumpolarKind::AlwaysAbove);

        let mirrored = Observer::new(-66.50, 25.73);
        assert_eq!(mirrored.circumpolar_kind(-23.4372), CircumpolarKind::AlwaysAbove);
    }
}
