//! Ephemeris provider seam and the Swiss Ephemeris implementation

pub mod rise_set;
pub mod swiss;
pub mod time;

pub use swiss::{init_ephemeris, SwissEphemeris, TimeSource};
pub use time::{
    datetime_to_julian_day, julian_day_to_datetime, julian_day_to_local, parse_timezone,
    system_julian_day,
};

use crate::error::Result;
use crate::models::{
    Body, Distances, EclipticPosition, EquatorialPosition, Illumination, Observer, RiseSet,
};

/// Source of astronomical positions and times.
///
/// Every call is independent: implementations take the body and Julian Day
/// explicitly and keep no per-call state visible to the caller.
pub trait EphemerisProvider {
    /// Current time reference as a Julian Day (UT)
    fn now(&self) -> Result<f64>;

    /// Heliocentric ecliptic position (geometric geocentric for the Sun)
    fn ecliptic_position(&self, body: Body, julian_day: f64) -> Result<EclipticPosition>;

    /// Apparent right ascension and declination
    fn equatorial_position(&self, body: Body, julian_day: f64) -> Result<EquatorialPosition>;

    /// Distances to Earth and Sun where defined for the body
    fn distances(&self, body: Body, julian_day: f64) -> Result<Distances>;

    /// Phase, illuminated disk and magnitude
    fn illumination(&self, body: Body, julian_day: f64) -> Result<Illumination>;

    /// Rise, transit and set for the observer's local day
    fn rise_transit_set(&self, body: Body, observer: &Observer, julian_day: f64)
        -> Result<RiseSet>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn now(&self) -> Result<f64> {
        (**self).now()
    }

    fn ecliptic_position(&self, body: Body, julian_day: f64) -> Result<EclipticPosition> {
        (**self).ecliptic_position(body, julian_day)
    }

    fn equatorial_position(&self, body: Body, julian_day: f64) -> Result<EquatorialPosition> {
        (**self).equatorial_position(body, julian_day)
    }

    fn distances(&self, body: Body, julian_day: f64) -> Result<Distances> {
        (**self).distances(body, julian_day)
    }

    fn illumination(&self, body: Body, julian_day: f64) -> Result<Illumination> {
        (**self).illumination(body, julian_day)
    }

    fn rise_transit_set(
        &self,
        body: Body,
        observer: &Observer,
        julian_day: f64,
    ) -> Result<RiseSet> {
        (**self).rise_transit_set(body, observer, julian_day)
    }
}
