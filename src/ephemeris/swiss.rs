//! Swiss Ephemeris backed provider
//!
//! Safe wrappers around the libswisseph-sys FFI bindings. The C library keeps
//! global state, so every call that reads or sets it goes through `lock_swe`.
//! The calendar conversions in `time` are pure and run without it.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Once};

use tracing::{debug, warn};

use super::rise_set;
use super::time::system_julian_day;
use super::EphemerisProvider;
use crate::error::{EphemerisError, Result};
use crate::models::{
    Body, Distances, EclipticPosition, EquatorialPosition, Illumination, Observer, RiseSet,
};

// Swiss Ephemeris constants
pub(super) const SEFLG_SWIEPH: i32 = 2; // Use Swiss Ephemeris
const SEFLG_HELCTR: i32 = 8; // Heliocentric position
const SEFLG_TRUEPOS: i32 = 16; // Geometric position, no light-time correction
const SEFLG_EQUATORIAL: i32 = 2048; // Right ascension / declination

static INIT: Once = Once::new();
static SWE_LOCK: Mutex<()> = Mutex::new(());

/// Initialize Swiss Ephemeris (call once at startup)
///
/// Without a data directory the library falls back to the Moshier analytical
/// ephemeris (0.1 arc seconds for planets, 3 arc seconds for the Moon).
pub fn init_ephemeris(ephemeris_path: Option<&Path>) {
    INIT.call_once(|| {
        let path = ephemeris_path.and_then(|p| {
            let c_path = CString::new(p.to_string_lossy().as_bytes()).ok();
            if c_path.is_none() {
                warn!(path = %p.display(), "Ignoring ephemeris path containing NUL byte");
            }
            c_path
        });

        let _guard = lock_swe();
        match path {
            Some(c_path) => unsafe {
                debug!(path = ?c_path, "Using Swiss Ephemeris data files");
                // swe_set_ephe_path copies the string
                libswisseph_sys::swe_set_ephe_path(c_path.as_ptr() as *mut c_char);
            },
            None => unsafe {
                libswisseph_sys::swe_set_ephe_path(std::ptr::null_mut());
            },
        }
    });
}

pub(super) fn lock_swe() -> MutexGuard<'static, ()> {
    SWE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(super) fn error_message(serr: &[c_char]) -> String {
    let message = unsafe { CStr::from_ptr(serr.as_ptr()) }
        .to_string_lossy()
        .trim()
        .to_string();
    if message.is_empty() {
        "Swiss Ephemeris returned an error".to_string()
    } else {
        message
    }
}

/// Where the provider takes "now" from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSource {
    SystemClock,
    Fixed(f64),
}

/// Ephemeris provider using the Swiss Ephemeris C library
#[derive(Debug, Clone)]
pub struct SwissEphemeris {
    time_source: TimeSource,
}

impl SwissEphemeris {
    pub fn new(time_source: TimeSource) -> Self {
        init_ephemeris(None);
        Self { time_source }
    }

    /// Provider following the system clock
    pub fn system() -> Self {
        Self::new(TimeSource::SystemClock)
    }

    /// Provider pinned to a fixed Julian Day
    pub fn fixed(julian_day: f64) -> Self {
        Self::new(TimeSource::Fixed(julian_day))
    }

    fn calc(&self, body: Body, julian_day: f64, iflg: i32) -> Result<[f64; 6]> {
        let mut xx: [f64; 6] = [0.0; 6];
        let mut serr: [c_char; 256] = [0; 256];

        let ret = {
            let _guard = lock_swe();
            unsafe {
                libswisseph_sys::swe_calc_ut(
                    julian_day,
                    body.swe_id(),
                    iflg,
                    xx.as_mut_ptr(),
                    serr.as_mut_ptr(),
                )
            }
        };

        if ret < 0 {
            return Err(EphemerisError::unavailable(
                body,
                julian_day,
                error_message(&serr),
            ));
        }
        if xx[..3].iter().any(|v| !v.is_finite()) {
            return Err(EphemerisError::unavailable(
                body,
                julian_day,
                "non-finite coordinates",
            ));
        }

        Ok(xx)
    }

    fn heliocentric_radius(&self, body: Body, julian_day: f64) -> Result<f64> {
        let xx = self.calc(body, julian_day, SEFLG_SWIEPH | SEFLG_HELCTR)?;
        Ok(xx[2])
    }

    fn geocentric_distance(&self, body: Body, julian_day: f64) -> Result<f64> {
        let xx = self.calc(body, julian_day, SEFLG_SWIEPH)?;
        Ok(xx[2])
    }
}

impl EphemerisProvider for SwissEphemeris {
    fn now(&self) -> Result<f64> {
        match self.time_source {
            TimeSource::SystemClock => system_julian_day(),
            TimeSource::Fixed(julian_day) => Ok(julian_day),
        }
    }

    fn ecliptic_position(&self, body: Body, julian_day: f64) -> Result<EclipticPosition> {
        let heliocentric = body.is_heliocentric();
        let iflg = if heliocentric {
            SEFLG_SWIEPH | SEFLG_HELCTR
        } else {
            SEFLG_SWIEPH | SEFLG_TRUEPOS
        };

        let xx = self.calc(body, julian_day, iflg)?;

        Ok(EclipticPosition {
            longitude: xx[0],
            latitude: xx[1],
            radius: xx[2],
            heliocentric,
        })
    }

    fn equatorial_position(&self, body: Body, julian_day: f64) -> Result<EquatorialPosition> {
        if !body.has_equatorial() {
            return Err(EphemerisError::NotApplicable {
                body,
                quantity: "equatorial position",
            });
        }

        let xx = self.calc(body, julian_day, SEFLG_SWIEPH | SEFLG_EQUATORIAL)?;

        Ok(EquatorialPosition {
            right_ascension: xx[0],
            declination: xx[1],
        })
    }

    fn distances(&self, body: Body, julian_day: f64) -> Result<Distances> {
        let earth = if body.has_earth_distance() {
            Some(self.geocentric_distance(body, julian_day)?)
        } else {
            None
        };
        let sun = if body.has_sun_distance() {
            Some(self.heliocentric_radius(body, julian_day)?)
        } else {
            None
        };

        Ok(Distances { earth, sun })
    }

    fn illumination(&self, body: Body, julian_day: f64) -> Result<Illumination> {
        if !body.has_illumination() {
            return Err(EphemerisError::NotApplicable {
                body,
                quantity: "illumination",
            });
        }

        // swe_pheno_ut fills at least 5 values but requires room for 20
        let mut attr: [f64; 20] = [0.0; 20];
        let mut serr: [c_char; 256] = [0; 256];

        let ret = {
            let _guard = lock_swe();
            unsafe {
                libswisseph_sys::swe_pheno_ut(
                    julian_day,
                    body.swe_id(),
                    SEFLG_SWIEPH,
                    attr.as_mut_ptr(),
                    serr.as_mut_ptr(),
                )
            }
        };

        if ret < 0 {
            return Err(EphemerisError::unavailable(
                body,
                julian_day,
                error_message(&serr),
            ));
        }

        Ok(Illumination {
            phase_angle: attr[0],
            illuminated_fraction: attr[1],
            elongation: attr[2],
            apparent_diameter: attr[3],
            magnitude: attr[4],
        })
    }

    fn rise_transit_set(
        &self,
        body: Body,
        observer: &Observer,
        julian_day: f64,
    ) -> Result<RiseSet> {
        if !body.has_rise_set() {
            return Err(EphemerisError::NotApplicable {
                body,
                quantity: "rise/transit/set",
            });
        }

        match rise_set::find_rise_transit_set(body, observer, julian_day)? {
            Some(events) => Ok(RiseSet::Events(events)),
            None => {
                let equatorial = self.equatorial_position(body, julian_day)?;
                Ok(RiseSet::Circumpolar {
                    side: observer.circumpolar_kind(equatorial.declination),
                })
            }
        }
    }
}
