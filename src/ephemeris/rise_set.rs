//! Rise, transit and set searches using Swiss Ephemeris

use std::ffi::c_char;

use super::swiss::{error_message, lock_swe, SEFLG_SWIEPH};
use crate::error::{EphemerisError, Result};
use crate::models::{Body, Observer, RiseTransitSet};

// Event selectors for swe_rise_trans
const SE_CALC_RISE: i32 = 1;
const SE_CALC_SET: i32 = 2;
const SE_CALC_MTRANSIT: i32 = 4;

/// swe_rise_trans return code for a body that does not rise or set
const CIRCUMPOLAR: i32 = -2;

// Standard atmosphere for refraction
const PRESSURE_HPA: f64 = 1013.25;
const TEMPERATURE_C: f64 = 10.0;

/// Find the next occurrence of `event` after `start_julian_day`.
/// `Ok(None)` means the body never crosses the horizon.
fn next_event(
    body: Body,
    observer: &Observer,
    start_julian_day: f64,
    event: i32,
) -> Result<Option<f64>> {
    // Swiss Ephemeris wants longitude, latitude, height
    let mut geopos: [f64; 3] = [observer.longitude, observer.latitude, observer.altitude];
    let mut tret: [f64; 10] = [0.0; 10];
    let mut serr: [c_char; 256] = [0; 256];

    let ret = {
        let _guard = lock_swe();
        unsafe {
            libswisseph_sys::swe_rise_trans(
                start_julian_day,
                body.swe_id(),
                std::ptr::null_mut(),
                SEFLG_SWIEPH,
                event,
                geopos.as_mut_ptr(),
                PRESSURE_HPA,
                TEMPERATURE_C,
                tret.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    };

    match ret {
        CIRCUMPOLAR => Ok(None),
        r if r < 0 => Err(EphemerisError::unavailable(
            body,
            start_julian_day,
            error_message(&serr),
        )),
        _ if !tret[0].is_finite() || tret[0] <= start_julian_day => Err(
            EphemerisError::unavailable(body, start_julian_day, "rise/set search did not advance"),
        ),
        _ => Ok(Some(tret[0])),
    }
}

/// Rise, transit and set for the observer's local day containing `julian_day`.
///
/// The search starts at local mean midnight; transit is searched from the
/// rise and set from the transit, so the three instants are strictly
/// increasing. Returns `Ok(None)` for a circumpolar body.
pub fn find_rise_transit_set(
    body: Body,
    observer: &Observer,
    julian_day: f64,
) -> Result<Option<RiseTransitSet>> {
    let day_start = observer.local_day_start(julian_day);

    let Some(rise) = next_event(body, observer, day_start, SE_CALC_RISE)? else {
        return Ok(None);
    };
    let Some(transit) = next_event(body, observer, rise, SE_CALC_MTRANSIT)? else {
        return Ok(None);
    };
    let Some(set) = next_event(body, observer, transit, SE_CALC_SET)? else {
        return Ok(None);
    };

    Ok(Some(RiseTransitSet { rise, transit, set }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::init_ephemeris;

    #[test]
    fn test_sun_events_are_ordered() {
        init_ephemeris(None);
        let events = find_rise_transit_set(Body::Sun, &Observer::edinburgh(), 2451545.0)
            .unwrap()
            .expect("the Sun rises in Edinburgh in January");

        assert!(events.is_ordered());
        // Within the same local day
        assert!(events.set - events.rise < 1.0);
    }

    #[test]
    fn test_polar_day_has_no_events() {
        init_ephemeris(None);
        let longyearbyen = Observer::new(78.22, 15.65);
        // 2000-06-21 12:00 UT
        let events = find_rise_transit_set(Body::Sun, &longyearbyen, 2451717.0).unwrap();
        assert!(events.is_none());
    }
}
