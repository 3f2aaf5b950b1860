//! Julian Day conversions backed by the Swiss Ephemeris calendar routines

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{EphemerisError, Result};

const SE_GREG_CAL: i32 = 1;

/// Convert a UTC date/time to Julian Day (UT)
pub fn datetime_to_julian_day(datetime: DateTime<Utc>) -> f64 {
    let year = datetime.year();
    let month = datetime.month() as i32;
    let day = datetime.day() as i32;
    let seconds = datetime.second() as f64 + datetime.nanosecond() as f64 / 1e9;
    let hour = datetime.hour() as f64 + datetime.minute() as f64 / 60.0 + seconds / 3600.0;

    unsafe { libswisseph_sys::swe_julday(year, month, day, hour, SE_GREG_CAL) }
}

/// Convert a Julian Day (UT) back to a UTC date/time, millisecond precision
pub fn julian_day_to_datetime(julian_day: f64) -> Option<DateTime<Utc>> {
    if !julian_day.is_finite() {
        return None;
    }

    let mut year: i32 = 0;
    let mut month: i32 = 0;
    let mut day: i32 = 0;
    let mut hour: f64 = 0.0;

    unsafe {
        libswisseph_sys::swe_revjul(
            julian_day,
            SE_GREG_CAL,
            &mut year,
            &mut month,
            &mut day,
            &mut hour,
        );
    }

    let midnight = NaiveDate::from_ymd_opt(year, month as u32, day as u32)?.and_hms_opt(0, 0, 0)?;
    let millis = (hour * 3_600_000.0).round() as i64;

    Some(Utc.from_utc_datetime(&midnight) + Duration::milliseconds(millis))
}

/// Current Julian Day (UT) from the system clock
pub fn system_julian_day() -> Result<f64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| EphemerisError::ClockFailure(e.to_string()))?;

    let now = DateTime::<Utc>::from_timestamp(elapsed.as_secs() as i64, elapsed.subsec_nanos())
        .ok_or_else(|| EphemerisError::ClockFailure("timestamp out of range".to_string()))?;

    Ok(datetime_to_julian_day(now))
}

/// Local civil time of a Julian Day in the given time zone
pub fn julian_day_to_local(julian_day: f64, timezone: Tz) -> Option<DateTime<FixedOffset>> {
    julian_day_to_datetime(julian_day).map(|utc| utc.with_timezone(&timezone).fixed_offset())
}

/// Parse an IANA time zone name such as "Europe/London"
pub fn parse_timezone(name: &str) -> std::result::Result<Tz, String> {
    name.parse().map_err(|_| format!("Invalid timezone: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_epoch() {
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = datetime_to_julian_day(noon);
        assert!((jd - 2451545.0).abs() < 1e-9);
    }

    #[test]
    fn test_julian_day_to_datetime() {
        let dt = julian_day_to_datetime(2451545.25).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2000, 1, 1, 18, 0, 0).unwrap());

        assert!(julian_day_to_datetime(f64::NAN).is_none());
    }

    #[test]
    fn test_local_time_uses_daylight_saving() {
        let tz = parse_timezone("Europe/London").unwrap();
        // 2000-06-21 12:00 UT
        let local = julian_day_to_local(2451717.0, tz).unwrap();
        assert_eq!(local.offset().local_minus_utc(), 3600);
        assert_eq!(local.hour(), 13);

        let winter = julian_day_to_local(2451545.0, tz).unwrap();
        assert_eq!(winter.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_system_clock_is_modern() {
        let jd = system_julian_day().unwrap();
        // After 2020-01-01
        assert!(jd > 2458849.5);
    }

    #[test]
    fn test_invalid_timezone() {
        assert!(parse_timezone("Mars/Olympus_Mons").is_err());
    }
}
