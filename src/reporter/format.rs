//! Human readable rendering of cycle reports

use std::fmt::Write;

use crate::models::{
    BodyOutcome, BodyReport, CircumpolarKind, CycleReport, EventTime, RiseSetReport,
};

/// Hours as `22h 05m 31.42s`
pub fn format_hms(hours: f64) -> String {
    let centis = (hours.rem_euclid(24.0) * 360_000.0).round() as u64 % (24 * 360_000);
    let h = centis / 360_000;
    let m = (centis / 6_000) % 60;
    let s = centis % 6_000;
    format!("{:02}h {:02}m {:02}.{:02}s", h, m, s / 100, s % 100)
}

/// Signed degrees as `-13° 11' 41.0"`
pub fn format_dms(degrees: f64) -> String {
    let tenths = (degrees.abs() * 36_000.0).round() as u64;
    let sign = if degrees < 0.0 && tenths != 0 { '-' } else { '+' };
    let d = tenths / 36_000;
    let m = (tenths / 600) % 60;
    let s = tenths % 600;
    format!("{}{:02}° {:02}' {:02}.{}\"", sign, d, m, s / 10, s % 10)
}

fn format_event(event: &EventTime) -> String {
    event.local.format("%Y-%m-%d %H:%M:%S %:z").to_string()
}

fn write_body(out: &mut String, report: &BodyReport) -> std::fmt::Result {
    let name = report.body.name();
    writeln!(out, "[{}]", name)?;

    let frame = if report.ecliptic.heliocentric {
        "Heliocentric"
    } else {
        "Geometric"
    };
    writeln!(
        out,
        "  {:<13}L {:.6}°  B {:.6}°  R {:.6} AU",
        frame, report.ecliptic.longitude, report.ecliptic.latitude, report.ecliptic.radius
    )?;

    if let Some(equ) = report.equatorial {
        writeln!(
            out,
            "  {:<13}RA {}  Dec {}",
            "Equatorial",
            format_hms(equ.right_ascension_hours()),
            format_dms(equ.declination)
        )?;
    }

    let mut distance = String::new();
    if let Some(earth) = report.distances.earth {
        write!(distance, "Earth {:.6} AU", earth)?;
    }
    if let Some(sun) = report.distances.sun {
        if !distance.is_empty() {
            distance.push_str("  ");
        }
        write!(distance, "Sun {:.6} AU", sun)?;
    }
    if !distance.is_empty() {
        writeln!(out, "  {:<13}{}", "Distance", distance)?;
    }

    if let Some(disk) = report.illumination {
        writeln!(
            out,
            "  {:<13}illuminated {:.4}  magnitude {:.2}  phase {:.4}°",
            "Disk", disk.illuminated_fraction, disk.magnitude, disk.phase_angle
        )?;
    }

    match &report.rise_set {
        Some(RiseSetReport::Events { rise, transit, set }) => {
            writeln!(out, "  {:<13}{}", "Rise", format_event(rise))?;
            writeln!(out, "  {:<13}{}", "Transit", format_event(transit))?;
            writeln!(out, "  {:<13}{}", "Set", format_event(set))?;
        }
        Some(RiseSetReport::Circumpolar { side }) => {
            let side = match side {
                CircumpolarKind::AlwaysAbove => "above",
                CircumpolarKind::AlwaysBelow => "below",
            };
            writeln!(out, "  {} is circumpolar (stays {} the horizon)", name, side)?;
        }
        None => {}
    }

    Ok(())
}

/// Render a whole cycle as text
pub fn render_text(cycle: &CycleReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_cycle(&mut out, cycle);
    out
}

fn write_cycle(out: &mut String, cycle: &CycleReport) -> std::fmt::Result {
    writeln!(
        out,
        "Solar State Computational Data Output (cycle {}, JD {:.6})",
        cycle.iteration, cycle.julian_day
    )?;

    for outcome in &cycle.bodies {
        match outcome {
            BodyOutcome::Reported(report) => write_body(out, report)?,
            BodyOutcome::Skipped { body, reason } => {
                writeln!(out, "[{}]", body)?;
                writeln!(out, "  unavailable this cycle: {}", reason)?;
            }
        }
    }

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Body, Distances, EclipticPosition};

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(22.0), "22h 00m 00.00s");
        assert_eq!(format_hms(1.5), "01h 30m 00.00s");
        // Rounds up into the next minute without printing 60 seconds
        assert_eq!(format_hms(0.999_999_999), "01h 00m 00.00s");
        assert_eq!(format_hms(23.999_999_999), "00h 00m 00.00s");
    }

    #[test]
    fn test_format_dms() {
        assert_eq!(format_dms(-13.5), "-13° 30' 00.0\"");
        assert_eq!(format_dms(23.4392911), "+23° 26' 21.4\"");
        assert_eq!(format_dms(-0.000_000_1), "+00° 00' 00.0\"");
    }

    #[test]
    fn test_skipped_body_has_no_position_lines() {
        let cycle = CycleReport {
            iteration: 4,
            julian_day: 2451545.0,
            bodies: vec![
                BodyOutcome::Skipped {
                    body: Body::Mars,
                    reason: "no data".to_string(),
                },
                BodyOutcome::Reported(BodyReport {
                    body: Body::Earth,
                    julian_day: 2451545.0,
                    ecliptic: EclipticPosition {
                        longitude: 100.0,
                        latitude: 0.0,
                        radius: 0.98,
                        heliocentric: true,
                    },
                    equatorial: None,
                    distances: Distances {
                        earth: None,
                        sun: Some(0.98),
                    },
                    illumination: None,
                    rise_set: None,
                }),
            ],
        };

        let text = render_text(&cycle);
        assert!(text.starts_with(
            "Solar State Computational Data Output (cycle 4, JD 2451545.000000)"
        ));
        assert!(text.contains("[Mars]\n  unavailable this cycle: no data\n"));
        assert!(text.contains("[Earth]\n  Heliocentric L 100.000000°"));
        assert!(text.contains("Distance     Sun 0.980000 AU"));
        assert!(!text.contains("Rise"));
        assert!(!text.contains("Equatorial"));
    }
}
