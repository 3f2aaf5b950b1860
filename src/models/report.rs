use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::{Body, CircumpolarKind, Distances, EclipticPosition, EquatorialPosition, Illumination};

/// An event instant with its local civil time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventTime {
    pub julian_day: f64,
    pub local: DateTime<FixedOffset>,
}

/// Rise/transit/set section of a body report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiseSetReport {
    Events {
        rise: EventTime,
        transit: EventTime,
        set: EventTime,
    },
    Circumpolar {
        side: CircumpolarKind,
    },
}

/// Complete position report for one body in one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyReport {
    pub body: Body,
    pub julian_day: f64,
    pub ecliptic: EclipticPosition,
    pub equatorial: Option<EquatorialPosition>,
    pub distances: Distances,
    pub illumination: Option<Illumination>,
    pub rise_set: Option<RiseSetReport>,
}

/// What the cycle produced for a body: a full report or a skip notice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BodyOutcome {
    Reported(BodyReport),
    Skipped { body: Body, reason: String },
}

impl BodyOutcome {
    pub fn body(&self) -> Body {
        match self {
            BodyOutcome::Reported(report) => report.body,
            BodyOutcome::Skipped { body, .. } => *body,
        }
    }

    pub fn is_reported(&self) -> bool {
        matches!(self, BodyOutcome::Reported(_))
    }
}

/// Everything computed in one pass of the reporting loop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub iteration: u64,
    pub julian_day: f64,
    pub bodies: Vec<BodyOutcome>,
}
