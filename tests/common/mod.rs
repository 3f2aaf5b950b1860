#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use planetwatch::error::{EphemerisError, Result};
use planetwatch::models::{
    Body, CircumpolarKind, Distances, EclipticPosition, EquatorialPosition, Illumination,
    Observer, RiseSet, RiseTransitSet,
};
use planetwatch::EphemerisProvider;

/// Deterministic provider with switchable failures
#[derive(Debug, Default)]
pub struct FakeEphemeris {
    pub julian_day: f64,
    /// Bodies whose ecliptic position always fails
    pub failing: HashSet<Body>,
    /// Bodies whose illumination fails (position still succeeds)
    pub failing_illumination: HashSet<Body>,
    /// Bodies that fail only on even-numbered cycles
    pub flaky: HashSet<Body>,
    pub circumpolar: HashSet<Body>,
    pub clock_fails: bool,
    now_calls: AtomicU64,
}

impl FakeEphemeris {
    pub fn new(julian_day: f64) -> Self {
        Self {
            julian_day,
            ..Self::default()
        }
    }

    pub fn failing(mut self, body: Body) -> Self {
        self.failing.insert(body);
        self
    }

    pub fn failing_illumination(mut self, body: Body) -> Self {
        self.failing_illumination.insert(body);
        self
    }

    pub fn flaky(mut self, body: Body) -> Self {
        self.flaky.insert(body);
        self
    }

    pub fn circumpolar(mut self, body: Body) -> Self {
        self.circumpolar.insert(body);
        self
    }

    pub fn clock_fails(mut self) -> Self {
        self.clock_fails = true;
        self
    }

    pub fn now_calls(&self) -> u64 {
        self.now_calls.load(Ordering::SeqCst)
    }

    fn unavailable(&self, body: Body, julian_day: f64) -> EphemerisError {
        EphemerisError::unavailable(body, julian_day, "date outside ephemeris range")
    }
}

impl EphemerisProvider for FakeEphemeris {
    fn now(&self) -> Result<f64> {
        self.now_calls.fetch_add(1, Ordering::SeqCst);
        if self.clock_fails {
            return Err(EphemerisError::ClockFailure("clock went backwards".to_string()));
        }
        Ok(self.julian_day)
    }

    fn ecliptic_position(&self, body: Body, julian_day: f64) -> Result<EclipticPosition> {
        let even_cycle = self.now_calls() % 2 == 0;
        if self.failing.contains(&body) || (self.flaky.contains(&body) && even_cycle) {
            return Err(self.unavailable(body, julian_day));
        }

        Ok(EclipticPosition {
            longitude: (body.swe_id() as f64 * 30.0 + julian_day.fract() * 10.0) % 360.0,
            latitude: 1.5,
            radius: 1.0 + body.swe_id() as f64 * 0.1,
            heliocentric: body.is_heliocentric(),
        })
    }

    fn equatorial_position(&self, body: Body, _julian_day: f64) -> Result<EquatorialPosition> {
        Ok(EquatorialPosition {
            right_ascension: body.swe_id() as f64 * 20.0,
            declination: -10.0,
        })
    }

    fn distances(&self, body: Body, _julian_day: f64) -> Result<Distances> {
        Ok(Distances {
            earth: body.has_earth_distance().then_some(1.5),
            sun: body.has_sun_distance().then_some(1.2),
        })
    }

    fn illumination(&self, body: Body, julian_day: f64) -> Result<Illumination> {
        if self.failing_illumination.contains(&body) {
            return Err(self.unavailable(body, julian_day));
        }

        Ok(Illumination {
            phase_angle: 30.0,
            illuminated_fraction: 0.93,
            elongation: 120.0,
            apparent_diameter: 0.002,
            magnitude: 0.8,
        })
    }

    fn rise_transit_set(
        &self,
        body: Body,
        observer: &Observer,
        julian_day: f64,
    ) -> Result<RiseSet> {
        if self.circumpolar.contains(&body) {
            return Ok(RiseSet::Circumpolar {
                side: CircumpolarKind::AlwaysAbove,
            });
        }

        let start = observer.local_day_start(julian_day);
        Ok(RiseSet::Events(RiseTransitSet {
            rise: start + 0.3,
            transit: start + 0.5,
            set: start + 0.7,
        }))
    }
}

/// Text blocks of one body, e.g. everything between `[Mars]` and the next header
pub fn body_blocks<'a>(text: &'a str, body: &str) -> Vec<&'a str> {
    let header = format!("[{}]\n", body);
    text.match_indices(&header)
        .map(|(start, _)| {
            let rest = &text[start + header.len()..];
            let end = [rest.find("\n["), rest.find("\n\n")]
                .into_iter()
                .flatten()
                .min()
                .map(|i| i + 1)
                .unwrap_or(rest.len());
            &rest[..end]
        })
        .collect()
}
