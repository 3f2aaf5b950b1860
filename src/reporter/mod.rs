//! Periodic reporting loop
//!
//! Each cycle takes a fresh time reference from the provider, builds one
//! report per configured body and writes the whole cycle at once. A body the
//! provider cannot compute is replaced by a skip notice; nothing that happens
//! to a single body ends the loop.

pub mod format;

use std::io::{self, Write};
use std::time::Duration;

use chrono_tz::Tz;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::OutputFormat;
use crate::ephemeris::{julian_day_to_local, EphemerisProvider};
use crate::error::{EphemerisError, Result};
use crate::models::{
    Body, BodyOutcome, BodyReport, CycleReport, EventTime, Observer, RiseSet, RiseSetReport,
};

pub use format::render_text;

/// Runtime settings for the reporting loop
#[derive(Debug, Clone, PartialEq)]
pub struct ReporterConfig {
    pub bodies: Vec<Body>,
    pub observer: Observer,
    pub interval: Duration,
    pub max_iterations: Option<u64>,
    pub timezone: Tz,
    pub format: OutputFormat,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            bodies: Body::default_set(),
            observer: Observer::default(),
            interval: Duration::from_millis(600),
            max_iterations: None,
            timezone: chrono_tz::Europe::London,
            format: OutputFormat::Text,
        }
    }
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub skipped_cycles: u64,
    pub bodies_reported: u64,
    pub bodies_skipped: u64,
}

impl RunSummary {
    fn record(&mut self, cycle: &CycleReport) {
        for outcome in &cycle.bodies {
            if outcome.is_reported() {
                self.bodies_reported += 1;
            } else {
                self.bodies_skipped += 1;
            }
        }
    }
}

/// Stop channel for `Reporter::run`. Send `true`, or drop the sender, to stop.
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

fn event_time(body: Body, julian_day: f64, timezone: Tz) -> Result<EventTime> {
    julian_day_to_local(julian_day, timezone)
        .map(|local| EventTime { julian_day, local })
        .ok_or_else(|| {
            EphemerisError::unavailable(body, julian_day, "event time outside calendar range")
        })
}

fn check_plausible(report: &BodyReport) -> Result<()> {
    let implausible = |what: &str| -> Result<()> {
        Err(EphemerisError::unavailable(report.body, report.julian_day, what))
    };

    if let Some(disk) = report.illumination {
        if !(0.0..=1.0).contains(&disk.illuminated_fraction) {
            return implausible("illuminated fraction outside 0..1");
        }
        if !(0.0..=180.0).contains(&disk.phase_angle) {
            return implausible("phase angle outside 0..180");
        }
    }

    let distances = [report.distances.earth, report.distances.sun];
    if distances.iter().flatten().any(|d| !(d.is_finite() && *d > 0.0)) {
        return implausible("non-positive distance");
    }

    if let Some(RiseSetReport::Events { rise, transit, set }) = &report.rise_set {
        if !(rise.julian_day < transit.julian_day && transit.julian_day < set.julian_day) {
            return implausible("rise, transit and set out of order");
        }
    }

    Ok(())
}

/// Build the complete report for one body, or fail as a whole
pub fn build_body_report<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    observer: &Observer,
    timezone: Tz,
    julian_day: f64,
) -> Result<BodyReport> {
    let ecliptic = provider.ecliptic_position(body, julian_day)?;

    let equatorial = if body.has_equatorial() {
        Some(provider.equatorial_position(body, julian_day)?)
    } else {
        None
    };

    let distances = provider.distances(body, julian_day)?;

    let illumination = if body.has_illumination() {
        Some(provider.illumination(body, julian_day)?)
    } else {
        None
    };

    let rise_set = if body.has_rise_set() {
        let section = match provider.rise_transit_set(body, observer, julian_day)? {
            RiseSet::Events(events) => RiseSetReport::Events {
                rise: event_time(body, events.rise, timezone)?,
                transit: event_time(body, events.transit, timezone)?,
                set: event_time(body, events.set, timezone)?,
            },
            RiseSet::Circumpolar { side } => RiseSetReport::Circumpolar { side },
        };
        Some(section)
    } else {
        None
    };

    let report = BodyReport {
        body,
        julian_day,
        ecliptic,
        equatorial,
        distances,
        illumination,
        rise_set,
    };
    check_plausible(&report)?;

    Ok(report)
}

/// Reporting loop over an ephemeris provider, writing to `output`
pub struct Reporter<P, W> {
    provider: P,
    config: ReporterConfig,
    output: W,
}

impl<P: EphemerisProvider, W: Write> Reporter<P, W> {
    pub fn new(provider: P, config: ReporterConfig, output: W) -> Self {
        Self {
            provider,
            config,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Compute every configured body at a given time reference
    pub fn compute_cycle(&self, iteration: u64, julian_day: f64) -> CycleReport {
        let bodies = self
            .config
            .bodies
            .iter()
            .map(|&body| {
                match build_body_report(
                    &self.provider,
                    body,
                    &self.config.observer,
                    self.config.timezone,
                    julian_day,
                ) {
                    Ok(report) => BodyOutcome::Reported(report),
                    Err(e) => {
                        warn!(iteration, body = %body, error = %e, "Skipping body for this cycle");
                        BodyOutcome::Skipped {
                            body,
                            reason: e.to_string(),
                        }
                    }
                }
            })
            .collect();

        CycleReport {
            iteration,
            julian_day,
            bodies,
        }
    }

    /// Take the current time from the provider and compute a cycle
    pub fn cycle(&self, iteration: u64) -> Result<CycleReport> {
        let julian_day = self.provider.now()?;
        Ok(self.compute_cycle(iteration, julian_day))
    }

    /// Write one cycle in the configured format
    pub fn emit(&mut self, cycle: &CycleReport) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Text => self.output.write_all(render_text(cycle).as_bytes())?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.output, cycle)?;
                self.output.write_all(b"\n")?;
            }
        }
        self.output.flush()
    }

    /// Run until the stop channel fires or `max_iterations` is reached.
    ///
    /// Provider and clock failures are logged and skipped. Only a failure to
    /// write the output ends the loop with an error.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        info!(
            bodies = ?self.config.bodies,
            latitude = self.config.observer.latitude,
            longitude = self.config.observer.longitude,
            interval_ms = self.config.interval.as_millis() as u64,
            "Reporting loop started"
        );

        loop {
            if *shutdown.borrow() || self.limit_reached(&summary) {
                break;
            }

            let iteration = summary.cycles + 1;
            match self.cycle(iteration) {
                Ok(cycle) => {
                    summary.record(&cycle);
                    self.emit(&cycle)?;
                    debug!(iteration, julian_day = cycle.julian_day, "Cycle complete");
                }
                Err(e) => {
                    error!(iteration, error = %e, "Skipping cycle");
                    summary.skipped_cycles += 1;
                }
            }
            summary.cycles = iteration;

            if self.limit_reached(&summary) || !self.pause(&mut shutdown).await {
                break;
            }
        }

        info!(
            cycles = summary.cycles,
            skipped_cycles = summary.skipped_cycles,
            bodies_skipped = summary.bodies_skipped,
            "Reporting loop stopped"
        );

        Ok(summary)
    }

    fn limit_reached(&self, summary: &RunSummary) -> bool {
        self.config
            .max_iterations
            .is_some_and(|max| summary.cycles >= max)
    }

    /// Sleep for the interval; returns false if asked to stop meanwhile
    async fn pause(&self, shutdown: &mut watch::Receiver<bool>) -> bool {
        let sleep = tokio::time::sleep(self.config.interval);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return true,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return false;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_outcomes() {
        let cycle = CycleReport {
            iteration: 1,
            julian_day: 2451545.0,
            bodies: vec![
                BodyOutcome::Skipped {
                    body: Body::Mars,
                    reason: "x".to_string(),
                },
                BodyOutcome::Skipped {
                    body: Body::Sun,
                    reason: "y".to_string(),
                },
            ],
        };

        let mut summary = RunSummary::default();
        summary.record(&cycle);
        assert_eq!(summary.bodies_skipped, 2);
        assert_eq!(summary.bodies_reported, 0);
    }

    #[test]
    fn test_default_config() {
        let config = ReporterConfig::default();
        assert_eq!(config.bodies, vec![Body::Mars, Body::Sun, Body::Earth]);
        assert_eq!(config.interval, Duration::from_millis(600));
    }
}
