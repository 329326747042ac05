//! Simplified ephemerides: circular orbits tilted by the ecliptic obliquity.
//!
//! Positions are heliocentric, in AU, in the Y-up scene frame. The Moon is
//! composed on top of the Earth's computed position so it always tracks it.

use std::f64::consts::TAU;
use std::fmt;

use helio_core::constants::DAYS_PER_JULIAN_YEAR;
use helio_core::coords::ecliptic_tilt;
use helio_core::time::JulianDate;
use helio_core::vector::{self, Vector3};
use serde::Serialize;
use thiserror::Error;

pub mod bodies;

pub use bodies::{MOON, PLANETS, PlanetaryBody};

/// Heliocentric position in AU.
pub type Position3 = Vector3;

/// Errors surfaced by ephemeris lookups.
#[derive(Debug, Error, PartialEq)]
pub enum EphemerisError {
    #[error("body `{0}` is not in the ephemeris table")]
    InvalidBody(String),
}

/// Bodies covered by the ephemeris table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    pub const ALL: [Body; 9] = [
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Moon,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// The eight planets (everything except the Moon).
    pub const PLANETS: [Body; 8] = [
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// Static orbital record for this body.
    pub fn record(self) -> &'static PlanetaryBody {
        match self {
            Body::Mercury => &PLANETS[0],
            Body::Venus => &PLANETS[1],
            Body::Earth => &PLANETS[2],
            Body::Mars => &PLANETS[3],
            Body::Jupiter => &PLANETS[4],
            Body::Saturn => &PLANETS[5],
            Body::Uranus => &PLANETS[6],
            Body::Neptune => &PLANETS[7],
            Body::Moon => &MOON,
        }
    }

    pub fn name(self) -> &'static str {
        self.record().name
    }

    /// Body this one orbits, if not the Sun.
    pub fn parent(self) -> Option<Body> {
        match self {
            Body::Moon => Some(Body::Earth),
            _ => None,
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Result<Body, EphemerisError> {
        let wanted = name.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EphemerisError::InvalidBody(name.to_string()))
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orbital phase (radians) of a record at `jd`.
///
/// Years since the epoch are wrapped into `[0, period)` before scaling so
/// that dates before J2000 land on the same orbit.
pub fn orbital_phase(record: &PlanetaryBody, jd: JulianDate) -> f64 {
    let period = record.period_years;
    let normalized_year = jd.years_since_j2000().rem_euclid(period);
    record.mean_longitude_j2000_deg.to_radians() + TAU * (normalized_year / period)
}

fn circular_offset(record: &PlanetaryBody, jd: JulianDate) -> Vector3 {
    let theta = orbital_phase(record, jd);
    let r = record.orbital_radius_au;
    let flat = [theta.cos() * r, 0.0, theta.sin() * r];
    vector::rotate_z(&flat, ecliptic_tilt())
}

fn circular_velocity(record: &PlanetaryBody, jd: JulianDate) -> Vector3 {
    let theta = orbital_phase(record, jd);
    let omega = TAU / (record.period_years * DAYS_PER_JULIAN_YEAR);
    let speed = record.orbital_radius_au * omega;
    let flat = [-theta.sin() * speed, 0.0, theta.cos() * speed];
    vector::rotate_z(&flat, ecliptic_tilt())
}

/// Heliocentric position (AU) of `body` at `jd`.
pub fn position_at(body: Body, jd: JulianDate) -> Position3 {
    let local = circular_offset(body.record(), jd);
    match body.parent() {
        Some(parent) => vector::add(&position_at(parent, jd), &local),
        None => local,
    }
}

/// Heliocentric velocity (AU/day) of `body` at `jd`.
pub fn velocity_at(body: Body, jd: JulianDate) -> Vector3 {
    let local = circular_velocity(body.record(), jd);
    match body.parent() {
        Some(parent) => vector::add(&velocity_at(parent, jd), &local),
        None => local,
    }
}

/// Name-based position lookup for callers holding free-form body names.
pub fn position_by_name(name: &str, jd: JulianDate) -> Result<Position3, EphemerisError> {
    Ok(position_at(Body::from_name(name)?, jd))
}

/// Closed polyline tracing the body's orbit (relative to its parent).
///
/// Returns `segments + 1` points; the last repeats the first. The Moon's ring
/// is centred on the origin, the caller offsets it by the Earth's position.
pub fn orbit_path(body: Body, segments: usize) -> Vec<Position3> {
    let segments = segments.max(3);
    let r = body.record().orbital_radius_au;
    let tilt = ecliptic_tilt();
    (0..=segments)
        .map(|i| {
            let theta = TAU * i as f64 / segments as f64;
            vector::rotate_z(&[theta.cos() * r, 0.0, theta.sin() * r], tilt)
        })
        .collect()
}

/// Positions of every body in the table at `jd`.
pub fn snapshot(jd: JulianDate) -> Vec<(Body, Position3)> {
    Body::ALL
        .iter()
        .map(|&body| (body, position_at(body, jd)))
        .collect()
}
