//! Voyager trajectory model.
//!
//! Each track is generated once from its waypoint table and stored as dense
//! `(jd, position, velocity)` samples; every later query is an interpolation
//! over those samples. Positions are heliocentric AU in the scene frame,
//! velocities AU/day.

use std::fmt;
use std::sync::OnceLock;

use helio_core::constants::{AU_KM, DAYS_PER_JULIAN_YEAR, SPEED_OF_LIGHT_KM_S};
use helio_core::coords::{Direction, ecliptic_to_vec3};
use helio_core::time::JulianDate;
use helio_core::units::au_per_day_to_km_s;
use helio_core::vector::{self, Vector3};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod waypoints;

use waypoints::{Anchor, FlightPlan, VOYAGER_1, VOYAGER_2};

/// Spacing between stored samples (days).
pub const SAMPLE_STEP_DAYS: f64 = 10.0;
/// Last stored sample (2050-01-01); later dates are extrapolated.
pub const HORIZON_JD: f64 = 2_469_807.5;

const DIFFERENCE_HALF_STEP_DAYS: f64 = 0.5;

/// Errors surfaced by trajectory queries.
#[derive(Debug, Error, PartialEq)]
pub enum TrajectoryError {
    #[error("spacecraft `{0}` has no trajectory")]
    InvalidBody(String),
    #[error("{spacecraft} trajectory starts at JD {launch}; JD {jd} is before launch")]
    OutOfRangeDate {
        spacecraft: Spacecraft,
        jd: f64,
        launch: f64,
    },
}

/// Spacecraft with a compiled-in trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Spacecraft {
    Voyager1,
    Voyager2,
}

impl Spacecraft {
    pub const ALL: [Spacecraft; 2] = [Spacecraft::Voyager1, Spacecraft::Voyager2];

    pub fn name(self) -> &'static str {
        match self {
            Spacecraft::Voyager1 => "Voyager 1",
            Spacecraft::Voyager2 => "Voyager 2",
        }
    }

    /// Lookup ignoring case, spaces, `-` and `_` ("Voyager 1", "voyager_1", "voyager1").
    pub fn from_name(name: &str) -> Result<Spacecraft, TrajectoryError> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "voyager1" | "v1" => Ok(Spacecraft::Voyager1),
            "voyager2" | "v2" => Ok(Spacecraft::Voyager2),
            _ => Err(TrajectoryError::InvalidBody(name.to_string())),
        }
    }

    fn flight_plan(self) -> &'static FlightPlan {
        match self {
            Spacecraft::Voyager1 => &VOYAGER_1,
            Spacecraft::Voyager2 => &VOYAGER_2,
        }
    }
}

impl fmt::Display for Spacecraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One stored trajectory sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub jd: JulianDate,
    pub position_au: Vector3,
    pub velocity_au_day: Vector3,
}

/// Interpolated state with derived read-only quantities.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpacecraftState {
    pub spacecraft: Spacecraft,
    pub jd: JulianDate,
    pub position_au: Vector3,
    pub velocity_au_day: Vector3,
    pub distance_au: f64,
    pub speed_km_s: f64,
    /// One-way light time from the Sun (hours).
    pub light_time_hours: f64,
}

/// A labelled event along a trajectory (launch, flyby, boundary crossing).
#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub label: &'static str,
    pub jd: JulianDate,
    pub distance_au: f64,
}

/// Waypoint resolved to a concrete distance and direction.
#[derive(Debug, Clone, Copy)]
struct ResolvedWaypoint {
    label: &'static str,
    jd: f64,
    distance_au: f64,
    direction: Direction,
}

/// Piecewise model through the resolved waypoints: distance linear in time,
/// direction along the great circle.
struct WaypointModel {
    points: Vec<ResolvedWaypoint>,
    cruise_speed_au_day: f64,
}

impl WaypointModel {
    fn resolve(plan: &FlightPlan) -> Self {
        let points = plan
            .waypoints
            .iter()
            .map(|wp| {
                let (distance_au, direction) = match wp.anchor {
                    Anchor::Body(body) => {
                        let p = helio_ephemeris::position_at(body, JulianDate::new(wp.jd));
                        // every table body orbits well clear of the origin
                        (vector::norm(&p), Direction::new(p).unwrap_or(Direction::X))
                    }
                    Anchor::Ecliptic {
                        distance_au,
                        lon_deg,
                        lat_deg,
                    } => (
                        distance_au,
                        ecliptic_to_vec3(lon_deg.to_radians(), lat_deg.to_radians()),
                    ),
                };
                ResolvedWaypoint {
                    label: wp.label,
                    jd: wp.jd,
                    distance_au,
                    direction,
                }
            })
            .collect();
        Self {
            points,
            cruise_speed_au_day: plan.cruise_speed_au_per_year / DAYS_PER_JULIAN_YEAR,
        }
    }

    fn launch(&self) -> f64 {
        self.points[0].jd
    }

    fn position(&self, jd: f64) -> Vector3 {
        let points = &self.points;
        let last = points[points.len() - 1];
        if jd >= last.jd {
            let distance = last.distance_au + self.cruise_speed_au_day * (jd - last.jd);
            return last.direction.at_distance(distance);
        }
        let jd = jd.max(points[0].jd);
        let idx = points.partition_point(|p| p.jd <= jd).clamp(1, points.len() - 1);
        let (a, b) = (points[idx - 1], points[idx]);
        let s = (jd - a.jd) / (b.jd - a.jd);
        let distance = a.distance_au + (b.distance_au - a.distance_au) * s;
        a.direction.slerp(&b.direction, s).at_distance(distance)
    }

    fn velocity(&self, jd: f64) -> Vector3 {
        let t0 = (jd - DIFFERENCE_HALF_STEP_DAYS).max(self.launch());
        let t1 = jd + DIFFERENCE_HALF_STEP_DAYS;
        let dp = vector::sub(&self.position(t1), &self.position(t0));
        vector::scale(&dp, 1.0 / (t1 - t0))
    }
}

/// Precomputed trajectory of one spacecraft.
#[derive(Debug, Clone)]
pub struct Trajectory {
    spacecraft: Spacecraft,
    samples: Vec<TrajectorySample>,
    milestones: Vec<Milestone>,
}

/// Build the full historical trajectory of `spacecraft`.
pub fn generate_trajectory(spacecraft: Spacecraft) -> Trajectory {
    let model = WaypointModel::resolve(spacecraft.flight_plan());
    let launch = model.launch();

    let count = ((HORIZON_JD - launch) / SAMPLE_STEP_DAYS).ceil() as usize;
    let mut samples = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let jd = (launch + i as f64 * SAMPLE_STEP_DAYS).min(HORIZON_JD);
        samples.push(TrajectorySample {
            jd: JulianDate::new(jd),
            position_au: model.position(jd),
            velocity_au_day: model.velocity(jd),
        });
    }

    let milestones = model
        .points
        .iter()
        .map(|p| Milestone {
            label: p.label,
            jd: JulianDate::new(p.jd),
            distance_au: p.distance_au,
        })
        .collect();

    debug!(
        spacecraft = spacecraft.name(),
        samples = samples.len(),
        "generated trajectory"
    );

    Trajectory {
        spacecraft,
        samples,
        milestones,
    }
}

impl Trajectory {
    pub fn spacecraft(&self) -> Spacecraft {
        self.spacecraft
    }

    pub fn launch_date(&self) -> JulianDate {
        self.samples[0].jd
    }

    /// Last stored sample epoch; later queries extrapolate linearly.
    pub fn end_date(&self) -> JulianDate {
        self.samples[self.samples.len() - 1].jd
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn position_series(&self) -> impl Iterator<Item = &Vector3> + '_ {
        self.samples.iter().map(|s| &s.position_au)
    }

    pub fn velocity_series(&self) -> impl Iterator<Item = &Vector3> + '_ {
        self.samples.iter().map(|s| &s.velocity_au_day)
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    fn check_range(&self, jd: JulianDate) -> Result<(), TrajectoryError> {
        let launch = self.launch_date();
        if jd < launch || !jd.value().is_finite() {
            return Err(TrajectoryError::OutOfRangeDate {
                spacecraft: self.spacecraft,
                jd: jd.value(),
                launch: launch.value(),
            });
        }
        Ok(())
    }

    /// Interpolated position and velocity at `jd`.
    ///
    /// Inside the sampled span this is a cubic Hermite spline through the
    /// bracketing samples, so the curve passes through every sample and is
    /// continuous across sample boundaries.
    pub fn interpolate_state(&self, jd: JulianDate) -> Result<(Vector3, Vector3), TrajectoryError> {
        self.check_range(jd)?;
        let t = jd.value();
        let idx = self.samples.partition_point(|s| s.jd.value() <= t);
        if idx >= self.samples.len() {
            let last = &self.samples[self.samples.len() - 1];
            let dt = t - last.jd.value();
            let drift = vector::scale(&last.velocity_au_day, dt);
            let position = vector::add(&last.position_au, &drift);
            return Ok((position, last.velocity_au_day));
        }
        // check_range guarantees t >= samples[0].jd, so idx >= 1
        let (a, b) = (&self.samples[idx - 1], &self.samples[idx]);
        let h = b.jd.value() - a.jd.value();
        let s = (t - a.jd.value()) / h;
        Ok(hermite(a, b, h, s))
    }

    /// Interpolated position (AU) at `jd`.
    pub fn interpolate(&self, jd: JulianDate) -> Result<Vector3, TrajectoryError> {
        self.interpolate_state(jd).map(|(position, _)| position)
    }

    /// Position plus derived distance, speed and light time.
    pub fn state(&self, jd: JulianDate) -> Result<SpacecraftState, TrajectoryError> {
        let (position_au, velocity_au_day) = self.interpolate_state(jd)?;
        let distance_au = vector::norm(&position_au);
        Ok(SpacecraftState {
            spacecraft: self.spacecraft,
            jd,
            position_au,
            velocity_au_day,
            distance_au,
            speed_km_s: au_per_day_to_km_s(vector::norm(&velocity_au_day)),
            light_time_hours: distance_au * AU_KM / SPEED_OF_LIGHT_KM_S / 3_600.0,
        })
    }

    /// Evenly spaced positions between `from` and `to` for drawing a trail.
    ///
    /// `from` is clamped to the launch date; a window ending before launch is
    /// an error. At least two points are returned for a non-empty window.
    pub fn trail(
        &self,
        from: JulianDate,
        to: JulianDate,
        max_points: usize,
    ) -> Result<Vec<Vector3>, TrajectoryError> {
        self.check_range(to)?;
        let start = if from < self.launch_date() {
            self.launch_date()
        } else {
            from
        };
        if to < start {
            return Ok(Vec::new());
        }
        let n = max_points.max(2);
        let span = to.days_since(start);
        (0..n)
            .map(|i| self.interpolate(start.add_days(span * i as f64 / (n - 1) as f64)))
            .collect()
    }
}

fn hermite(a: &TrajectorySample, b: &TrajectorySample, h: f64, s: f64) -> (Vector3, Vector3) {
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    let d00 = 6.0 * s2 - 6.0 * s;
    let d10 = 3.0 * s2 - 4.0 * s + 1.0;
    let d01 = -6.0 * s2 + 6.0 * s;
    let d11 = 3.0 * s2 - 2.0 * s;

    let mut position = [0.0; 3];
    let mut velocity = [0.0; 3];
    for k in 0..3 {
        let (p0, p1) = (a.position_au[k], b.position_au[k]);
        let (m0, m1) = (a.velocity_au_day[k] * h, b.velocity_au_day[k] * h);
        position[k] = h00 * p0 + h10 * m0 + h01 * p1 + h11 * m1;
        velocity[k] = (d00 * p0 + d10 * m0 + d01 * p1 + d11 * m1) / h;
    }
    (position, velocity)
}

/// Both Voyager trajectories.
#[derive(Debug, Clone)]
pub struct TrajectoryCatalog {
    voyager1: Trajectory,
    voyager2: Trajectory,
}

impl TrajectoryCatalog {
    pub fn generate() -> Self {
        Self {
            voyager1: generate_trajectory(Spacecraft::Voyager1),
            voyager2: generate_trajectory(Spacecraft::Voyager2),
        }
    }

    pub fn get(&self, spacecraft: Spacecraft) -> &Trajectory {
        match spacecraft {
            Spacecraft::Voyager1 => &self.voyager1,
            Spacecraft::Voyager2 => &self.voyager2,
        }
    }

    pub fn by_name(&self, name: &str) -> Result<&Trajectory, TrajectoryError> {
        Spacecraft::from_name(name).map(|s| self.get(s))
    }
}

/// Process-wide trajectory catalog, generated on first use.
pub fn voyager_tracks() -> &'static TrajectoryCatalog {
    static TRACKS: OnceLock<TrajectoryCatalog> = OnceLock::new();
    TRACKS.get_or_init(TrajectoryCatalog::generate)
}
