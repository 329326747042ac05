//! Boundary distances from ram-pressure balance.
//!
//! Each boundary has a nose distance set by pressure balance and a conic
//! shape `r(θ) = r₀ (1 + e) / (1 + e cos θ)`, where θ is the angle from the
//! nose and `e = flank_ratio − 1`. For `0 ≤ e < 1` this grows monotonically
//! from the nose through the flanks to the tail.

use std::fmt;
use std::str::FromStr;

use helio_core::coords::Direction;
use helio_core::time::JulianDate;
use serde::Serialize;

use crate::model::{HeliosphereModel, ModelError};

/// Standoff is capped so a barely super-magnetosonic flow stays finite.
const MAX_BOW_SHOCK_STANDOFF: f64 = 3.0;

/// The three heliospheric boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoundaryKind {
    TerminationShock,
    Heliopause,
    BowShock,
}

impl BoundaryKind {
    pub const ALL: [BoundaryKind; 3] = [
        BoundaryKind::TerminationShock,
        BoundaryKind::Heliopause,
        BoundaryKind::BowShock,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BoundaryKind::TerminationShock => "termination-shock",
            BoundaryKind::Heliopause => "heliopause",
            BoundaryKind::BowShock => "bow-shock",
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "terminationshock" | "ts" => Ok(BoundaryKind::TerminationShock),
            "heliopause" | "hp" => Ok(BoundaryKind::Heliopause),
            "bowshock" | "bs" => Ok(BoundaryKind::BowShock),
            _ => Err(ModelError::UnknownBoundary(s.to_string())),
        }
    }
}

/// Whether the interstellar flow is fast enough to form a bow shock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BowShockRegime {
    /// Sub-magnetosonic flow: a bow wave, no shock.
    Absent { mach: f64 },
    Present { mach: f64, standoff: f64 },
}

impl BowShockRegime {
    pub fn is_present(&self) -> bool {
        matches!(self, BowShockRegime::Present { .. })
    }
}

/// Conic shape factor relative to the nose distance.
fn shape_factor(flank_ratio: f64, cos_theta: f64) -> f64 {
    let e = flank_ratio - 1.0;
    (1.0 + e) / (1.0 + e * cos_theta)
}

impl HeliosphereModel {
    /// Termination-shock distance towards the nose (AU) at `jd`, where the
    /// solar-wind ram pressure falls to the interstellar pressure.
    pub fn termination_shock_nose_distance(&self, jd: JulianDate) -> f64 {
        (self.solar_wind_pressure_1au_npa(jd) / self.ism_pressure_npa()).sqrt()
    }

    /// Heliopause distance towards the nose (AU) at `jd`.
    pub fn heliopause_nose_distance(&self, jd: JulianDate) -> f64 {
        self.termination_shock_nose_distance(jd) * self.shape.heliopause_to_shock_ratio
    }

    /// Termination-shock distance (AU) along `direction`.
    pub fn termination_shock_distance(
        &self,
        direction: Direction,
        nose: Direction,
        jd: JulianDate,
    ) -> f64 {
        let cos_theta = direction.cos_angle_to(&nose);
        self.termination_shock_nose_distance(jd)
            * shape_factor(self.shape.termination_shock_flank_ratio, cos_theta)
    }

    /// Heliopause distance (AU) along `direction`.
    pub fn heliopause_distance(
        &self,
        direction: Direction,
        nose: Direction,
        jd: JulianDate,
    ) -> f64 {
        let cos_theta = direction.cos_angle_to(&nose);
        self.heliopause_nose_distance(jd)
            * shape_factor(self.shape.heliopause_flank_ratio, cos_theta)
    }

    /// Bow-shock regime of the configured interstellar flow.
    pub fn bow_shock_regime(&self) -> BowShockRegime {
        let mach = self.ism_fast_mach();
        if mach <= 1.0 {
            return BowShockRegime::Absent { mach };
        }
        let gamma = self.ism.adiabatic_index;
        let m2 = mach * mach;
        let density_ratio = ((gamma - 1.0) * m2 + 2.0) / ((gamma + 1.0) * (m2 - 1.0));
        let standoff = (0.8 * density_ratio).min(MAX_BOW_SHOCK_STANDOFF);
        BowShockRegime::Present { mach, standoff }
    }

    /// Bow-shock distance (AU) along `direction`; `None` in every direction
    /// when the interstellar flow is sub-magnetosonic.
    pub fn bow_shock_distance(
        &self,
        direction: Direction,
        nose: Direction,
        jd: JulianDate,
    ) -> Option<f64> {
        match self.bow_shock_regime() {
            BowShockRegime::Absent { .. } => None,
            BowShockRegime::Present { standoff, .. } => {
                Some(self.heliopause_distance(direction, nose, jd) * (1.0 + standoff))
            }
        }
    }
}
