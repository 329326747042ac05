//! Model parameters and their validation.

use std::f64::consts::TAU;
use std::ops::Range;

use helio_core::constants::DAYS_PER_JULIAN_YEAR;
use helio_core::time::JulianDate;
use serde::Serialize;
use thiserror::Error;

/// Errors raised when a parameter set is not physically meaningful.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("parameter `{name}` = {value} is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("unknown boundary `{0}` (expected termination-shock, heliopause or bow-shock)")]
    UnknownBoundary(String),
}

/// Upstream solar-wind parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarWindParams {
    /// Proton density at 1 AU (cm⁻³).
    pub density_1au_cm3: f64,
    /// Supersonic wind speed (km/s).
    pub speed_km_s: f64,
    /// Distances below this floor are evaluated at the floor (AU).
    pub min_distance_au: f64,
}

/// Pristine local interstellar medium.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterstellarParams {
    /// Plasma density (cm⁻³).
    pub density_cm3: f64,
    /// Flow speed relative to the Sun (km/s).
    pub speed_km_s: f64,
    pub temperature_k: f64,
    pub magnetic_field_nt: f64,
    pub adiabatic_index: f64,
}

/// Shape of the boundaries relative to their nose distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryShape {
    /// Termination-shock distance perpendicular to the nose, over the nose distance.
    pub termination_shock_flank_ratio: f64,
    /// Heliopause distance perpendicular to the nose, over the nose distance.
    pub heliopause_flank_ratio: f64,
    /// Heliopause nose over termination-shock nose.
    pub heliopause_to_shock_ratio: f64,
    /// Density jump (and speed drop) across the termination shock.
    pub shock_compression_ratio: f64,
    /// Width of the smoothed speed drop at the shock (AU).
    pub shock_width_au: f64,
}

/// Solar-cycle modulation of the solar-wind ram pressure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarCycle {
    pub period_years: f64,
    /// Fractional pressure swing; the factor is `1 + A cos(phase)`.
    pub pressure_amplitude: f64,
    /// Epoch of a ram-pressure maximum.
    pub reference_maximum: JulianDate,
}

/// Complete parameter set of the heliosphere model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeliosphereModel {
    pub solar_wind: SolarWindParams,
    pub ism: InterstellarParams,
    pub shape: BoundaryShape,
    pub solar_cycle: SolarCycle,
}

impl Default for SolarWindParams {
    fn default() -> Self {
        Self {
            density_1au_cm3: 7.0,
            speed_km_s: 400.0,
            min_distance_au: 0.01,
        }
    }
}

impl Default for InterstellarParams {
    fn default() -> Self {
        Self {
            density_cm3: 0.09,
            speed_km_s: 26.0,
            temperature_k: 7_500.0,
            magnetic_field_nt: 0.55,
            adiabatic_index: 5.0 / 3.0,
        }
    }
}

impl Default for BoundaryShape {
    fn default() -> Self {
        Self {
            termination_shock_flank_ratio: 1.05,
            heliopause_flank_ratio: 1.2,
            heliopause_to_shock_ratio: 1.32,
            shock_compression_ratio: 2.5,
            shock_width_au: 2.0,
        }
    }
}

impl Default for SolarCycle {
    fn default() -> Self {
        Self {
            period_years: 11.0,
            pressure_amplitude: 0.08,
            // 2003-03-01: the pressure reaching the boundaries lags the 2001 solar maximum
            reference_maximum: JulianDate::new(2_452_699.5),
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}

fn within(
    name: &'static str,
    value: f64,
    range: Range<f64>,
    reason: &'static str,
) -> Result<(), ModelError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

impl HeliosphereModel {
    /// Check every parameter; returns the first violation found.
    pub fn validate(&self) -> Result<(), ModelError> {
        positive("solar_wind.density_1au_cm3", self.solar_wind.density_1au_cm3)?;
        positive("solar_wind.speed_km_s", self.solar_wind.speed_km_s)?;
        positive("solar_wind.min_distance_au", self.solar_wind.min_distance_au)?;

        positive("ism.density_cm3", self.ism.density_cm3)?;
        positive("ism.speed_km_s", self.ism.speed_km_s)?;
        positive("ism.temperature_k", self.ism.temperature_k)?;
        if !(self.ism.magnetic_field_nt.is_finite() && self.ism.magnetic_field_nt >= 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "ism.magnetic_field_nt",
                value: self.ism.magnetic_field_nt,
                reason: "must be finite and non-negative",
            });
        }
        within(
            "ism.adiabatic_index",
            self.ism.adiabatic_index,
            1.0..3.0,
            "must lie in [1, 3)",
        )?;

        // the conic shape needs eccentricity 0 <= e < 1
        within(
            "shape.termination_shock_flank_ratio",
            self.shape.termination_shock_flank_ratio,
            1.0..2.0,
            "must lie in [1, 2)",
        )?;
        within(
            "shape.heliopause_flank_ratio",
            self.shape.heliopause_flank_ratio,
            1.0..2.0,
            "must lie in [1, 2)",
        )?;
        within(
            "shape.heliopause_to_shock_ratio",
            self.shape.heliopause_to_shock_ratio,
            1.0..f64::INFINITY,
            "heliopause must lie beyond the termination shock",
        )?;
        within(
            "shape.shock_compression_ratio",
            self.shape.shock_compression_ratio,
            1.0..4.000_001,
            "must lie in [1, 4]",
        )?;
        positive("shape.shock_width_au", self.shape.shock_width_au)?;

        positive("solar_cycle.period_years", self.solar_cycle.period_years)?;
        within(
            "solar_cycle.pressure_amplitude",
            self.solar_cycle.pressure_amplitude,
            0.0..1.0,
            "must lie in [0, 1)",
        )?;
        if !self.solar_cycle.reference_maximum.value().is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "solar_cycle.reference_maximum",
                value: self.solar_cycle.reference_maximum.value(),
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Multiplier applied to the solar-wind ram pressure at `jd`.
    pub fn pressure_cycle_factor(&self, jd: JulianDate) -> f64 {
        let cycle = &self.solar_cycle;
        let years = jd.days_since(cycle.reference_maximum) / DAYS_PER_JULIAN_YEAR;
        1.0 + cycle.pressure_amplitude * (TAU * years / cycle.period_years).cos()
    }
}
