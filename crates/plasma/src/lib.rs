//! Heliospheric plasma physics.
//!
//! Closed-form solar-wind and interstellar-medium quantities and the
//! anisotropic boundary distances that follow from ram-pressure balance:
//! compressed towards the nose, elongated towards the tail. Every function is
//! a pure function of its arguments and the [`HeliosphereModel`] parameters.

pub mod boundary;
pub mod flow;
pub mod model;
pub mod wind;

pub use boundary::{BoundaryKind, BowShockRegime};
pub use flow::{PlasmaFieldSample, Region, interstellar_wind_direction};
pub use model::{
    BoundaryShape, HeliosphereModel, InterstellarParams, ModelError, SolarCycle, SolarWindParams,
};
pub use wind::dynamic_pressure_npa;
