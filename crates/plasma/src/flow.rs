//! Field samples along a line of sight and the interstellar flow around the heliopause.

use helio_core::coords::Direction;
use helio_core::time::JulianDate;
use helio_core::vector::{self, Vector3};
use serde::Serialize;

use crate::model::HeliosphereModel;
use crate::wind::dynamic_pressure_npa;

/// Plasma region a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    /// Inside the termination shock.
    SupersonicWind,
    /// Between the termination shock and the heliopause.
    Heliosheath,
    /// Outside the heliopause.
    InterstellarMedium,
}

/// Field quantities at one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlasmaFieldSample {
    pub distance_au: f64,
    pub region: Region,
    pub density_cm3: f64,
    pub speed_km_s: f64,
    pub dynamic_pressure_npa: f64,
}

/// Direction the interstellar wind flows towards: away from the nose.
pub fn interstellar_wind_direction(nose: Direction) -> Direction {
    nose.reversed()
}

impl HeliosphereModel {
    /// Region, density, speed and ram pressure at `distance_au` along `direction`.
    ///
    /// Density jumps by the compression ratio across the termination shock
    /// while the speed drops by the same factor, conserving mass flux. Beyond
    /// the heliopause the sample describes the interstellar flow.
    pub fn plasma_sample(
        &self,
        distance_au: f64,
        direction: Direction,
        nose: Direction,
        jd: JulianDate,
    ) -> PlasmaFieldSample {
        let shock = self.termination_shock_distance(direction, nose, jd);
        let heliopause = self.heliopause_distance(direction, nose, jd);

        let (region, density_cm3, speed_km_s) = if distance_au < shock {
            (
                Region::SupersonicWind,
                self.solar_wind_density(distance_au),
                self.solar_wind_velocity_with_shock(distance_au, shock),
            )
        } else if distance_au < heliopause {
            (
                Region::Heliosheath,
                self.solar_wind_density(distance_au) * self.shape.shock_compression_ratio,
                self.solar_wind_velocity_with_shock(distance_au, shock),
            )
        } else {
            let flow = self.ism_flow_velocity(&direction.at_distance(distance_au), nose, jd);
            (
                Region::InterstellarMedium,
                self.ism.density_cm3,
                vector::norm(&flow),
            )
        };

        PlasmaFieldSample {
            distance_au,
            region,
            density_cm3,
            speed_km_s,
            dynamic_pressure_npa: dynamic_pressure_npa(density_cm3, speed_km_s),
        }
    }

    /// Interstellar flow velocity (km/s) at `position` (AU).
    ///
    /// Potential flow around a sphere whose radius is the heliopause distance
    /// in the direction of `position`: the radial component vanishes on the
    /// heliopause and the flow relaxes to the uniform wind far away. Points on
    /// or inside the heliopause get zero.
    pub fn ism_flow_velocity(
        &self,
        position: &Vector3,
        nose: Direction,
        jd: JulianDate,
    ) -> Vector3 {
        let Some(dir) = Direction::new(*position) else {
            return [0.0; 3];
        };
        let r = vector::norm(position);
        let radius = self.heliopause_distance(dir, nose, jd);
        if r <= radius {
            return [0.0; 3];
        }
        let uniform = interstellar_wind_direction(nose).at_distance(self.ism.speed_km_s);
        let r_hat = dir.as_vector();
        let along = vector::dot(&uniform, r_hat);
        let k = 0.5 * (radius / r).powi(3);
        let dipole = vector::sub(&uniform, &vector::scale(r_hat, 3.0 * along));
        vector::add(&uniform, &vector::scale(&dipole, k))
    }
}
