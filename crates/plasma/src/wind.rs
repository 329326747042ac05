//! Solar-wind and interstellar pressures.

use helio_core::constants::{BOLTZMANN_J_K, MU0, PROTON_MASS_KG};
use helio_core::coords::Direction;
use helio_core::time::JulianDate;
use helio_core::units::{nt_to_t, per_cm3_to_per_m3};

use crate::model::HeliosphereModel;

const PA_TO_NPA: f64 = 1.0e9;

/// Proton ram pressure `ρ v²` in nPa for a density (cm⁻³) and speed (km/s).
pub fn dynamic_pressure_npa(density_cm3: f64, speed_km_s: f64) -> f64 {
    let rho = PROTON_MASS_KG * per_cm3_to_per_m3(density_cm3);
    let v = speed_km_s * 1.0e3;
    rho * v * v * PA_TO_NPA
}

impl HeliosphereModel {
    /// Solar-wind proton density (cm⁻³) at `distance_au`: inverse-square
    /// falloff, evaluated no closer than the model's distance floor.
    pub fn solar_wind_density(&self, distance_au: f64) -> f64 {
        let r = distance_au.max(self.solar_wind.min_distance_au);
        self.solar_wind.density_1au_cm3 / (r * r)
    }

    /// Solar-wind speed (km/s) for a known termination-shock distance.
    ///
    /// Constant upstream, then a tanh drop by the compression ratio centred on
    /// the shock. Never increases with distance.
    pub fn solar_wind_velocity_with_shock(&self, distance_au: f64, shock_distance_au: f64) -> f64 {
        let upstream = self.solar_wind.speed_km_s;
        let downstream = upstream / self.shape.shock_compression_ratio;
        let x = (distance_au - shock_distance_au) / self.shape.shock_width_au;
        downstream + (upstream - downstream) * 0.5 * (1.0 - x.tanh())
    }

    /// Solar-wind speed (km/s) at `distance_au` along `direction`, with the
    /// shock placed at that direction's termination-shock distance.
    pub fn solar_wind_velocity(
        &self,
        distance_au: f64,
        direction: Direction,
        nose: Direction,
        jd: JulianDate,
    ) -> f64 {
        let shock = self.termination_shock_distance(direction, nose, jd);
        self.solar_wind_velocity_with_shock(distance_au, shock)
    }

    /// Solar-wind ram pressure at 1 AU (nPa), including the solar-cycle swing.
    pub fn solar_wind_pressure_1au_npa(&self, jd: JulianDate) -> f64 {
        dynamic_pressure_npa(self.solar_wind.density_1au_cm3, self.solar_wind.speed_km_s)
            * self.pressure_cycle_factor(jd)
    }

    /// Interstellar ram pressure (nPa).
    pub fn ism_ram_pressure_npa(&self) -> f64 {
        dynamic_pressure_npa(self.ism.density_cm3, self.ism.speed_km_s)
    }

    /// Interstellar thermal pressure of protons and electrons, `2 n k T` (nPa).
    pub fn ism_thermal_pressure_npa(&self) -> f64 {
        2.0 * per_cm3_to_per_m3(self.ism.density_cm3) * BOLTZMANN_J_K * self.ism.temperature_k
            * PA_TO_NPA
    }

    /// Interstellar magnetic pressure `B² / 2μ₀` (nPa).
    pub fn ism_magnetic_pressure_npa(&self) -> f64 {
        let b = nt_to_t(self.ism.magnetic_field_nt);
        b * b / (2.0 * MU0) * PA_TO_NPA
    }

    /// Total confining interstellar pressure (nPa).
    pub fn ism_pressure_npa(&self) -> f64 {
        self.ism_ram_pressure_npa()
            + self.ism_thermal_pressure_npa()
            + self.ism_magnetic_pressure_npa()
    }

    /// Interstellar sound speed (km/s), using the proton + electron pressure.
    pub fn ism_sound_speed_km_s(&self) -> f64 {
        let kt_over_m = 2.0 * BOLTZMANN_J_K * self.ism.temperature_k / PROTON_MASS_KG;
        (self.ism.adiabatic_index * kt_over_m).sqrt() / 1.0e3
    }

    /// Interstellar Alfvén speed (km/s).
    pub fn ism_alfven_speed_km_s(&self) -> f64 {
        let rho = PROTON_MASS_KG * per_cm3_to_per_m3(self.ism.density_cm3);
        nt_to_t(self.ism.magnetic_field_nt) / (MU0 * rho).sqrt() / 1.0e3
    }

    /// Fast-magnetosonic Mach number of the interstellar flow.
    pub fn ism_fast_mach(&self) -> f64 {
        let cs = self.ism_sound_speed_km_s();
        let va = self.ism_alfven_speed_km_s();
        self.ism.speed_km_s / (cs * cs + va * va).sqrt()
    }
}
