//! Core units, constants, and shared primitives for the heliosphere model workspace.

pub mod coords;
pub mod time;

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Speed of light (km/s).
    pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Days per Julian year.
    pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
    /// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00).
    pub const JD_J2000: f64 = 2_451_545.0;
    /// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
    pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;
    /// Mean obliquity of the ecliptic at J2000 (degrees).
    pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291;
    /// Proton mass (kg).
    pub const PROTON_MASS_KG: f64 = 1.672_621_924e-27;
    /// Boltzmann constant (J/K).
    pub const BOLTZMANN_J_K: f64 = 1.380_649e-23;
    /// Vacuum permeability (N/A²).
    pub const MU0: f64 = 1.256_637_062e-6;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{AU_KM, SECONDS_PER_DAY};

    /// Convert astronomical units to kilometres.
    #[inline]
    pub fn au_to_km(v: f64) -> f64 {
        v * AU_KM
    }

    /// Convert kilometres to astronomical units.
    #[inline]
    pub fn km_to_au(v: f64) -> f64 {
        v / AU_KM
    }

    /// Convert AU/day to km/s.
    #[inline]
    pub fn au_per_day_to_km_s(v: f64) -> f64 {
        v * AU_KM / SECONDS_PER_DAY
    }

    /// Convert km/s to AU/day.
    #[inline]
    pub fn km_s_to_au_per_day(v: f64) -> f64 {
        v * SECONDS_PER_DAY / AU_KM
    }

    /// Convert nanotesla to tesla.
    #[inline]
    pub fn nt_to_t(v: f64) -> f64 {
        v * 1.0e-9
    }

    /// Convert a number density in cm⁻³ to m⁻³.
    #[inline]
    pub fn per_cm3_to_per_m3(v: f64) -> f64 {
        v * 1.0e6
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU, AU/day, or km/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product `a × b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Linear blend `a + (b - a) * t`.
    #[inline]
    pub fn lerp(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
        add(a, &scale(&sub(b, a), t))
    }

    /// Unit vector along `v`, or `None` when `v` is (numerically) zero or non-finite.
    #[inline]
    pub fn normalize(v: &Vector3) -> Option<Vector3> {
        let n = norm(v);
        if n > 1.0e-12 && n.is_finite() {
            Some(scale(v, 1.0 / n))
        } else {
            None
        }
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
        norm(&sub(a, b))
    }

    /// Rotate a vector about the Z axis by `angle` radians.
    #[inline]
    pub fn rotate_z(v: &Vector3, angle: f64) -> Vector3 {
        let (s, c) = angle.sin_cos();
        [v[0] * c - v[1] * s, v[0] * s + v[1] * c, v[2]]
    }
}
