//! Astronomical coordinate conversions and heliosphere-aligned frames.
//!
//! The scene frame is Y-up: planetary orbits lie in the XZ plane before the
//! ecliptic tilt (a rotation about Z) is applied. [`radec_to_vec3`] is the
//! plain spherical mapping with declination towards +Y; sky positions that
//! have to line up with the planets go through [`equatorial_to_scene`], which
//! converts to ecliptic coordinates first and then applies the same tilt.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::constants::OBLIQUITY_J2000_DEG;
use crate::vector::{self, Vector3};

/// Right ascension of the heliosphere nose (upwind interstellar flow), degrees.
pub const APEX_RA_DEG: f64 = 255.0;
/// Declination of the heliosphere nose (upwind interstellar flow), degrees.
pub const APEX_DEC_DEG: f64 = -17.6;

/// Helper "up" vectors closer than this (in |cos|) to the apex are rejected.
const PARALLEL_THRESHOLD: f64 = 0.95;

const WORLD_Y: Vector3 = [0.0, 1.0, 0.0];
const WORLD_Z: Vector3 = [0.0, 0.0, 1.0];

/// A unit-length direction in the scene frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Direction(Vector3);

impl Direction {
    /// World +X.
    pub const X: Direction = Direction([1.0, 0.0, 0.0]);
    /// World +Y.
    pub const Y: Direction = Direction([0.0, 1.0, 0.0]);
    /// World +Z.
    pub const Z: Direction = Direction([0.0, 0.0, 1.0]);

    /// Normalize `v` into a direction; zero-length or non-finite input yields `None`.
    pub fn new(v: Vector3) -> Option<Self> {
        vector::normalize(&v).map(Self)
    }

    pub fn as_vector(&self) -> &Vector3 {
        &self.0
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    /// Cosine of the angle between two directions.
    pub fn cos_angle_to(&self, other: &Direction) -> f64 {
        vector::dot(&self.0, &other.0).clamp(-1.0, 1.0)
    }

    /// Angle between two directions in radians, in `[0, π]`.
    pub fn angle_to(&self, other: &Direction) -> f64 {
        self.cos_angle_to(other).acos()
    }

    /// The opposite direction.
    pub fn reversed(&self) -> Direction {
        Direction(vector::scale(&self.0, -1.0))
    }

    /// Point at `distance` along this direction.
    pub fn at_distance(&self, distance: f64) -> Vector3 {
        vector::scale(&self.0, distance)
    }

    /// Spherical linear interpolation from `self` (t = 0) to `other` (t = 1).
    ///
    /// Nearly antiparallel endpoints have no unique great circle; the blend
    /// then falls back to a normalized linear mix, and to `self` if that
    /// collapses.
    pub fn slerp(&self, other: &Direction, t: f64) -> Direction {
        let cos = self.cos_angle_to(other);
        let omega = cos.acos();
        let sin = omega.sin();
        if sin.abs() < 1.0e-6 {
            return Direction::new(vector::lerp(&self.0, &other.0, t)).unwrap_or(*self);
        }
        let a = ((1.0 - t) * omega).sin() / sin;
        let b = (t * omega).sin() / sin;
        let blended = vector::add(&vector::scale(&self.0, a), &vector::scale(&other.0, b));
        Direction::new(blended).unwrap_or(*self)
    }
}

/// Convert right ascension / declination (radians) to a unit vector.
///
/// `radec_to_vec3(0.0, 0.0)` is `(1, 0, 0)`; declination points towards +Y.
pub fn radec_to_vec3(ra: f64, dec: f64) -> Direction {
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    // cos²δ(cos²α + sin²α) + sin²δ = 1 for every finite input
    Direction([cos_dec * cos_ra, sin_dec, cos_dec * sin_ra])
}

/// Convert ecliptic longitude / latitude (radians) to a scene-frame unit vector.
///
/// Uses the same construction as the planetary ephemeris: the ecliptic point is
/// built in the XZ plane (latitude towards +Y) and tilted about Z by the obliquity.
pub fn ecliptic_to_vec3(lon: f64, lat: f64) -> Direction {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let flat = [cos_lat * cos_lon, sin_lat, cos_lat * sin_lon];
    Direction(vector::rotate_z(&flat, ecliptic_tilt()))
}

/// Ecliptic tilt applied to every orbit in the scene (radians).
pub fn ecliptic_tilt() -> f64 {
    OBLIQUITY_J2000_DEG.to_radians()
}

/// Rotate J2000 equatorial coordinates into ecliptic longitude / latitude.
///
/// All angles in radians; the returned longitude lies in `[0, 2π)`.
pub fn equatorial_to_ecliptic(ra: f64, dec: f64) -> (f64, f64) {
    let (sin_eps, cos_eps) = ecliptic_tilt().sin_cos();
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    let sin_lat = sin_dec * cos_eps - cos_dec * sin_eps * sin_ra;
    let lat = sin_lat.clamp(-1.0, 1.0).asin();
    let lon = (sin_ra * cos_dec * cos_eps + sin_dec * sin_eps).atan2(cos_ra * cos_dec);
    (lon.rem_euclid(TAU), lat)
}

/// Place a right ascension / declination (radians) in the scene frame, where
/// it lines up with the planets and spacecraft.
pub fn equatorial_to_scene(ra: f64, dec: f64) -> Direction {
    let (lon, lat) = equatorial_to_ecliptic(ra, dec);
    ecliptic_to_vec3(lon, lat)
}

/// Direction of the heliosphere nose (the Sun's motion through the local ISM)
/// in the scene frame.
pub fn apex_direction() -> Direction {
    equatorial_to_scene(APEX_RA_DEG.to_radians(), APEX_DEC_DEG.to_radians())
}

/// Orthonormal frame whose `x` axis is a supplied direction.
///
/// Only built through [`Basis::from_apex`] or [`Basis::IDENTITY`], so the axes
/// are always unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Basis {
    x: Vector3,
    y: Vector3,
    z: Vector3,
}

impl Basis {
    /// World axes.
    pub const IDENTITY: Basis = Basis {
        x: [1.0, 0.0, 0.0],
        y: [0.0, 1.0, 0.0],
        z: [0.0, 0.0, 1.0],
    };

    /// Build a basis with `x == apex`.
    ///
    /// The helper up-vector is world Y unless the apex is within the parallel
    /// threshold of it, in which case world Z is used instead.
    pub fn from_apex(apex: Direction) -> Basis {
        let x = *apex.as_vector();
        let up = if vector::dot(&x, &WORLD_Y).abs() > PARALLEL_THRESHOLD {
            WORLD_Z
        } else {
            WORLD_Y
        };
        // |x × up| >= sqrt(1 - 0.95²) here, so neither normalize can fail
        let z = vector::normalize(&vector::cross(&x, &up)).unwrap_or(WORLD_Z);
        let y = vector::normalize(&vector::cross(&z, &x)).unwrap_or(WORLD_Y);
        Basis { x, y, z }
    }

    pub fn x(&self) -> &Vector3 {
        &self.x
    }

    pub fn y(&self) -> &Vector3 {
        &self.y
    }

    pub fn z(&self) -> &Vector3 {
        &self.z
    }

    /// Map basis-local coordinates into the world frame.
    pub fn to_world(&self, local: &Vector3) -> Vector3 {
        let mut out = vector::scale(&self.x, local[0]);
        out = vector::add(&out, &vector::scale(&self.y, local[1]));
        vector::add(&out, &vector::scale(&self.z, local[2]))
    }

    /// Map world coordinates into basis-local coordinates.
    pub fn to_local(&self, world: &Vector3) -> Vector3 {
        [
            vector::dot(world, &self.x),
            vector::dot(world, &self.y),
            vector::dot(world, &self.z),
        ]
    }

    /// The `x` axis as a direction.
    pub fn nose(&self) -> Direction {
        // x is a unit vector by construction
        Direction(self.x)
    }

    /// Largest deviation of `BᵀB` from the identity.
    pub fn orthonormality_error(&self) -> f64 {
        let axes = [self.x, self.y, self.z];
        let mut worst = 0.0_f64;
        for (i, a) in axes.iter().enumerate() {
            for (j, b) in axes.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                worst = worst.max((vector::dot(a, b) - expected).abs());
            }
        }
        worst
    }
}

impl Default for Basis {
    fn default() -> Self {
        basis_from_apex()
    }
}

/// Basis aligned with the fixed heliosphere apex.
pub fn basis_from_apex() -> Basis {
    Basis::from_apex(apex_direction())
}
