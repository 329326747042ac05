//! Parametric boundary surfaces.
//!
//! A boundary's scalar distance function is sampled on a regular
//! `(θ, φ)` grid, θ measured from the nose and φ around it, and turned into
//! vertex positions `direction · distance`. Meshes are rebuilt from scratch on
//! every request.
//!
//! A boundary that is physically absent (the bow shock under a
//! sub-magnetosonic interstellar flow) still yields a valid mesh whose
//! vertices all sit at the origin; callers check [`Mesh::is_degenerate`] and
//! skip drawing it.

use std::f64::consts::{PI, TAU};

use helio_core::coords::{Basis, Direction};
use helio_core::time::JulianDate;
use helio_core::vector::{self, Vector3};
use helio_plasma::{BoundaryKind, HeliosphereModel};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Upper bound on the grid resolution (vertices grow as `(n + 1)²`).
pub const MAX_RESOLUTION: u32 = 2_048;

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("surface resolution must be at least 1")]
    ZeroResolution,
    #[error("surface resolution {requested} exceeds the maximum of {max}")]
    ResolutionTooHigh { requested: u32, max: u32 },
}

/// Sampled boundary surface.
#[derive(Debug, Clone, Serialize)]
pub struct Mesh {
    pub kind: BoundaryKind,
    pub jd: JulianDate,
    pub resolution: u32,
    /// Row-major over θ (rows) and φ (columns), `(resolution + 1)²` entries.
    pub positions: Vec<Vector3>,
    pub normals: Vec<Vector3>,
    pub uvs: Vec<[f64; 2]>,
    pub indices: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertex at grid row `i` (θ) and column `j` (φ).
    pub fn vertex(&self, i: usize, j: usize) -> Option<&Vector3> {
        let stride = self.resolution as usize + 1;
        if i >= stride || j >= stride {
            return None;
        }
        self.positions.get(i * stride + j)
    }

    /// Largest vertex distance from the origin (AU).
    pub fn max_radius(&self) -> f64 {
        self.positions
            .iter()
            .map(vector::norm)
            .fold(0.0_f64, f64::max)
    }

    /// True when every vertex sits at the origin (the boundary is absent).
    pub fn is_degenerate(&self) -> bool {
        self.max_radius() == 0.0
    }
}

/// Surface generator bound to one model and one nose-aligned frame.
#[derive(Debug, Clone, Default)]
pub struct SurfaceGenerator {
    model: HeliosphereModel,
    basis: Basis,
}

impl SurfaceGenerator {
    /// Generator oriented on the fixed heliosphere apex.
    pub fn new(model: HeliosphereModel) -> Self {
        Self {
            model,
            basis: Basis::default(),
        }
    }

    pub fn with_basis(model: HeliosphereModel, basis: Basis) -> Self {
        Self { model, basis }
    }

    pub fn model(&self) -> &HeliosphereModel {
        &self.model
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Distance (AU) of `kind` along `direction`; zero where the boundary is absent.
    pub fn boundary_radius(&self, kind: BoundaryKind, direction: Direction, jd: JulianDate) -> f64 {
        let nose = self.basis.nose();
        match kind {
            BoundaryKind::TerminationShock => {
                self.model.termination_shock_distance(direction, nose, jd)
            }
            BoundaryKind::Heliopause => self.model.heliopause_distance(direction, nose, jd),
            BoundaryKind::BowShock => self
                .model
                .bow_shock_distance(direction, nose, jd)
                .unwrap_or(0.0),
        }
    }

    fn grid_direction(&self, theta: f64, phi: f64) -> Direction {
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        let local = [cos_t, sin_t * cos_p, sin_t * sin_p];
        // the basis is orthonormal, so the image of a unit vector is unit
        Direction::new(self.basis.to_world(&local)).unwrap_or_else(|| self.basis.nose())
    }

    /// Sample `kind` at `jd` on a `resolution × resolution` cell grid.
    pub fn generate(
        &self,
        kind: BoundaryKind,
        jd: JulianDate,
        resolution: u32,
    ) -> Result<Mesh, SurfaceError> {
        if resolution == 0 {
            return Err(SurfaceError::ZeroResolution);
        }
        if resolution > MAX_RESOLUTION {
            return Err(SurfaceError::ResolutionTooHigh {
                requested: resolution,
                max: MAX_RESOLUTION,
            });
        }

        let n = resolution as usize;
        let stride = n + 1;
        let mut positions = Vec::with_capacity(stride * stride);
        let mut directions = Vec::with_capacity(stride * stride);
        let mut uvs = Vec::with_capacity(stride * stride);

        for i in 0..=n {
            let theta = PI * i as f64 / n as f64;
            for j in 0..=n {
                let phi = TAU * j as f64 / n as f64;
                let direction = self.grid_direction(theta, phi);
                let radius = self.boundary_radius(kind, direction, jd);
                positions.push(direction.at_distance(radius));
                directions.push(direction);
                uvs.push([j as f64 / n as f64, i as f64 / n as f64]);
            }
        }

        let normals = vertex_normals(&positions, &directions, n);
        let indices = triangle_indices(n);

        let mesh = Mesh {
            kind,
            jd,
            resolution,
            positions,
            normals,
            uvs,
            indices,
        };
        debug!(
            kind = %kind,
            resolution,
            vertices = mesh.vertex_count(),
            degenerate = mesh.is_degenerate(),
            "built boundary mesh"
        );
        Ok(mesh)
    }

    /// Closed meridional cross-section of `kind` in the nose-aligned frame.
    ///
    /// Returns `samples + 1` points `[x, y]` (AU) with `x` towards the nose,
    /// going once around the boundary in the basis x–y plane.
    pub fn profile_curve(
        &self,
        kind: BoundaryKind,
        jd: JulianDate,
        samples: usize,
    ) -> Vec<[f64; 2]> {
        let samples = samples.max(4);
        (0..=samples)
            .map(|k| {
                let angle = TAU * k as f64 / samples as f64;
                let (sin_a, cos_a) = angle.sin_cos();
                let direction = Direction::new(self.basis.to_world(&[cos_a, sin_a, 0.0]))
                    .unwrap_or_else(|| self.basis.nose());
                let r = self.boundary_radius(kind, direction, jd);
                [r * cos_a, r * sin_a]
            })
            .collect()
    }
}

/// Mesh `kind` at `jd` with the reference model oriented on the heliosphere apex.
pub fn generate_parametric_surface(
    kind: BoundaryKind,
    jd: JulianDate,
    resolution: u32,
) -> Result<Mesh, SurfaceError> {
    SurfaceGenerator::default().generate(kind, jd, resolution)
}

/// Central-difference normals over the grid, oriented outwards.
///
/// Where the tangents collapse (poles, zero-radius surfaces) the sampling
/// direction is used instead.
fn vertex_normals(positions: &[Vector3], directions: &[Direction], n: usize) -> Vec<Vector3> {
    let stride = n + 1;
    let at = move |i: usize, j: usize| &positions[i * stride + j];
    let mut normals = Vec::with_capacity(positions.len());
    for i in 0..=n {
        let (i_prev, i_next) = (i.saturating_sub(1), (i + 1).min(n));
        for j in 0..=n {
            // columns 0 and n are the same seam
            let j_prev = if j == 0 { n - 1 } else { j - 1 };
            let j_next = if j == n { 1 } else { j + 1 };
            let d_theta = vector::sub(at(i_next, j), at(i_prev, j));
            let d_phi = vector::sub(at(i, j_next), at(i, j_prev));
            let radial = *directions[i * stride + j].as_vector();
            let normal = match vector::normalize(&vector::cross(&d_theta, &d_phi)) {
                Some(v) if vector::dot(&v, &radial) < 0.0 => vector::scale(&v, -1.0),
                Some(v) => v,
                None => radial,
            };
            normals.push(normal);
        }
    }
    normals
}

fn triangle_indices(n: usize) -> Vec<[u32; 3]> {
    let stride = (n + 1) as u32;
    let mut indices = Vec::with_capacity(2 * n * n);
    for i in 0..n as u32 {
        for j in 0..n as u32 {
            let a = i * stride + j;
            let b = a + stride;
            indices.push([a, b, a + 1]);
            indices.push([a + 1, b, b + 1]);
        }
    }
    indices
}
