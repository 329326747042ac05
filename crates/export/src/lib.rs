//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use helio_core::time::TimeError;
use helio_trajectory::TrajectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
    #[error("sampling step must be positive, got {0} days")]
    InvalidStep(f64),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod mesh {
    use std::io::Write;

    use helio_core::vector::Vector3;
    use helio_surface::Mesh;
    use serde::Serialize;
    use serde_json::{to_writer, to_writer_pretty};

    use super::ExportError;

    /// JSON envelope for one boundary mesh.
    #[derive(Debug, Serialize)]
    pub struct MeshDocument<'a> {
        pub boundary: &'static str,
        pub jd: f64,
        pub date_utc: Option<String>,
        pub resolution: u32,
        pub vertex_count: usize,
        pub triangle_count: usize,
        pub degenerate: bool,
        pub max_radius_au: f64,
        pub positions: &'a [Vector3],
        pub normals: &'a [Vector3],
        pub uvs: &'a [[f64; 2]],
        pub indices: &'a [[u32; 3]],
    }

    impl<'a> From<&'a Mesh> for MeshDocument<'a> {
        fn from(mesh: &'a Mesh) -> Self {
            Self {
                boundary: mesh.kind.name(),
                jd: mesh.jd.value(),
                date_utc: mesh.jd.to_date().ok().map(|d| d.to_rfc3339()),
                resolution: mesh.resolution,
                vertex_count: mesh.vertex_count(),
                triangle_count: mesh.triangle_count(),
                degenerate: mesh.is_degenerate(),
                max_radius_au: mesh.max_radius(),
                positions: &mesh.positions,
                normals: &mesh.normals,
                uvs: &mesh.uvs,
                indices: &mesh.indices,
            }
        }
    }

    /// Serialize `mesh` as a JSON document.
    pub fn write_mesh_json<W: Write>(
        writer: W,
        mesh: &Mesh,
        pretty: bool,
    ) -> Result<(), ExportError> {
        let document = MeshDocument::from(mesh);
        if pretty {
            to_writer_pretty(writer, &document)?;
        } else {
            to_writer(writer, &document)?;
        }
        Ok(())
    }
}

pub mod trajectory {
    use std::io::Write;

    use helio_core::time::JulianDate;
    use helio_trajectory::{SpacecraftState, Trajectory};
    use serde::Serialize;

    use super::ExportError;

    /// CSV row emitted by the trajectory exporter.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record {
        pub spacecraft: &'static str,
        pub jd: f64,
        pub date_utc: String,
        pub x_au: f64,
        pub y_au: f64,
        pub z_au: f64,
        pub vx_au_day: f64,
        pub vy_au_day: f64,
        pub vz_au_day: f64,
        pub distance_au: f64,
        pub speed_km_s: f64,
        pub light_time_hours: f64,
    }

    impl Record {
        pub fn from_state(state: &SpacecraftState) -> Result<Self, ExportError> {
            let [x_au, y_au, z_au] = state.position_au;
            let [vx_au_day, vy_au_day, vz_au_day] = state.velocity_au_day;
            Ok(Self {
                spacecraft: state.spacecraft.name(),
                jd: state.jd.value(),
                date_utc: state.jd.to_date()?.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                x_au,
                y_au,
                z_au,
                vx_au_day,
                vy_au_day,
                vz_au_day,
                distance_au: state.distance_au,
                speed_km_s: state.speed_km_s,
                light_time_hours: state.light_time_hours,
            })
        }
    }

    /// Write states from launch to the end of the sampled span every
    /// `step_days`, with a header row. Returns the number of data rows.
    pub fn write_trajectory_csv<W: Write>(
        writer: W,
        trajectory: &Trajectory,
        step_days: f64,
    ) -> Result<usize, ExportError> {
        if !(step_days.is_finite() && step_days > 0.0) {
            return Err(ExportError::InvalidStep(step_days));
        }
        let start = trajectory.launch_date();
        let end = trajectory.end_date();
        let steps = (end.days_since(start) / step_days).floor() as usize;

        let mut csv = csv::Writer::from_writer(writer);
        for k in 0..=steps {
            let jd = JulianDate::new(start.value() + step_days * k as f64);
            let state = trajectory.state(jd)?;
            csv.serialize(Record::from_state(&state)?)?;
        }
        csv.flush()?;
        Ok(steps + 1)
    }
}
