use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use heliosphere::config::load_model_config;
use heliosphere::export::mesh::write_mesh_json;
use heliosphere::export::trajectory::write_trajectory_csv;
use heliosphere::export::writer_for_path;
use heliosphere::plasma::BoundaryKind;
use heliosphere::scene::{basis_from_config, model_from_config};
use heliosphere::surface::SurfaceGenerator;
use heliosphere::time::JulianDate;
use heliosphere::trajectory::voyager_tracks;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Export boundary meshes (JSON) and Voyager trajectories (CSV)"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample a boundary surface and write it as JSON
    Mesh {
        /// termination-shock, heliopause or bow-shock
        #[arg(long, default_value = "heliopause")]
        boundary: BoundaryKind,

        /// Date as YYYY-MM-DD or RFC 3339 (defaults to now)
        #[arg(long)]
        date: Option<String>,

        /// Grid cells along each surface parameter
        #[arg(long, default_value_t = 32)]
        resolution: u32,

        /// Model parameter file (TOML or YAML)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Output path, `-` for stdout
        #[arg(long, default_value = "-")]
        output: PathBuf,

        /// Indent the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Sample a Voyager trajectory and write it as CSV
    Trajectory {
        /// Voyager 1 or Voyager 2 (v1 / v2 accepted)
        #[arg(long, default_value = "voyager1")]
        spacecraft: String,

        /// Days between rows
        #[arg(long, default_value_t = 30.0)]
        step_days: f64,

        /// Output path, `-` for stdout
        #[arg(long, default_value = "-")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Mesh {
            boundary,
            date,
            resolution,
            model,
            output,
            pretty,
        } => {
            let jd = match date.as_deref() {
                Some(date) => JulianDate::parse(date)?,
                None => JulianDate::now(),
            };
            let generator = match &model {
                Some(path) => {
                    let config = load_model_config(path)?;
                    SurfaceGenerator::with_basis(
                        model_from_config(&config)?,
                        basis_from_config(&config)?,
                    )
                }
                None => SurfaceGenerator::default(),
            };
            let mesh = generator.generate(boundary, jd, resolution)?;
            if mesh.is_degenerate() {
                warn!(
                    boundary = %boundary,
                    "boundary is absent for this model; exporting a degenerate mesh"
                );
            }
            let mut writer = writer_for_path(&output)?;
            write_mesh_json(&mut writer, &mesh, pretty)?;
            writer.flush()?;
            info!(
                boundary = %boundary,
                vertices = mesh.vertex_count(),
                output = %output.display(),
                "mesh exported"
            );
        }
        Command::Trajectory {
            spacecraft,
            step_days,
            output,
        } => {
            let trajectory = voyager_tracks().by_name(&spacecraft)?;
            let mut writer = writer_for_path(&output)?;
            let rows = write_trajectory_csv(&mut writer, trajectory, step_days)?;
            writer.flush()?;
            info!(
                spacecraft = %trajectory.spacecraft(),
                rows,
                output = %output.display(),
                "trajectory exported"
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
