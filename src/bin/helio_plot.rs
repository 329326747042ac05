use std::fs;
use std::path::PathBuf;

use clap::Parser;
use heliosphere::config::{
    ModelConfig, SceneConfig, load_model_config, load_scene_presets, select_preset,
};
use heliosphere::coords::Basis;
use heliosphere::plasma::{BoundaryKind, HeliosphereModel};
use heliosphere::scene::{
    ComponentVisibility, Scene, SceneState, basis_from_config, model_from_config,
};
use heliosphere::surface::SurfaceGenerator;
use heliosphere::time::JulianDate;
use heliosphere::vector;
use plotters::prelude::*;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a meridional cross-section of the heliosphere to PNG"
)]
struct Cli {
    /// Date as YYYY-MM-DD or RFC 3339 (defaults to now)
    #[arg(long)]
    date: Option<String>,

    #[arg(long, default_value = "artifacts/heliosphere.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 1000)]
    width: u32,

    #[arg(long, default_value_t = 1000)]
    height: u32,

    /// Model parameter file (TOML or YAML)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Directory of scene presets (or a single preset file)
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Preset name (defaults to the first preset found)
    #[arg(long)]
    preset: Option<String>,

    /// Half-width of the plotted square (AU); fitted to the boundaries otherwise
    #[arg(long)]
    extent_au: Option<f64>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

const PROFILE_SAMPLES: usize = 360;
/// Length of a flow marker at the free-stream speed, as a fraction of the extent.
const FLOW_MARKER_SCALE: f64 = 0.04;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let jd = match cli.date.as_deref() {
        Some(date) => JulianDate::parse(date)?,
        None => JulianDate::now(),
    };

    let model_config = match &cli.model {
        Some(path) => Some(load_model_config(path)?),
        None => None,
    };
    let presets = match &cli.presets {
        Some(path) => load_scene_presets(path)?,
        None => Vec::new(),
    };
    let preset: Option<&SceneConfig> = if presets.is_empty() {
        None
    } else {
        Some(select_preset(&presets, cli.preset.as_deref())?)
    };

    let scene = match (&model_config, preset) {
        (Some(config), Some(preset)) => Scene::from_config(config, preset)?,
        (None, Some(preset)) => Scene::from_config(&ModelConfig::default(), preset)?,
        (Some(config), None) => {
            Scene::new(model_from_config(config)?, basis_from_config(config)?)
        }
        (None, None) => Scene::new(HeliosphereModel::default(), Basis::default()),
    };
    let basis = *scene.basis();
    let layers = *scene.visibility();

    // boundaries are drawn from meridional profiles, so the frame skips their meshes
    let scene = scene.with_visibility(ComponentVisibility {
        solar_wind: false,
        ..layers.without_boundaries()
    });
    let (_, frame) = scene.update(&SceneState::default(), &scene.frame_input(jd, 0.0))?;

    let generator = SurfaceGenerator::with_basis(scene.model().clone(), basis);
    let profiles: Vec<(BoundaryKind, Vec<(f64, f64)>)> = BoundaryKind::ALL
        .iter()
        .filter(|kind| layers.boundary(**kind))
        .map(|&kind| {
            let curve = generator
                .profile_curve(kind, jd, PROFILE_SAMPLES)
                .into_iter()
                .map(|[x, y]| (x, y))
                .collect::<Vec<_>>();
            (kind, curve)
        })
        .filter(|(_, curve)| curve.iter().any(|(x, y)| *x != 0.0 || *y != 0.0))
        .collect();

    let extent = cli.extent_au.unwrap_or_else(|| {
        let fitted = profiles
            .iter()
            .flat_map(|(_, curve)| curve.iter())
            .map(|(x, y)| x.abs().max(y.abs()))
            .fold(0.0_f64, f64::max);
        if fitted > 0.0 { fitted * 1.05 } else { 50.0 }
    });

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let root = BitMapBackend::new(&cli.output, (cli.width, cli.height)).into_drawing_area();
    root.fill(&BLACK)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    let project = |p: &[f64; 3]| {
        let local = basis.to_local(p);
        (local[0], local[1])
    };

    let free_stream = scene.model().ism.speed_km_s;
    for marker in &frame.ism_flow {
        let speed = vector::norm(&marker.velocity_km_s);
        if speed <= 0.0 {
            continue;
        }
        let length = extent * FLOW_MARKER_SCALE * speed / free_stream;
        let tip = vector::add(
            &marker.position_au,
            &vector::scale(&marker.velocity_km_s, length / speed),
        );
        chart.draw_series(std::iter::once(PathElement::new(
            vec![project(&marker.position_au), project(&tip)],
            ShapeStyle::from(&RGBColor(90, 110, 160)).stroke_width(1),
        )))?;
    }

    for (kind, curve) in &profiles {
        let color = match kind {
            BoundaryKind::TerminationShock => RGBColor(80, 160, 255),
            BoundaryKind::Heliopause => RGBColor(255, 150, 60),
            BoundaryKind::BowShock => RGBColor(200, 80, 200),
        };
        chart.draw_series(std::iter::once(PathElement::new(
            curve.clone(),
            ShapeStyle::from(&color).stroke_width(2),
        )))?;
    }

    for (_, path) in &frame.orbits {
        let points: Vec<(f64, f64)> = path.iter().map(project).collect();
        chart.draw_series(std::iter::once(PathElement::new(
            points,
            ShapeStyle::from(&WHITE.mix(0.4)).stroke_width(1),
        )))?;
    }

    for (_, position) in &frame.bodies {
        chart.draw_series(std::iter::once(Circle::new(
            project(position),
            2,
            WHITE.filled(),
        )))?;
    }

    for craft in &frame.spacecraft {
        let color = RGBColor(120, 255, 120);
        let points: Vec<(f64, f64)> = craft.trail.iter().map(project).collect();
        chart.draw_series(std::iter::once(PathElement::new(
            points,
            ShapeStyle::from(&color.mix(0.7)).stroke_width(1),
        )))?;
        chart.draw_series(std::iter::once(Circle::new(
            project(&craft.state.position_au),
            4,
            color.filled(),
        )))?;
    }

    chart.draw_series(std::iter::once(Circle::new(
        (0.0, 0.0),
        5,
        RGBColor(255, 220, 0).filled(),
    )))?;

    root.present()?;
    info!(
        output = %cli.output.display(),
        extent_au = extent,
        boundaries = profiles.len(),
        "plot written"
    );
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
