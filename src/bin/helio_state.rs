use std::path::PathBuf;

use clap::Parser;
use heliosphere::config::load_model_config;
use heliosphere::coords::Basis;
use heliosphere::ephemeris::{Body, position_at};
use heliosphere::plasma::{BowShockRegime, HeliosphereModel};
use heliosphere::scene::{basis_from_config, model_from_config};
use heliosphere::time::JulianDate;
use heliosphere::trajectory::{Spacecraft, voyager_tracks};
use heliosphere::vector;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Print planet, Voyager and heliosphere boundary state at a date"
)]
struct Cli {
    /// Date as YYYY-MM-DD or RFC 3339 (defaults to now)
    #[arg(long)]
    date: Option<String>,

    /// Model parameter file (TOML or YAML); the reference model otherwise
    #[arg(long)]
    model: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let jd = match cli.date.as_deref() {
        Some(date) => JulianDate::parse(date)?,
        None => JulianDate::now(),
    };
    let (model, basis) = match &cli.model {
        Some(path) => {
            let config = load_model_config(path)?;
            (model_from_config(&config)?, basis_from_config(&config)?)
        }
        None => (HeliosphereModel::default(), Basis::default()),
    };
    info!(jd = jd.value(), "computing state");

    println!("Date: {} ({})", jd.to_date()?.format("%Y-%m-%d %H:%M UTC"), jd);

    println!("=== Bodies ===");
    for body in Body::ALL {
        let p = position_at(body, jd);
        println!(
            "{:<8} r = {:>8.3} AU  ({:>9.3}, {:>9.3}, {:>9.3})",
            body.name(),
            vector::norm(&p),
            p[0],
            p[1],
            p[2]
        );
    }

    println!("=== Spacecraft ===");
    let tracks = voyager_tracks();
    for craft in Spacecraft::ALL {
        let trajectory = tracks.get(craft);
        if jd < trajectory.launch_date() {
            println!("{}: not launched (launch {})", craft, trajectory.launch_date());
            continue;
        }
        let state = trajectory.state(jd)?;
        println!(
            "{}: r = {:.2} AU, speed = {:.2} km/s, light time = {:.2} h",
            craft, state.distance_au, state.speed_km_s, state.light_time_hours
        );
    }

    println!("=== Boundaries (nose) ===");
    println!(
        "Solar-cycle pressure factor: {:.3}",
        model.pressure_cycle_factor(jd)
    );
    println!(
        "Termination shock: {:.1} AU",
        model.termination_shock_nose_distance(jd)
    );
    println!("Heliopause: {:.1} AU", model.heliopause_nose_distance(jd));
    match model.bow_shock_regime() {
        BowShockRegime::Absent { mach } => {
            println!("Bow shock: absent (fast magnetosonic Mach {:.2})", mach)
        }
        BowShockRegime::Present { mach, .. } => {
            let nose = basis.nose();
            let distance = model
                .bow_shock_distance(nose, nose, jd)
                .unwrap_or_default();
            println!(
                "Bow shock: {:.1} AU (fast magnetosonic Mach {:.2})",
                distance, mach
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
