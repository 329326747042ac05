//! Configuration models and loaders for the heliosphere model.
//!
//! Model parameters are all optional: anything left out falls back to the
//! reference model when the configuration is converted into runtime types.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Solar-wind overrides.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SolarWindConfig {
    pub density_1au_cm3: Option<f64>,
    pub speed_km_s: Option<f64>,
    pub min_distance_au: Option<f64>,
}

/// Local interstellar medium overrides.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IsmConfig {
    pub density_cm3: Option<f64>,
    pub speed_km_s: Option<f64>,
    pub temperature_k: Option<f64>,
    pub magnetic_field_nt: Option<f64>,
    pub adiabatic_index: Option<f64>,
}

/// Boundary shape overrides.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BoundaryConfig {
    pub termination_shock_flank_ratio: Option<f64>,
    pub heliopause_flank_ratio: Option<f64>,
    pub heliopause_to_shock_ratio: Option<f64>,
    pub shock_compression_ratio: Option<f64>,
    pub shock_width_au: Option<f64>,
}

/// Solar-cycle overrides.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SolarCycleConfig {
    pub period_years: Option<f64>,
    pub pressure_amplitude: Option<f64>,
    /// Calendar date (`YYYY-MM-DD` or RFC 3339) of a ram-pressure maximum.
    pub reference_maximum: Option<String>,
}

/// Heliosphere nose direction in equatorial coordinates.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ApexConfig {
    pub ra_deg: Option<f64>,
    pub dec_deg: Option<f64>,
}

/// Model parameter file.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub solar_wind: SolarWindConfig,
    pub ism: IsmConfig,
    pub boundaries: BoundaryConfig,
    pub solar_cycle: SolarCycleConfig,
    pub apex: ApexConfig,
}

/// Scene layers that can be toggled.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct VisibilityConfig {
    pub planets: bool,
    pub orbits: bool,
    pub moon: bool,
    pub voyager1: bool,
    pub voyager2: bool,
    pub trails: bool,
    pub termination_shock: bool,
    pub heliopause: bool,
    pub bow_shock: bool,
    pub solar_wind: bool,
    pub ism_flow: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            planets: true,
            orbits: true,
            moon: true,
            voyager1: true,
            voyager2: true,
            trails: true,
            termination_shock: true,
            heliopause: true,
            bow_shock: true,
            solar_wind: true,
            ism_flow: true,
        }
    }
}

/// Named scene preset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SceneConfig {
    pub name: String,
    #[serde(default)]
    pub visibility: VisibilityConfig,
    #[serde(default = "default_surface_resolution")]
    pub surface_resolution: u32,
    #[serde(default = "default_trail_days")]
    pub trail_days: f64,
    #[serde(default = "default_motion_enabled")]
    pub motion_enabled: bool,
}

fn default_surface_resolution() -> u32 {
    48
}

fn default_trail_days() -> f64 {
    3_650.0
}

fn default_motion_enabled() -> bool {
    true
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scene preset '{0}' not found")]
    MissingPreset(String),
    #[error("no scene presets found at {0}")]
    NoPresets(PathBuf),
}

/// Load model parameters from a TOML or YAML file.
pub fn load_model_config<P: AsRef<Path>>(path: P) -> Result<ModelConfig, ConfigError> {
    load_record(path.as_ref())
}

/// Load scene presets from a directory of TOML files, a single TOML file, or a YAML list.
pub fn load_scene_presets<P: AsRef<Path>>(path: P) -> Result<Vec<SceneConfig>, ConfigError> {
    let path = path.as_ref();
    let presets: Vec<SceneConfig> = load_records(path)?;
    if presets.is_empty() {
        warn!(path = %path.display(), "no scene presets found");
        return Err(ConfigError::NoPresets(path.to_path_buf()));
    }
    Ok(presets)
}

/// Pick a preset by case-insensitive name, defaulting to the first one.
pub fn select_preset<'a>(
    presets: &'a [SceneConfig],
    requested: Option<&str>,
) -> Result<&'a SceneConfig, ConfigError> {
    match requested {
        Some(name) => presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::MissingPreset(name.to_string())),
        None => presets
            .first()
            .ok_or_else(|| ConfigError::MissingPreset("<default>".to_string())),
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_record<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let contents = std::fs::read_to_string(path)?;
    if is_toml(path) {
        Ok(toml::from_str(&contents)?)
    } else {
        Ok(serde_yaml::from_str(&contents)?)
    }
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
