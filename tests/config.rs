use std::fs;
use std::path::PathBuf;

use heliosphere::config::{
    ConfigError, ModelConfig, load_model_config, load_scene_presets, select_preset,
};
use heliosphere::plasma::HeliosphereModel;
use heliosphere::scene::{Scene, model_from_config};

fn configs_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs")
}

#[test]
fn shipped_model_matches_reference() {
    let config = load_model_config(configs_dir().join("model.toml")).expect("model.toml");
    assert_eq!(config.solar_wind.speed_km_s, Some(400.0));
    assert_eq!(config.solar_cycle.reference_maximum.as_deref(), Some("2003-03-01"));
    let model = model_from_config(&config).unwrap();
    assert_eq!(model, HeliosphereModel::default());
}

#[test]
fn empty_file_leaves_everything_unset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();
    assert_eq!(load_model_config(&path).unwrap(), ModelConfig::default());
}

#[test]
fn yaml_model_files_are_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.yaml");
    fs::write(
        &path,
        "ism:\n  speed_km_s: 60.0\nboundaries:\n  heliopause_flank_ratio: 1.4\n",
    )
    .unwrap();
    let config = load_model_config(&path).unwrap();
    assert_eq!(config.ism.speed_km_s, Some(60.0));
    assert_eq!(config.boundaries.heliopause_flank_ratio, Some(1.4));
    assert_eq!(config.ism.density_cm3, None);
}

#[test]
fn malformed_files_report_the_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let toml_path = dir.path().join("bad.toml");
    fs::write(&toml_path, "[ism\nspeed_km_s = 1").unwrap();
    assert!(matches!(load_model_config(&toml_path), Err(ConfigError::Toml(_))));

    let yaml_path = dir.path().join("bad.yaml");
    fs::write(&yaml_path, "ism: [unclosed").unwrap();
    assert!(matches!(load_model_config(&yaml_path), Err(ConfigError::Parse(_))));

    assert!(matches!(
        load_model_config(dir.path().join("missing.toml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn shipped_presets_load_in_file_order() {
    let presets = load_scene_presets(configs_dir().join("scenes")).expect("presets");
    let names: Vec<&str> = presets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["overview", "inner-system", "boundaries"]);

    let inner = select_preset(&presets, Some("Inner-System")).unwrap();
    assert!(!inner.visibility.heliopause);
    assert!(inner.visibility.planets);
    assert!(!inner.motion_enabled);
    assert_eq!(inner.surface_resolution, 24);

    assert_eq!(select_preset(&presets, None).unwrap().name, "overview");
    assert!(matches!(
        select_preset(&presets, Some("galaxy")),
        Err(ConfigError::MissingPreset(_))
    ));
}

#[test]
fn preset_defaults_fill_missing_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("a.toml"), "name = \"minimal\"\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    let presets = load_scene_presets(dir.path()).unwrap();
    assert_eq!(presets.len(), 1);
    let preset = &presets[0];
    assert_eq!(preset.surface_resolution, 48);
    assert_eq!(preset.trail_days, 3_650.0);
    assert!(preset.motion_enabled);
    assert!(preset.visibility.bow_shock);
}

#[test]
fn empty_preset_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        load_scene_presets(dir.path()),
        Err(ConfigError::NoPresets(_))
    ));
}

#[test]
fn scene_builds_from_files() {
    let model = load_model_config(configs_dir().join("model.toml")).unwrap();
    let presets = load_scene_presets(configs_dir().join("scenes")).unwrap();
    let boundaries = select_preset(&presets, Some("boundaries")).unwrap();
    let scene = Scene::from_config(&model, boundaries).unwrap();
    assert!(!scene.visibility().planets);
    assert!(scene.visibility().heliopause);
}
