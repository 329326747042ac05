use heliosphere::config::{ModelConfig, SceneConfig, VisibilityConfig};
use heliosphere::constants::OBLIQUITY_J2000_DEG;
use heliosphere::coords::{Direction, basis_from_apex};
use heliosphere::ephemeris::Body;
use heliosphere::plasma::{BoundaryKind, HeliosphereModel};
use heliosphere::scene::{
    ComponentVisibility, FrameInput, Scene, SceneError, SceneState, basis_from_config,
    model_from_config,
};
use heliosphere::time::JulianDate;
use heliosphere::units::km_s_to_au_per_day;
use heliosphere::vector;

fn scene() -> Scene {
    Scene::new(HeliosphereModel::default(), basis_from_apex()).with_surface_resolution(8)
}

fn input(jd: JulianDate, motion_enabled: bool, dt_days: f64) -> FrameInput {
    FrameInput {
        jd,
        direction: basis_from_apex().nose(),
        motion_enabled,
        dt_days,
    }
}

#[test]
fn empty_config_is_the_reference_model() {
    let model = model_from_config(&ModelConfig::default()).unwrap();
    assert_eq!(model, HeliosphereModel::default());
    assert_eq!(basis_from_config(&ModelConfig::default()).unwrap(), basis_from_apex());
}

#[test]
fn overrides_apply_and_are_validated() {
    let mut config = ModelConfig::default();
    config.ism.speed_km_s = Some(30.0);
    config.solar_cycle.reference_maximum = Some("2014-04-01".to_string());
    let model = model_from_config(&config).unwrap();
    assert_eq!(model.ism.speed_km_s, 30.0);
    assert_eq!(
        model.solar_cycle.reference_maximum,
        JulianDate::parse("2014-04-01").unwrap()
    );

    config.solar_wind.density_1au_cm3 = Some(-1.0);
    assert!(matches!(model_from_config(&config), Err(SceneError::Model(_))));

    let mut config = ModelConfig::default();
    config.solar_cycle.reference_maximum = Some("not a date".to_string());
    assert!(matches!(model_from_config(&config), Err(SceneError::Time(_))));
}

#[test]
fn apex_override_needs_both_angles() {
    let mut config = ModelConfig::default();
    config.apex.ra_deg = Some(90.0);
    assert!(matches!(basis_from_config(&config), Err(SceneError::IncompleteApex)));
    // RA 6h at Dec +obliquity lies on the ecliptic at longitude 90°
    config.apex.dec_deg = Some(OBLIQUITY_J2000_DEG);
    let basis = basis_from_config(&config).unwrap();
    assert!(vector::distance(basis.x(), &[0.0, 0.0, 1.0]) < 1e-9);
}

#[test]
fn drift_only_accumulates_when_motion_is_enabled() {
    let scene = scene();
    let jd = JulianDate::J2000;
    let start = SceneState::default();

    let (still, frame) = scene.update(&start, &input(jd, false, 10.0)).unwrap();
    assert_eq!(still, start);
    assert_eq!(frame.drift_offset_au, [0.0; 3]);

    let (one, _) = scene.update(&start, &input(jd, true, 10.0)).unwrap();
    let (two, frame) = scene.update(&one, &input(jd, true, 10.0)).unwrap();
    let step = km_s_to_au_per_day(26.0) * 10.0;
    assert!((vector::norm(&one.drift_offset_au) - step).abs() < 1e-12);
    assert!((vector::norm(&two.drift_offset_au) - 2.0 * step).abs() < 1e-12);
    assert_eq!(frame.drift_offset_au, two.drift_offset_au);

    // same input, same output
    let (again, _) = scene.update(&one, &input(jd, true, 10.0)).unwrap();
    assert_eq!(again, two);

    assert!(matches!(
        scene.update(&start, &input(jd, true, f64::INFINITY)),
        Err(SceneError::InvalidStep(_))
    ));
}

#[test]
fn frame_contains_visible_layers() {
    let scene = scene();
    let (_, frame) = scene
        .update(&SceneState::default(), &input(JulianDate::from_decimal_year(2010.0), false, 0.0))
        .unwrap();
    assert_eq!(frame.bodies.len(), Body::ALL.len());
    assert_eq!(frame.orbits.len(), Body::PLANETS.len());
    assert_eq!(frame.spacecraft.len(), 2);
    assert!(frame.spacecraft.iter().all(|c| !c.trail.is_empty()));
    // the reference medium forms no bow shock
    let kinds: Vec<BoundaryKind> = frame.meshes.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![BoundaryKind::TerminationShock, BoundaryKind::Heliopause]);
    assert!(!frame.wind_profile.is_empty());
    assert!(!frame.ism_flow.is_empty());
}

#[test]
fn spacecraft_appear_after_launch() {
    let scene = scene();
    let (_, frame) = scene
        .update(&SceneState::default(), &input(JulianDate::from_decimal_year(1970.0), false, 0.0))
        .unwrap();
    assert!(frame.spacecraft.is_empty());
}

#[test]
fn hidden_layers_are_skipped() {
    let scene = scene().with_visibility(ComponentVisibility::NONE);
    let (_, frame) = scene
        .update(&SceneState::default(), &input(JulianDate::J2000, false, 0.0))
        .unwrap();
    assert!(frame.bodies.is_empty());
    assert!(frame.orbits.is_empty());
    assert!(frame.spacecraft.is_empty());
    assert!(frame.meshes.is_empty());
    assert!(frame.wind_profile.is_empty());
    assert!(frame.ism_flow.is_empty());
}

#[test]
fn visibility_from_config() {
    let config = VisibilityConfig {
        planets: false,
        voyager2: false,
        ..VisibilityConfig::default()
    };
    let visibility = ComponentVisibility::from(&config);
    assert!(!visibility.body(Body::Mars));
    assert!(visibility.body(Body::Moon));
    assert!(visibility.spacecraft(heliosphere::trajectory::Spacecraft::Voyager1));
    assert!(!visibility.spacecraft(heliosphere::trajectory::Spacecraft::Voyager2));
    assert_eq!(ComponentVisibility::default(), ComponentVisibility::ALL);
}

#[test]
fn drift_follows_the_supplied_direction() {
    let scene = scene();
    let frame_input = FrameInput {
        jd: JulianDate::J2000,
        direction: Direction::Z,
        motion_enabled: true,
        dt_days: -4.0,
    };
    let (state, _) = scene.update(&SceneState::default(), &frame_input).unwrap();
    let [x, y, z] = state.drift_offset_au;
    assert_eq!((x, y), (0.0, 0.0));
    assert!(z < 0.0);
}

#[test]
fn preset_motion_flag_reaches_the_frame_input() {
    let still = SceneConfig {
        name: "still".to_string(),
        visibility: VisibilityConfig::default(),
        surface_resolution: 4,
        trail_days: 365.0,
        motion_enabled: false,
    };
    let scene = Scene::from_config(&ModelConfig::default(), &still).unwrap();
    assert!(!scene.motion_enabled());
    let frame_input = scene.frame_input(JulianDate::J2000, 30.0);
    assert!(!frame_input.motion_enabled);
    assert_eq!(frame_input.direction, scene.basis().nose());
    let (state, _) = scene.update(&SceneState::default(), &frame_input).unwrap();
    assert_eq!(state, SceneState::default());

    let moving = SceneConfig {
        motion_enabled: true,
        ..still
    };
    let scene = Scene::from_config(&ModelConfig::default(), &moving).unwrap();
    let (state, _) = scene
        .update(&SceneState::default(), &scene.frame_input(JulianDate::J2000, 30.0))
        .unwrap();
    assert!(vector::norm(&state.drift_offset_au) > 0.0);
}

#[test]
fn boundary_layers_can_be_dropped_from_a_frame() {
    let layers = ComponentVisibility::ALL.without_boundaries();
    assert!(BoundaryKind::ALL.iter().all(|kind| !layers.boundary(*kind)));
    assert!(layers.planets && layers.ism_flow);

    let scene = scene().with_visibility(layers);
    let (_, frame) = scene
        .update(&SceneState::default(), &input(JulianDate::J2000, false, 0.0))
        .unwrap();
    assert!(frame.meshes.is_empty());
    assert_eq!(frame.bodies.len(), Body::ALL.len());
    assert!(!frame.ism_flow.is_empty());
}
