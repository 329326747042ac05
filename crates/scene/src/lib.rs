//! Scene assembly for the heliosphere visualization.
//!
//! [`Scene::update`] is a pure step function: it takes the previous
//! [`SceneState`] and the per-frame inputs and returns the next state together
//! with everything a renderer needs for that frame. No counters are kept
//! between calls; the only accumulated quantity, the drift of the heliosphere
//! through the interstellar medium, travels in the returned state.

use std::f64::consts::TAU;

use helio_config::{ModelConfig, SceneConfig, VisibilityConfig};
use helio_core::coords::{Basis, Direction, basis_from_apex, equatorial_to_scene};
use helio_core::time::{JulianDate, TimeError};
use helio_core::units::km_s_to_au_per_day;
use helio_core::vector::{self, Vector3};
use helio_ephemeris::{Body, Position3, orbit_path, position_at};
use helio_plasma::{BoundaryKind, HeliosphereModel, ModelError, PlasmaFieldSample};
use helio_surface::{Mesh, SurfaceError, SurfaceGenerator};
use helio_trajectory::{Spacecraft, SpacecraftState, TrajectoryError, voyager_tracks};
use thiserror::Error;
use tracing::debug;

const ORBIT_SEGMENTS: usize = 128;
const TRAIL_POINTS: usize = 256;
const WIND_PROFILE_SAMPLES: usize = 64;
const FLOW_RING_POINTS: usize = 24;
/// Flow markers sit on rings at these multiples of the heliopause nose distance.
const FLOW_RING_SCALES: [f64; 3] = [1.2, 1.6, 2.2];

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] helio_config::ConfigError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error("apex override needs both ra_deg and dec_deg")]
    IncompleteApex,
    #[error("frame step must be finite, got {0} days")]
    InvalidStep(f64),
}

/// Build a validated model from configuration overrides on top of the reference model.
pub fn model_from_config(config: &ModelConfig) -> Result<HeliosphereModel, SceneError> {
    let mut model = HeliosphereModel::default();

    let wind = &config.solar_wind;
    apply(&mut model.solar_wind.density_1au_cm3, wind.density_1au_cm3);
    apply(&mut model.solar_wind.speed_km_s, wind.speed_km_s);
    apply(&mut model.solar_wind.min_distance_au, wind.min_distance_au);

    let ism = &config.ism;
    apply(&mut model.ism.density_cm3, ism.density_cm3);
    apply(&mut model.ism.speed_km_s, ism.speed_km_s);
    apply(&mut model.ism.temperature_k, ism.temperature_k);
    apply(&mut model.ism.magnetic_field_nt, ism.magnetic_field_nt);
    apply(&mut model.ism.adiabatic_index, ism.adiabatic_index);

    let shape = &config.boundaries;
    apply(
        &mut model.shape.termination_shock_flank_ratio,
        shape.termination_shock_flank_ratio,
    );
    apply(&mut model.shape.heliopause_flank_ratio, shape.heliopause_flank_ratio);
    apply(
        &mut model.shape.heliopause_to_shock_ratio,
        shape.heliopause_to_shock_ratio,
    );
    apply(
        &mut model.shape.shock_compression_ratio,
        shape.shock_compression_ratio,
    );
    apply(&mut model.shape.shock_width_au, shape.shock_width_au);

    let cycle = &config.solar_cycle;
    apply(&mut model.solar_cycle.period_years, cycle.period_years);
    apply(&mut model.solar_cycle.pressure_amplitude, cycle.pressure_amplitude);
    if let Some(date) = cycle.reference_maximum.as_deref() {
        model.solar_cycle.reference_maximum = JulianDate::parse(date)?;
    }

    model.validate()?;
    Ok(model)
}

fn apply(target: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Nose-aligned basis from the apex override, or the fixed apex.
pub fn basis_from_config(config: &ModelConfig) -> Result<Basis, SceneError> {
    match (config.apex.ra_deg, config.apex.dec_deg) {
        (None, None) => Ok(basis_from_apex()),
        (Some(ra), Some(dec)) => Ok(Basis::from_apex(equatorial_to_scene(
            ra.to_radians(),
            dec.to_radians(),
        ))),
        _ => Err(SceneError::IncompleteApex),
    }
}

/// Which scene layers are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentVisibility {
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

impl ComponentVisibility {
    pub const ALL: ComponentVisibility = ComponentVisibility {
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
    };

    pub const NONE: ComponentVisibility = ComponentVisibility {
        planets: false,
        orbits: false,
        moon: false,
        voyager1: false,
        voyager2: false,
        trails: false,
        termination_shock: false,
        heliopause: false,
        bow_shock: false,
        solar_wind: false,
        ism_flow: false,
    };

    pub fn boundary(&self, kind: BoundaryKind) -> bool {
        match kind {
            BoundaryKind::TerminationShock => self.termination_shock,
            BoundaryKind::Heliopause => self.heliopause,
            BoundaryKind::BowShock => self.bow_shock,
        }
    }

    pub fn spacecraft(&self, spacecraft: Spacecraft) -> bool {
        match spacecraft {
            Spacecraft::Voyager1 => self.voyager1,
            Spacecraft::Voyager2 => self.voyager2,
        }
    }

    pub fn body(&self, body: Body) -> bool {
        match body {
            Body::Moon => self.moon,
            _ => self.planets,
        }
    }

    /// The same layers with every boundary surface switched off.
    pub fn without_boundaries(self) -> Self {
        Self {
            termination_shock: false,
            heliopause: false,
            bow_shock: false,
            ..self
        }
    }
}

impl Default for ComponentVisibility {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<&VisibilityConfig> for ComponentVisibility {
    fn from(config: &VisibilityConfig) -> Self {
        Self {
            planets: config.planets,
            orbits: config.orbits,
            moon: config.moon,
            voyager1: config.voyager1,
            voyager2: config.voyager2,
            trails: config.trails,
            termination_shock: config.termination_shock,
            heliopause: config.heliopause,
            bow_shock: config.bow_shock,
            solar_wind: config.solar_wind,
            ism_flow: config.ism_flow,
        }
    }
}

/// State carried from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneState {
    /// Accumulated displacement of the heliosphere through the ISM (AU).
    pub drift_offset_au: Vector3,
}

/// Per-frame inputs.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub jd: JulianDate,
    /// Direction of the Sun's motion through the interstellar medium.
    pub direction: Direction,
    pub motion_enabled: bool,
    /// Time elapsed since the previous frame (days).
    pub dt_days: f64,
}

#[derive(Debug, Clone)]
pub struct SpacecraftFrame {
    pub state: SpacecraftState,
    pub trail: Vec<Vector3>,
}

/// Interstellar flow marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSample {
    pub position_au: Vector3,
    pub velocity_km_s: Vector3,
}

/// Everything drawn for one frame. Positions are heliocentric; renderers
/// translate by `drift_offset_au`.
#[derive(Debug, Clone)]
pub struct SceneFrame {
    pub jd: JulianDate,
    pub drift_offset_au: Vector3,
    pub bodies: Vec<(Body, Position3)>,
    pub orbits: Vec<(Body, Vec<Position3>)>,
    /// Spacecraft that have launched by `jd`.
    pub spacecraft: Vec<SpacecraftFrame>,
    /// Non-degenerate meshes for the visible boundaries.
    pub meshes: Vec<Mesh>,
    /// Plasma samples from the Sun out past the heliopause along the nose.
    pub wind_profile: Vec<PlasmaFieldSample>,
    pub ism_flow: Vec<FlowSample>,
}

/// Scene configuration bound to one model and frame.
#[derive(Debug, Clone)]
pub struct Scene {
    generator: SurfaceGenerator,
    visibility: ComponentVisibility,
    surface_resolution: u32,
    trail_days: f64,
    motion_enabled: bool,
}

impl Scene {
    pub fn new(model: HeliosphereModel, basis: Basis) -> Self {
        Self {
            generator: SurfaceGenerator::with_basis(model, basis),
            visibility: ComponentVisibility::default(),
            surface_resolution: 48,
            trail_days: 3_650.0,
            motion_enabled: true,
        }
    }

    /// Scene for a model file and a named preset.
    pub fn from_config(model: &ModelConfig, preset: &SceneConfig) -> Result<Self, SceneError> {
        let scene = Self::new(model_from_config(model)?, basis_from_config(model)?)
            .with_visibility(ComponentVisibility::from(&preset.visibility))
            .with_surface_resolution(preset.surface_resolution)
            .with_trail_days(preset.trail_days)
            .with_motion(preset.motion_enabled);
        Ok(scene)
    }

    pub fn with_visibility(mut self, visibility: ComponentVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_surface_resolution(mut self, resolution: u32) -> Self {
        self.surface_resolution = resolution;
        self
    }

    pub fn with_trail_days(mut self, days: f64) -> Self {
        self.trail_days = days.max(0.0);
        self
    }

    pub fn with_motion(mut self, enabled: bool) -> Self {
        self.motion_enabled = enabled;
        self
    }

    pub fn visibility(&self) -> &ComponentVisibility {
        &self.visibility
    }

    pub fn model(&self) -> &HeliosphereModel {
        self.generator.model()
    }

    pub fn basis(&self) -> &Basis {
        self.generator.basis()
    }

    pub fn motion_enabled(&self) -> bool {
        self.motion_enabled
    }

    /// Frame input at `jd`, `dt_days` after the previous frame, drifting along
    /// the nose when this scene has motion enabled.
    pub fn frame_input(&self, jd: JulianDate, dt_days: f64) -> FrameInput {
        FrameInput {
            jd,
            direction: self.basis().nose(),
            motion_enabled: self.motion_enabled,
            dt_days,
        }
    }

    /// Advance from `state` to the frame described by `input`.
    pub fn update(
        &self,
        state: &SceneState,
        input: &FrameInput,
    ) -> Result<(SceneState, SceneFrame), SceneError> {
        if !input.dt_days.is_finite() {
            return Err(SceneError::InvalidStep(input.dt_days));
        }
        let next = if input.motion_enabled {
            let speed = km_s_to_au_per_day(self.model().ism.speed_km_s);
            let step = input.direction.at_distance(speed * input.dt_days);
            SceneState {
                drift_offset_au: vector::add(&state.drift_offset_au, &step),
            }
        } else {
            *state
        };

        let jd = input.jd;
        let vis = &self.visibility;

        let bodies = Body::ALL
            .iter()
            .filter(|body| vis.body(**body))
            .map(|&body| (body, position_at(body, jd)))
            .collect();

        let orbits = if vis.orbits {
            Body::PLANETS
                .iter()
                .map(|&body| (body, orbit_path(body, ORBIT_SEGMENTS)))
                .collect()
        } else {
            Vec::new()
        };

        let spacecraft = self.spacecraft_frames(jd)?;

        let mut meshes = Vec::new();
        for kind in BoundaryKind::ALL {
            if !vis.boundary(kind) {
                continue;
            }
            let mesh = self.generator.generate(kind, jd, self.surface_resolution)?;
            if !mesh.is_degenerate() {
                meshes.push(mesh);
            }
        }

        let wind_profile = if vis.solar_wind {
            self.wind_profile(jd)
        } else {
            Vec::new()
        };
        let ism_flow = if vis.ism_flow {
            self.flow_markers(jd)
        } else {
            Vec::new()
        };

        debug!(
            jd = jd.value(),
            meshes = meshes.len(),
            spacecraft = spacecraft.len(),
            drift_au = vector::norm(&next.drift_offset_au),
            "scene updated"
        );

        let frame = SceneFrame {
            jd,
            drift_offset_au: next.drift_offset_au,
            bodies,
            orbits,
            spacecraft,
            meshes,
            wind_profile,
            ism_flow,
        };
        Ok((next, frame))
    }

    fn spacecraft_frames(&self, jd: JulianDate) -> Result<Vec<SpacecraftFrame>, SceneError> {
        let tracks = voyager_tracks();
        let mut frames = Vec::new();
        for craft in Spacecraft::ALL {
            if !self.visibility.spacecraft(craft) {
                continue;
            }
            let trajectory = tracks.get(craft);
            if jd < trajectory.launch_date() {
                continue;
            }
            let state = trajectory.state(jd)?;
            let trail = if self.visibility.trails {
                trajectory.trail(jd.add_days(-self.trail_days), jd, TRAIL_POINTS)?
            } else {
                Vec::new()
            };
            frames.push(SpacecraftFrame { state, trail });
        }
        Ok(frames)
    }

    fn wind_profile(&self, jd: JulianDate) -> Vec<PlasmaFieldSample> {
        let model = self.model();
        let nose = self.basis().nose();
        let outer = model.heliopause_nose_distance(jd) * 1.5;
        (1..=WIND_PROFILE_SAMPLES)
            .map(|k| {
                let r = outer * k as f64 / WIND_PROFILE_SAMPLES as f64;
                model.plasma_sample(r, nose, nose, jd)
            })
            .collect()
    }

    fn flow_markers(&self, jd: JulianDate) -> Vec<FlowSample> {
        let model = self.model();
        let basis = self.basis();
        let nose = basis.nose();
        let base = model.heliopause_nose_distance(jd);
        let mut markers = Vec::with_capacity(FLOW_RING_SCALES.len() * FLOW_RING_POINTS);
        for scale in FLOW_RING_SCALES {
            let r = base * scale;
            for k in 0..FLOW_RING_POINTS {
                let (sin_a, cos_a) = (TAU * k as f64 / FLOW_RING_POINTS as f64).sin_cos();
                let position_au = basis.to_world(&[r * cos_a, r * sin_a, 0.0]);
                let velocity_km_s = model.ism_flow_velocity(&position_au, nose, jd);
                markers.push(FlowSample {
                    position_au,
                    velocity_km_s,
                });
            }
        }
        markers
    }
}
