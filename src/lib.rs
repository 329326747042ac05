//! Geometry and physics behind a heliosphere visualization.
//!
//! The workspace crates are re-exported here so front-ends (the CLI binaries,
//! a renderer) depend on one library: coordinates and time from
//! `helio_core`, planetary and Voyager positions, the plasma model with its
//! boundary distances, and the parametric surfaces built from them.

pub use helio_core::{constants, coords, time, units, vector};

pub use helio_config as config;
pub use helio_ephemeris as ephemeris;
pub use helio_export as export;
pub use helio_plasma as plasma;
pub use helio_scene as scene;
pub use helio_surface as surface;
pub use helio_trajectory as trajectory;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
