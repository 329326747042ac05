//! Compiled-in waypoint tables for the Voyager trajectories.
//!
//! Planetary encounters are anchored to the ephemeris model so the tracks
//! meet the planets as drawn; post-encounter waypoints are heliocentric
//! ecliptic coordinates of the boundary crossings.

use helio_ephemeris::Body;

/// Where a waypoint sits at its epoch.
#[derive(Debug, Clone, Copy)]
pub enum Anchor {
    /// Position of a body from the ephemeris model.
    Body(Body),
    /// Heliocentric ecliptic coordinates.
    Ecliptic {
        distance_au: f64,
        lon_deg: f64,
        lat_deg: f64,
    },
}

/// A dated point the trajectory passes through.
#[derive(Debug, Clone, Copy)]
pub struct Waypoint {
    pub label: &'static str,
    pub jd: f64,
    pub anchor: Anchor,
}

/// Static description of one spacecraft's flight.
#[derive(Debug, Clone, Copy)]
pub struct FlightPlan {
    pub waypoints: &'static [Waypoint],
    /// Radial cruise speed after the last waypoint (AU per Julian year).
    pub cruise_speed_au_per_year: f64,
}

pub const VOYAGER_1: FlightPlan = FlightPlan {
    waypoints: &[
        Waypoint {
            label: "Launch",
            jd: 2_443_391.5,
            anchor: Anchor::Body(Body::Earth),
        },
        Waypoint {
            label: "Jupiter flyby",
            jd: 2_443_937.5,
            anchor: Anchor::Body(Body::Jupiter),
        },
        Waypoint {
            label: "Saturn flyby",
            jd: 2_444_555.5,
            anchor: Anchor::Body(Body::Saturn),
        },
        Waypoint {
            label: "Pale Blue Dot",
            jd: 2_447_936.5,
            anchor: Anchor::Ecliptic {
                distance_au: 40.1,
                lon_deg: 252.0,
                lat_deg: 32.5,
            },
        },
        Waypoint {
            label: "Termination shock crossing",
            jd: 2_453_355.5,
            anchor: Anchor::Ecliptic {
                distance_au: 94.0,
                lon_deg: 254.5,
                lat_deg: 34.8,
            },
        },
        Waypoint {
            label: "Heliopause crossing",
            jd: 2_456_164.5,
            anchor: Anchor::Ecliptic {
                distance_au: 121.6,
                lon_deg: 255.0,
                lat_deg: 34.9,
            },
        },
    ],
    cruise_speed_au_per_year: 3.57,
};

pub const VOYAGER_2: FlightPlan = FlightPlan {
    waypoints: &[
        Waypoint {
            label: "Launch",
            jd: 2_443_375.5,
            anchor: Anchor::Body(Body::Earth),
        },
        Waypoint {
            label: "Jupiter flyby",
            jd: 2_444_063.5,
            anchor: Anchor::Body(Body::Jupiter),
        },
        Waypoint {
            label: "Saturn flyby",
            jd: 2_444_841.5,
            anchor: Anchor::Body(Body::Saturn),
        },
        Waypoint {
            label: "Uranus flyby",
            jd: 2_446_454.5,
            anchor: Anchor::Body(Body::Uranus),
        },
        Waypoint {
            label: "Neptune flyby",
            jd: 2_447_763.5,
            anchor: Anchor::Body(Body::Neptune),
        },
        Waypoint {
            label: "Termination shock crossing",
            jd: 2_454_342.5,
            anchor: Anchor::Ecliptic {
                distance_au: 83.7,
                lon_deg: 289.0,
                lat_deg: -27.0,
            },
        },
        Waypoint {
            label: "Heliopause crossing",
            jd: 2_458_427.5,
            anchor: Anchor::Ecliptic {
                distance_au: 119.0,
                lon_deg: 289.5,
                lat_deg: -31.0,
            },
        },
    ],
    cruise_speed_au_per_year: 3.25,
};
