use serde::Serialize;

/// Static description of a body orbiting the Sun (or, for the Moon, the Earth).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlanetaryBody {
    pub name: &'static str,
    /// Mean orbital radius (AU); for the Moon, relative to the Earth.
    pub orbital_radius_au: f64,
    /// Orbital period in Julian years.
    pub period_years: f64,
    /// Mean longitude at J2000 (degrees), the orbital phase at the epoch.
    pub mean_longitude_j2000_deg: f64,
    /// Mean physical radius (km).
    pub radius_km: f64,
    /// Display colour hint (`#rrggbb`).
    pub color: &'static str,
}

/// The eight planets, ordered by distance from the Sun.
pub const PLANETS: &[PlanetaryBody] = &[
    PlanetaryBody {
        name: "Mercury",
        orbital_radius_au: 0.387_098,
        period_years: 0.240_846_7,
        mean_longitude_j2000_deg: 252.250_32,
        radius_km: 2_439.7,
        color: "#8c8680",
    },
    PlanetaryBody {
        name: "Venus",
        orbital_radius_au: 0.723_332,
        period_years: 0.615_197_26,
        mean_longitude_j2000_deg: 181.979_73,
        radius_km: 6_051.8,
        color: "#e6c27a",
    },
    PlanetaryBody {
        name: "Earth",
        orbital_radius_au: 1.000_001,
        period_years: 1.000_017_4,
        mean_longitude_j2000_deg: 100.464_57,
        radius_km: 6_371.0,
        color: "#3a7bd5",
    },
    PlanetaryBody {
        name: "Mars",
        orbital_radius_au: 1.523_679,
        period_years: 1.880_847_6,
        mean_longitude_j2000_deg: 355.446_56,
        radius_km: 3_389.5,
        color: "#c1440e",
    },
    PlanetaryBody {
        name: "Jupiter",
        orbital_radius_au: 5.204_4,
        period_years: 11.862_615,
        mean_longitude_j2000_deg: 34.396_44,
        radius_km: 69_911.0,
        color: "#d8ca9d",
    },
    PlanetaryBody {
        name: "Saturn",
        orbital_radius_au: 9.582_6,
        period_years: 29.447_498,
        mean_longitude_j2000_deg: 49.954_24,
        radius_km: 58_232.0,
        color: "#e3d9a6",
    },
    PlanetaryBody {
        name: "Uranus",
        orbital_radius_au: 19.218_4,
        period_years: 84.016_846,
        mean_longitude_j2000_deg: 313.238_10,
        radius_km: 25_362.0,
        color: "#9fd8e3",
    },
    PlanetaryBody {
        name: "Neptune",
        orbital_radius_au: 30.110_387,
        period_years: 164.791_32,
        mean_longitude_j2000_deg: 304.879_97,
        radius_km: 24_622.0,
        color: "#4b70dd",
    },
];

/// The Moon, orbiting the Earth (27.321 661-day sidereal month).
pub const MOON: PlanetaryBody = PlanetaryBody {
    name: "Moon",
    orbital_radius_au: 0.002_57,
    period_years: 27.321_661 / 365.25,
    mean_longitude_j2000_deg: 218.316,
    radius_km: 1_737.4,
    color: "#bfbfbf",
};
