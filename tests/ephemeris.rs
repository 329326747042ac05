use heliosphere::coords::ecliptic_tilt;
use heliosphere::ephemeris::bodies::MOON;
use heliosphere::ephemeris::{
    Body, EphemerisError, orbit_path, position_at, position_by_name, snapshot, velocity_at,
};
use heliosphere::time::JulianDate;
use heliosphere::vector;

const DATES: [f64; 5] = [2_400_000.5, 2_443_391.5, 2_451_545.0, 2_460_000.5, 2_469_807.5];

#[test]
fn planets_stay_on_their_orbital_radius() {
    for body in Body::PLANETS {
        let radius = body.record().orbital_radius_au;
        for jd in DATES {
            let r = vector::norm(&position_at(body, JulianDate::new(jd)));
            assert!((r - radius).abs() < 1e-9 * radius.max(1.0), "{body} at {jd}: {r}");
        }
    }
}

#[test]
fn negative_years_keep_the_radius() {
    // 150 years before J2000
    let jd = JulianDate::J2000.add_years(-150.3);
    for body in Body::PLANETS {
        let r = vector::norm(&position_at(body, jd));
        assert!((r - body.record().orbital_radius_au).abs() < 1e-9);
    }
}

#[test]
fn earth_returns_after_one_period() {
    let period_days = Body::Earth.record().period_years * 365.25;
    for jd in DATES {
        let a = position_at(Body::Earth, JulianDate::new(jd));
        let b = position_at(Body::Earth, JulianDate::new(jd + period_days));
        assert!(vector::distance(&a, &b) < 1e-8, "{jd}: {a:?} vs {b:?}");
    }
}

#[test]
fn orbits_lie_in_the_tilted_plane() {
    let normal = vector::rotate_z(&[0.0, 1.0, 0.0], ecliptic_tilt());
    for body in Body::PLANETS {
        let p = position_at(body, JulianDate::new(2_455_000.0));
        assert!(vector::dot(&p, &normal).abs() < 1e-9, "{body}");
    }
}

#[test]
fn moon_tracks_earth() {
    for jd in DATES {
        let jd = JulianDate::new(jd);
        let earth = position_at(Body::Earth, jd);
        let moon = position_at(Body::Moon, jd);
        let separation = vector::distance(&earth, &moon);
        assert!(separation <= MOON.orbital_radius_au + 1e-9);
        assert!((separation - MOON.orbital_radius_au).abs() < 1e-9);
    }
}

#[test]
fn velocity_matches_finite_difference() {
    let jd = JulianDate::new(2_458_000.5);
    for body in [Body::Earth, Body::Mars, Body::Neptune] {
        let h = 0.01;
        let ahead = position_at(body, jd.add_days(h));
        let behind = position_at(body, jd.add_days(-h));
        let numeric = vector::scale(&vector::sub(&ahead, &behind), 1.0 / (2.0 * h));
        let analytic = velocity_at(body, jd);
        assert!(vector::distance(&numeric, &analytic) < 1e-8, "{body}");
    }
    let earth_speed = vector::norm(&velocity_at(Body::Earth, jd));
    assert!((earth_speed - 0.0172).abs() < 2e-4);
}

#[test]
fn names_resolve_case_insensitively() {
    assert_eq!(Body::from_name("jupiter"), Ok(Body::Jupiter));
    assert_eq!(Body::from_name("MOON"), Ok(Body::Moon));
    assert_eq!(
        Body::from_name("Pluto"),
        Err(EphemerisError::InvalidBody("Pluto".to_string()))
    );
    assert!(position_by_name("Vulcan", JulianDate::J2000).is_err());
    let saturn = position_by_name("saturn", JulianDate::J2000).expect("known body");
    assert_eq!(saturn, position_at(Body::Saturn, JulianDate::J2000));
}

#[test]
fn orbit_path_is_closed() {
    let path = orbit_path(Body::Mars, 64);
    assert_eq!(path.len(), 65);
    assert!(vector::distance(&path[0], &path[64]) < 1e-12);
    assert_eq!(orbit_path(Body::Venus, 0).len(), 4);
}

#[test]
fn snapshot_covers_every_body() {
    let bodies = snapshot(JulianDate::J2000);
    assert_eq!(bodies.len(), Body::ALL.len());
    assert_eq!(bodies[0].0, Body::Mercury);
}
