use heliosphere::constants::{AU_KM, SPEED_OF_LIGHT_KM_S};
use heliosphere::coords::{Direction, apex_direction};
use heliosphere::ephemeris::{Body, position_at};
use heliosphere::plasma::{HeliosphereModel, Region};
use heliosphere::time::JulianDate;
use heliosphere::trajectory::{
    HORIZON_JD, SAMPLE_STEP_DAYS, Spacecraft, TrajectoryError, generate_trajectory,
    voyager_tracks,
};
use heliosphere::vector;

#[test]
fn launch_dates_and_sampling() {
    let v1 = generate_trajectory(Spacecraft::Voyager1);
    let v2 = generate_trajectory(Spacecraft::Voyager2);
    assert_eq!(v1.launch_date().value(), 2_443_391.5);
    assert_eq!(v2.launch_date().value(), 2_443_375.5);
    for trajectory in [&v1, &v2] {
        assert_eq!(trajectory.end_date().value(), HORIZON_JD);
        let samples = trajectory.samples();
        for pair in samples.windows(2) {
            let step = pair[1].jd.days_since(pair[0].jd);
            assert!(step > 0.0 && step <= SAMPLE_STEP_DAYS + 1e-9);
        }
    }
}

#[test]
fn launch_position_is_earth() {
    let v1 = voyager_tracks().get(Spacecraft::Voyager1);
    let launch = v1.launch_date();
    let p = v1.interpolate(launch).expect("launch is in range");
    assert!(vector::distance(&p, &position_at(Body::Earth, launch)) < 1e-9);
}

#[test]
fn queries_before_launch_are_out_of_range() {
    let v2 = voyager_tracks().get(Spacecraft::Voyager2);
    let before = v2.launch_date().add_days(-1.0);
    match v2.state(before) {
        Err(TrajectoryError::OutOfRangeDate {
            spacecraft, launch, ..
        }) => {
            assert_eq!(spacecraft, Spacecraft::Voyager2);
            assert_eq!(launch, 2_443_375.5);
        }
        other => panic!("expected OutOfRangeDate, got {other:?}"),
    }
    assert!(v2.interpolate(JulianDate::new(f64::NAN)).is_err());
}

#[test]
fn interpolation_passes_through_samples() {
    let v1 = voyager_tracks().get(Spacecraft::Voyager1);
    for sample in v1.samples().iter().step_by(97) {
        let p = v1.interpolate(sample.jd).expect("sample epoch");
        assert!(vector::distance(&p, &sample.position_au) < 1e-9);
    }
}

#[test]
fn interpolation_is_continuous_across_samples() {
    let v1 = voyager_tracks().get(Spacecraft::Voyager1);
    let eps = 1e-6;
    for sample in v1.samples().iter().skip(1).step_by(53).take(20) {
        let before = v1.interpolate(sample.jd.add_days(-eps)).unwrap();
        let after = v1.interpolate(sample.jd.add_days(eps)).unwrap();
        // well under the ~0.05 AU/day of the fastest cruise
        assert!(vector::distance(&before, &after) < 1e-5, "jump at {}", sample.jd);
    }
}

#[test]
fn boundary_crossings_match_milestones() {
    let v1 = voyager_tracks().get(Spacecraft::Voyager1);
    let heliopause = v1
        .milestones()
        .iter()
        .find(|m| m.label.to_lowercase().contains("heliopause"))
        .expect("heliopause milestone");
    let state = v1.state(heliopause.jd).unwrap();
    assert!((state.distance_au - 121.6).abs() < 0.5, "{}", state.distance_au);
}

#[test]
fn crossing_milestones_straddle_the_model_boundaries() {
    let model = HeliosphereModel::default();
    let nose = apex_direction();
    let mut crossings = 0;
    for craft in Spacecraft::ALL {
        let trajectory = voyager_tracks().get(craft);
        for milestone in trajectory.milestones() {
            let (inside, outside) = match milestone.label {
                "Termination shock crossing" => (Region::SupersonicWind, Region::Heliosheath),
                "Heliopause crossing" => (Region::Heliosheath, Region::InterstellarMedium),
                _ => continue,
            };
            crossings += 1;
            for (days, expected) in [(-365.25, inside), (365.25, outside)] {
                let jd = milestone.jd.add_days(days);
                let state = trajectory.state(jd).unwrap();
                let direction = Direction::new(state.position_au).expect("off the Sun");
                let sample = model.plasma_sample(state.distance_au, direction, nose, jd);
                assert_eq!(
                    sample.region, expected,
                    "{craft} {} {days:+} days at {:.1} AU",
                    milestone.label, state.distance_au
                );
            }
        }
    }
    assert_eq!(crossings, 4);
}

#[test]
fn cruise_speed_after_last_waypoint() {
    let v1 = voyager_tracks().get(Spacecraft::Voyager1);
    let state = v1.state(JulianDate::from_decimal_year(2030.0)).unwrap();
    // 3.57 AU per Julian year
    assert!((state.speed_km_s - 16.92).abs() < 0.1, "{}", state.speed_km_s);
    let expected_light = state.distance_au * AU_KM / SPEED_OF_LIGHT_KM_S / 3_600.0;
    assert!((state.light_time_hours - expected_light).abs() < 1e-9);
}

#[test]
fn distance_keeps_growing_in_the_outer_heliosphere() {
    for craft in Spacecraft::ALL {
        let trajectory = voyager_tracks().get(craft);
        let mut previous = 0.0;
        for year in [1995.0, 2005.0, 2015.0, 2025.0, 2045.0] {
            let d = trajectory
                .state(JulianDate::from_decimal_year(year))
                .unwrap()
                .distance_au;
            assert!(d > previous, "{craft} at {year}");
            previous = d;
        }
    }
}

#[test]
fn extrapolates_past_the_horizon() {
    let v2 = voyager_tracks().get(Spacecraft::Voyager2);
    let end = v2.end_date();
    let at_end = v2.state(end).unwrap();
    let later = v2.state(end.add_days(365.25)).unwrap();
    assert!(later.distance_au > at_end.distance_au);
}

#[test]
fn trail_is_clamped_to_launch() {
    let v1 = voyager_tracks().get(Spacecraft::Voyager1);
    let launch = v1.launch_date();
    let trail = v1
        .trail(launch.add_days(-500.0), launch.add_days(1_000.0), 50)
        .unwrap();
    assert_eq!(trail.len(), 50);
    assert!(vector::distance(&trail[0], &position_at(Body::Earth, launch)) < 1e-9);
    assert!(v1.trail(launch.add_days(-900.0), launch.add_days(-1.0), 10).is_err());
}

#[test]
fn names_and_catalog() {
    assert_eq!(Spacecraft::from_name("v2").unwrap(), Spacecraft::Voyager2);
    assert_eq!(Spacecraft::from_name("Voyager 1").unwrap(), Spacecraft::Voyager1);
    assert_eq!(Spacecraft::from_name("voyager-2").unwrap(), Spacecraft::Voyager2);
    assert!(matches!(
        Spacecraft::from_name("pioneer 10"),
        Err(TrajectoryError::InvalidBody(_))
    ));
    assert!(std::ptr::eq(voyager_tracks(), voyager_tracks()));
    assert_eq!(
        voyager_tracks().by_name("V1").unwrap().spacecraft(),
        Spacecraft::Voyager1
    );
}
