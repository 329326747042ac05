use heliosphere::coords::basis_from_apex;
use heliosphere::plasma::{BoundaryKind, HeliosphereModel};
use heliosphere::surface::{
    MAX_RESOLUTION, SurfaceError, SurfaceGenerator, generate_parametric_surface,
};
use heliosphere::time::JulianDate;
use heliosphere::vector;

const JD: JulianDate = JulianDate::new(2_455_000.5);

#[test]
fn vertex_and_triangle_counts() {
    let jds = [JD, JulianDate::new(2_440_000.5), JulianDate::from_decimal_year(2031.7)];
    for kind in BoundaryKind::ALL {
        for jd in jds {
            for n in [1_u32, 3, 8, 32] {
                let mesh = generate_parametric_surface(kind, jd, n).unwrap();
                let side = (n + 1) as usize;
                assert_eq!(mesh.vertex_count(), side * side, "{kind} at resolution {n}");
                assert_eq!(mesh.normals.len(), side * side);
                assert_eq!(mesh.uvs.len(), side * side);
                assert_eq!(mesh.triangle_count(), 2 * (n * n) as usize);
                let max_index = mesh.indices.iter().flatten().copied().max().unwrap();
                assert!((max_index as usize) < mesh.vertex_count());
            }
        }
    }
}

#[test]
fn resolution_limits() {
    assert_eq!(
        generate_parametric_surface(BoundaryKind::TerminationShock, JD, 0).unwrap_err(),
        SurfaceError::ZeroResolution
    );
    assert!(matches!(
        generate_parametric_surface(BoundaryKind::TerminationShock, JD, MAX_RESOLUTION + 1),
        Err(SurfaceError::ResolutionTooHigh { .. })
    ));
}

#[test]
fn first_row_sits_on_the_nose() {
    let mesh = generate_parametric_surface(BoundaryKind::TerminationShock, JD, 16).unwrap();
    let model = HeliosphereModel::default();
    let nose = basis_from_apex().nose();
    let expected = nose.at_distance(model.termination_shock_nose_distance(JD));
    for j in 0..=16 {
        let v = mesh.vertex(0, j).unwrap();
        assert!(vector::distance(v, &expected) < 1e-9);
    }
    assert!(mesh.vertex(17, 0).is_none());
}

#[test]
fn vertices_lie_on_the_boundary() {
    let generator = SurfaceGenerator::default();
    let model = generator.model().clone();
    let nose = generator.basis().nose();
    let mesh = generator.generate(BoundaryKind::Heliopause, JD, 12).unwrap();
    for p in &mesh.positions {
        let dir = heliosphere::coords::Direction::new(*p).expect("off origin");
        let r = model.heliopause_distance(dir, nose, JD);
        assert!((vector::norm(p) - r).abs() < 1e-8 * r);
    }
}

#[test]
fn normals_are_unit_and_outward() {
    let mesh = generate_parametric_surface(BoundaryKind::TerminationShock, JD, 24).unwrap();
    for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
        assert!((vector::norm(n) - 1.0).abs() < 1e-9);
        assert!(vector::dot(p, n) > 0.0);
    }
}

#[test]
fn shape_is_independent_of_resolution() {
    let coarse = generate_parametric_surface(BoundaryKind::Heliopause, JD, 8).unwrap();
    let fine = generate_parametric_surface(BoundaryKind::Heliopause, JD, 32).unwrap();
    // θ = i/8 · π on the coarse grid is θ = 4i/32 · π on the fine one
    for i in 0..=8 {
        for j in 0..=8 {
            let a = coarse.vertex(i, j).unwrap();
            let b = fine.vertex(4 * i, 4 * j).unwrap();
            assert!(vector::distance(a, b) < 1e-9, "({i}, {j})");
        }
    }
    assert!((coarse.max_radius() - fine.max_radius()).abs() < 1e-9);
}

#[test]
fn absent_bow_shock_is_a_degenerate_mesh() {
    let mesh = generate_parametric_surface(BoundaryKind::BowShock, JD, 10).expect("never an error");
    assert_eq!(mesh.vertex_count(), 121);
    assert!(mesh.is_degenerate());
    assert!(mesh.positions.iter().all(|p| *p == [0.0; 3]));
    assert!(mesh.normals.iter().all(|n| n.iter().all(|c| c.is_finite())));
}

#[test]
fn present_bow_shock_encloses_heliopause() {
    let mut model = HeliosphereModel::default();
    model.ism.speed_km_s = 60.0;
    let generator = SurfaceGenerator::new(model);
    let bow = generator.generate(BoundaryKind::BowShock, JD, 8).unwrap();
    let hp = generator.generate(BoundaryKind::Heliopause, JD, 8).unwrap();
    assert!(!bow.is_degenerate());
    for (b, h) in bow.positions.iter().zip(&hp.positions) {
        assert!(vector::norm(b) > vector::norm(h));
    }
}

#[test]
fn profile_curve_is_closed() {
    let generator = SurfaceGenerator::default();
    let curve = generator.profile_curve(BoundaryKind::TerminationShock, JD, 90);
    assert_eq!(curve.len(), 91);
    let (first, last) = (curve[0], curve[90]);
    assert!((first[0] - last[0]).abs() < 1e-9 && (first[1] - last[1]).abs() < 1e-9);
    // starts at the nose
    assert!(first[0] > 0.0 && first[1].abs() < 1e-9);
}
