// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! End-to-end classification scenarios

use meshsym::geometry::{Axis, BoundingBox, PolyMesh, Primitive};
use meshsym::symmetry::prefilter::is_off_centre;
use meshsym::symmetry::{
    compare_two_meshes, Classification, DiagnosticKind, MeshId, MeshSnapshot, PairMode,
    SceneProvider, SymmetryConfig, SymmetryEngine, TopologyCounts,
};
use meshsym::classify;
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn snap(id: &str, mesh: &PolyMesh) -> MeshSnapshot {
    MeshSnapshot::from_mesh(id, mesh).unwrap()
}

fn unit_quad_at(x: f64) -> PolyMesh {
    let mut mesh = Primitive::quad(1.0, 1.0).to_mesh();
    mesh.translate(Vector3::new(x, 0.0, 0.0));
    mesh
}

fn with_area(snapshot: &MeshSnapshot, area: f64) -> MeshSnapshot {
    MeshSnapshot::new(
        snapshot.id().clone(),
        snapshot.vertices().to_vec(),
        snapshot.topology(),
        *snapshot.bounding_box(),
        snapshot.pivot(),
        area,
    )
    .unwrap()
}

/// Snapshot with a pivot set by hand instead of derived from the box
fn with_pivot_x(id: &str, vertices: Vec<Point3<f64>>, pivot_x: f64) -> MeshSnapshot {
    let n = vertices.len();
    let bbox = BoundingBox::from_points(&vertices);
    let centre = bbox.center();
    MeshSnapshot::new(
        MeshId::new(id),
        vertices,
        TopologyCounts::new(n, n, 1),
        bbox,
        Point3::new(pivot_x, centre.y, centre.z),
        1.0,
    )
    .unwrap()
}

/// Twenty vertex pairs mirrored about `x = plane`; the first `spoiled` partners
/// on the negative side point the other way around the axis
fn mirrored_about(plane: f64, spoiled: usize) -> Vec<Point3<f64>> {
    let mut vertices = Vec::new();
    for i in 0..20 {
        let x = 1.0 + 0.5 * i as f64;
        let y = if i < spoiled { -1.0 } else { 1.0 };
        vertices.push(Point3::new(plane + x, 1.0, 0.0));
        vertices.push(Point3::new(plane - x, y, 0.0));
    }
    vertices
}

/// Five vertices on the +X side and a partner of which only `mirrored`
/// vertices are mirror images; the rest sit far away on the -X side
fn partial_mirror(mirrored: usize) -> [MeshSnapshot; 2] {
    let source = vec![
        Point3::new(4.0, 1.0, 0.0),
        Point3::new(4.5, 0.0, 1.0),
        Point3::new(5.0, -1.0, 0.0),
        Point3::new(5.5, 0.0, -1.0),
        Point3::new(6.0, 1.0, 1.0),
    ];
    let partner = source
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i < mirrored {
                Point3::new(-p.x, p.y, p.z)
            } else {
                Point3::new(-9.0 - i as f64, p.y, p.z)
            }
        })
        .collect();

    [
        with_pivot_x("A", source, 5.0),
        with_pivot_x("B", partner, -5.0),
    ]
}

#[test]
fn test_mirrored_quads_pair_up() {
    let a = unit_quad_at(5.0);
    let b = a.mirrored(Axis::X);
    assert_eq!(b.pivot(), Point3::new(-5.0, 0.0, 0.0));

    let report = classify(&[snap("A", &a), snap("B", &b)]);
    let table = &report.table;

    assert_eq!(table.classification(&"A".into()), Some(Classification::PairedLeft));
    assert_eq!(table.classification(&"B".into()), Some(Classification::PairedRight));
    assert_eq!(table.partner(&"A".into()), Some(&MeshId::new("B")));
    assert_eq!(table.partner(&"B".into()), Some(&MeshId::new("A")));
    assert_eq!(report.pairs.len(), 1);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_zero_vertex_mesh_never_in_table() {
    let scene = SceneProvider::new()
        .with_mesh("A", unit_quad_at(5.0))
        .with_mesh("ghost", PolyMesh::empty())
        .with_mesh("B", unit_quad_at(5.0).mirrored(Axis::X));

    let report = SymmetryEngine::default().classify_provider(&scene);

    assert_eq!(report.table.len(), 2);
    assert!(!report.table.contains(&"ghost".into()));
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.mesh == Some("ghost".into()) && d.kind == DiagnosticKind::DegenerateGeometry));
    assert_eq!(report.table.classification(&"A".into()), Some(Classification::PairedLeft));
}

#[test]
fn test_classify_is_idempotent() {
    let arm = {
        let mut m = Primitive::cylinder(4.0, 0.6, 10).to_mesh();
        m.vertices[2].z += 0.4;
        m.translate(Vector3::new(3.0, 0.0, 1.0));
        m
    };
    let snapshots = vec![
        snap("arm_a", &arm),
        snap("arm_b", &arm.mirrored(Axis::X)),
        snap("body", &Primitive::cube(Vector3::new(2.0, 4.0, 1.0), true).to_mesh()),
        snap("hat", &unit_quad_at(7.0)),
    ];

    let engine = SymmetryEngine::default();
    let first = engine.classify(&snapshots);
    let second = engine.classify(&snapshots);
    assert_eq!(first, second);
}

#[test]
fn test_area_boundary_is_strict() {
    let a = snap("A", &unit_quad_at(5.0));
    let b = snap("B", &unit_quad_at(5.0).mirrored(Axis::X));

    let at_limit = classify(&[with_area(&a, 1000.0), with_area(&b, 1001.0)]);
    assert_eq!(at_limit.table.classification(&"A".into()), Some(Classification::Unique));
    assert_eq!(at_limit.table.classification(&"B".into()), Some(Classification::Unique));
    assert!(at_limit.pairs.is_empty());

    let inside = classify(&[with_area(&a, 1000.0), with_area(&b, 1000.9)]);
    assert_eq!(inside.table.classification(&"A".into()), Some(Classification::PairedLeft));
    assert_eq!(inside.table.classification(&"B".into()), Some(Classification::PairedRight));
}

#[test]
fn test_centred_box_is_center() {
    // Half extent 10 along X, every vertex far from the mirror plane
    let mesh = Primitive::cube(Vector3::new(20.0, 4.0, 6.0), true).to_mesh();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.pivot(), Point3::origin());

    let report = classify(&[snap("torso", &mesh)]);
    let entry = report.table.get(&"torso".into()).unwrap();
    assert_eq!(entry.classification, Classification::Center);
    assert_eq!(entry.correspondence, Some(100.0));
}

#[test]
fn test_nearly_centred_mesh_needs_review() {
    let mut mesh = Primitive::cube(Vector3::new(20.0, 4.0, 6.0), true).to_mesh();
    mesh.translate(Vector3::new(0.15, 0.0, 0.0));

    let report = classify(&[snap("belt", &mesh)]);
    assert_eq!(
        report.table.classification(&"belt".into()),
        Some(Classification::PotentialSelfSymmetric)
    );
}

#[test]
fn test_isolated_mesh_is_unique() {
    let mut sphere = Primitive::sphere(1.0, 12).to_mesh();
    sphere.translate(Vector3::new(10.0, 2.0, 0.0));

    let report = classify(&[snap("prop", &sphere)]);
    assert_eq!(report.table.classification(&"prop".into()), Some(Classification::Unique));
    assert!(report.pairs.is_empty());
}

#[test]
fn test_self_symmetric_mesh_is_not_also_paired() {
    // Two centred boxes: identical, but never off-centre, so no pair
    let mesh = Primitive::cube(Vector3::new(20.0, 4.0, 6.0), true).to_mesh();
    let report = classify(&[snap("a", &mesh), snap("b", &mesh)]);

    assert!(report.pairs.is_empty());
    assert_eq!(report.table.count(Classification::Center), 2);
}

/// Randomly jittered meshes, each next to its mirror image
fn random_scene(seed: u64, pairs: usize) -> Vec<MeshSnapshot> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut snapshots = Vec::new();

    for i in 0..pairs {
        // Different segment counts keep the pairs from competing with each other
        let mut mesh = Primitive::cylinder(rng.gen_range(1.0..5.0), 1.0, 3 + i as u32).to_mesh();
        for v in &mut mesh.vertices {
            v.y += rng.gen_range(-0.3..0.3);
            v.z += rng.gen_range(-0.3..0.3);
        }
        mesh.translate(Vector3::new(rng.gen_range(3.0..20.0), rng.gen_range(-5.0..5.0), 0.0));

        snapshots.push(snap(&format!("part_{}_a", i), &mesh));
        snapshots.push(snap(&format!("part_{}_b", i), &mesh.mirrored(Axis::X)));
    }

    let centred = Primitive::cube(Vector3::new(8.0, 2.0, 2.0), true).to_mesh();
    snapshots.push(snap("spine", &centred));
    snapshots
}

#[test]
fn test_random_mirrored_scenes_pair_up() {
    for seed in 0..5 {
        let report = classify(&random_scene(seed, 6));

        for i in 0..6 {
            let a = MeshId::new(format!("part_{}_a", i));
            let b = MeshId::new(format!("part_{}_b", i));
            assert_eq!(
                report.table.classification(&a),
                Some(Classification::PairedLeft),
                "seed {} part {}",
                seed,
                i
            );
            assert_eq!(report.table.partner(&b), Some(&a));
        }
        assert_eq!(report.table.classification(&"spine".into()), Some(Classification::Center));
    }
}

#[test]
fn test_parallel_and_sequential_agree() {
    let snapshots = random_scene(42, 8);

    let parallel = SymmetryEngine::new(SymmetryConfig::default()).classify(&snapshots);
    let sequential = SymmetryEngine::new(SymmetryConfig {
        parallel: false,
        ..SymmetryConfig::default()
    })
    .classify(&snapshots);

    assert_eq!(parallel, sequential);
}

#[test]
fn test_exactly_sixty_percent_does_not_pair() {
    let report = classify(&partial_mirror(3));
    assert!(report.pairs.is_empty());
    assert_eq!(report.table.classification(&"A".into()), Some(Classification::Unique));
    assert_eq!(report.table.classification(&"B".into()), Some(Classification::Unique));

    let report = classify(&partial_mirror(4));
    assert_eq!(report.table.classification(&"A".into()), Some(Classification::PairedLeft));
    assert_eq!(report.table.classification(&"B".into()), Some(Classification::PairedRight));
    assert_eq!(report.pairs.iter().next().map(|p| p.correspondence), Some(80.0));
}

#[test]
fn test_exactly_ninety_five_percent_is_center() {
    let report = classify(&[with_pivot_x("hull", mirrored_about(0.0, 1), 0.0)]);
    let entry = report.table.get(&"hull".into()).unwrap();
    assert_eq!(entry.classification, Classification::Center);
    assert_eq!(entry.correspondence, Some(95.0));

    let report = classify(&[with_pivot_x("hull", mirrored_about(0.0, 2), 0.0)]);
    assert_eq!(report.table.classification(&"hull".into()), Some(Classification::Unique));
}

#[test]
fn test_pivot_band_edges() {
    let at = |plane: f64| {
        let report = classify(&[with_pivot_x("m", mirrored_about(plane, 0), plane)]);
        report.table.classification(&"m".into())
    };

    // The centre epsilon itself already belongs to the nearly-centred band
    assert_eq!(at(0.0001), Some(Classification::PotentialSelfSymmetric));
    assert_eq!(at(0.00005), Some(Classification::Center));
    // The outer band limit is still tested
    assert_eq!(at(0.3), Some(Classification::PotentialSelfSymmetric));
    assert_eq!(at(0.3001), Some(Classification::Unique));
}

#[test]
fn test_pivot_on_centre_epsilon_is_not_off_centre() {
    let config = SymmetryConfig::default();
    let a = with_pivot_x("a", mirrored_about(0.0001, 0), 0.0001);
    let mirror: Vec<Point3<f64>> = a.vertices().iter().map(|p| Point3::new(-p.x, p.y, p.z)).collect();
    let b = with_pivot_x("b", mirror, -0.0001);

    assert!(!is_off_centre(&a, Axis::X, config.centre_epsilon));
    assert!(!is_off_centre(&b, Axis::X, config.centre_epsilon));

    let evaluation = compare_two_meshes(&a, &b, PairMode::OffCentre, &config);
    assert_eq!(evaluation.correspondence, Some(100.0));
    assert!(!evaluation.off_centre);
    assert!(!evaluation.matched);

    let report = classify(&[a, b]);
    assert!(report.pairs.is_empty());
    assert_eq!(report.table.count(Classification::PotentialSelfSymmetric), 2);
}
