// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Cheap scalar checks run before any vertex work

use super::MeshSnapshot;
use crate::geometry::Axis;

/// Areas agree within `tolerance` of the first mesh's area (strict).
///
/// The tolerance is taken from `a` only, so `areas_match(a, b)` and
/// `areas_match(b, a)` can disagree right at the boundary.
pub fn areas_match(a: &MeshSnapshot, b: &MeshSnapshot, tolerance: f64) -> bool {
    let allowed = a.surface_area() * tolerance;
    (a.surface_area() - b.surface_area()).abs() < allowed
}

/// Pivots sit at comparable distances from the world planes.
///
/// Per axis, the distance magnitudes `|pivot|` are compared so that a mirrored
/// pair (pivot x = 5 and x = -5) counts as agreeing. At least one axis within
/// `tolerance` is enough.
pub fn pivots_plausible(a: &MeshSnapshot, b: &MeshSnapshot, tolerance: f64) -> bool {
    let (pa, pb) = (a.pivot(), b.pivot());
    Axis::ALL
        .iter()
        .any(|&axis| (axis.component(&pa).abs() - axis.component(&pb).abs()).abs() <= tolerance)
}

/// Which of the two meshes is named right, the other left.
///
/// A mesh whose pivot lies on the negative side of the mirror plane is the
/// right-hand one; otherwise `b` takes the right-hand role.
pub fn right_then_left<'a>(
    a: &'a MeshSnapshot,
    b: &'a MeshSnapshot,
    axis: Axis,
) -> (&'a MeshSnapshot, &'a MeshSnapshot) {
    if axis.component(&a.pivot()) < 0.0 {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pivot lies measurably off the mirror plane through the world origin
pub fn is_off_centre(snapshot: &MeshSnapshot, axis: Axis, epsilon: f64) -> bool {
    axis.component(&snapshot.pivot()).abs() > epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    fn quad_at(id: &str, x: f64) -> MeshSnapshot {
        let mut mesh = Primitive::quad(1.0, 1.0).to_mesh();
        mesh.translate(Vector3::new(x, 0.0, 0.0));
        MeshSnapshot::from_mesh(id, &mesh).unwrap()
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

    #[test]
    fn test_area_tolerance_is_strict() {
        let a = with_area(&quad_at("a", 5.0), 1000.0);
        let exact = with_area(&quad_at("b", -5.0), 1001.0);
        let inside = with_area(&quad_at("c", -5.0), 1000.9);

        assert!(!areas_match(&a, &exact, 0.001));
        assert!(areas_match(&a, &inside, 0.001));
    }

    #[test]
    fn test_area_tolerance_is_one_sided() {
        let small = with_area(&quad_at("small", 5.0), 1000.0);
        let large = with_area(&quad_at("large", -5.0), 1001.0);

        assert!(!areas_match(&small, &large, 0.001));
        assert!(areas_match(&large, &small, 0.001));
    }

    #[test]
    fn test_mirrored_pivots_are_plausible() {
        let a = quad_at("a", 5.0);
        let b = quad_at("b", -5.0);
        let far = quad_at("far", 50.0);
        assert!(pivots_plausible(&a, &b, 1.0));
        // y and z pivots still agree
        assert!(pivots_plausible(&a, &far, 1.0));
    }

    #[test]
    fn test_sides() {
        let a = quad_at("a", 5.0);
        let b = quad_at("b", -5.0);
        let (right, left) = right_then_left(&a, &b, Axis::X);
        assert_eq!(right.id().as_str(), "b");
        assert_eq!(left.id().as_str(), "a");

        let (right, left) = right_then_left(&b, &a, Axis::X);
        assert_eq!(right.id().as_str(), "b");
        assert_eq!(left.id().as_str(), "a");
    }

    #[test]
    fn test_off_centre() {
        assert!(is_off_centre(&quad_at("a", 0.5), Axis::X, 0.0001));
        assert!(!is_off_centre(&quad_at("b", 0.0), Axis::X, 0.0001));
    }
}
