// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Immutable per-pass mesh snapshots

use super::GeometryError;
use crate::geometry::{BoundingBox, PolyMesh};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque mesh identifier as handed out by the scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshId(String);

impl MeshId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MeshId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MeshId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Vertex, edge and face counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopologyCounts {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
}

impl TopologyCounts {
    pub fn new(vertices: usize, edges: usize, faces: usize) -> Self {
        Self {
            vertices,
            edges,
            faces,
        }
    }

    pub fn of(mesh: &PolyMesh) -> Self {
        Self::new(mesh.vertex_count(), mesh.edge_count(), mesh.face_count())
    }
}

/// Point-in-time description of one mesh.
///
/// Built once per classification pass and read-only afterwards. Construction
/// rejects meshes without vertices, with non-finite coordinates or without area.
#[derive(Debug, Clone, Serialize)]
pub struct MeshSnapshot {
    id: MeshId,
    vertices: Vec<Point3<f64>>,
    topology: TopologyCounts,
    bounding_box: BoundingBox,
    pivot: Point3<f64>,
    surface_area: f64,
}

impl MeshSnapshot {
    pub fn new(
        id: MeshId,
        vertices: Vec<Point3<f64>>,
        topology: TopologyCounts,
        bounding_box: BoundingBox,
        pivot: Point3<f64>,
        surface_area: f64,
    ) -> Result<Self, GeometryError> {
        if vertices.is_empty() || topology.vertices == 0 {
            return Err(GeometryError::degenerate(&id, "mesh has no vertices"));
        }
        if topology.vertices != vertices.len() {
            return Err(GeometryError::degenerate(
                &id,
                format!(
                    "vertex count {} disagrees with {} reported positions",
                    topology.vertices,
                    vertices.len()
                ),
            ));
        }
        if vertices.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(GeometryError::degenerate(&id, "non-finite vertex position"));
        }
        if !pivot.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::missing(&id, "a finite pivot"));
        }
        if !surface_area.is_finite() {
            return Err(GeometryError::missing(&id, "a finite surface area"));
        }
        if surface_area <= 0.0 {
            return Err(GeometryError::degenerate(&id, "mesh has zero surface area"));
        }
        let finite_box = bounding_box
            .min
            .coords
            .iter()
            .chain(bounding_box.max.coords.iter())
            .all(|c| c.is_finite());
        if !finite_box {
            return Err(GeometryError::missing(&id, "a finite bounding box"));
        }
        if bounding_box.is_empty() {
            return Err(GeometryError::missing(&id, "a bounding box"));
        }

        Ok(Self {
            id,
            vertices,
            topology,
            bounding_box,
            pivot,
            surface_area,
        })
    }

    /// Snapshot an in-memory mesh, deriving counts, box, pivot and area from it
    pub fn from_mesh(id: impl Into<MeshId>, mesh: &PolyMesh) -> Result<Self, GeometryError> {
        let id = id.into();
        if !mesh.has_valid_faces() {
            return Err(GeometryError::missing(&id, "evaluable topology counts"));
        }
        let bounding_box = mesh.bounding_box();
        Self::new(
            id,
            mesh.vertices.clone(),
            TopologyCounts::of(mesh),
            bounding_box,
            bounding_box.center(),
            mesh.surface_area(),
        )
    }

    pub fn id(&self) -> &MeshId {
        &self.id
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn topology(&self) -> TopologyCounts {
        self.topology
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn pivot(&self) -> Point3<f64> {
        self.pivot
    }

    pub fn surface_area(&self) -> f64 {
        self.surface_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    #[test]
    fn test_snapshot_from_cube() {
        let mesh = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), false).to_mesh();
        let snapshot = MeshSnapshot::from_mesh("box", &mesh).unwrap();

        assert_eq!(snapshot.id().as_str(), "box");
        assert_eq!(snapshot.topology(), TopologyCounts::new(8, 12, 6));
        assert_eq!(snapshot.pivot(), Point3::new(1.0, 1.0, 1.0));
        assert!((snapshot.surface_area() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let err = MeshSnapshot::from_mesh("nothing", &PolyMesh::empty()).unwrap_err();
        assert!(matches!(err, GeometryError::Degenerate { .. }));
    }

    #[test]
    fn test_zero_area_rejected() {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let err = MeshSnapshot::from_mesh("points", &mesh).unwrap_err();
        assert!(err.to_string().contains("zero surface area"));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let mesh = Primitive::quad(1.0, 1.0).to_mesh();
        let mut bbox = mesh.bounding_box();
        bbox.max.x = f64::NAN;

        let err = MeshSnapshot::new(
            MeshId::new("quad"),
            mesh.vertices.clone(),
            TopologyCounts::of(&mesh),
            bbox,
            mesh.pivot(),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::MissingData { .. }));
        assert!(err.to_string().contains("finite bounding box"));
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let mesh = Primitive::quad(1.0, 1.0).to_mesh();
        let err = MeshSnapshot::new(
            MeshId::new("quad"),
            mesh.vertices.clone(),
            TopologyCounts::new(5, 4, 1),
            mesh.bounding_box(),
            mesh.pivot(),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::Degenerate { .. }));
    }
}
