// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Geometry snapshot provider: the engine's only view of the scene

use super::{Diagnostic, DiagnosticKind, GeometryError, MeshId, MeshSnapshot, TopologyCounts};
use crate::geometry::{BoundingBox, PolyMesh};
use ahash::{AHashMap, AHashSet};
use nalgebra::Point3;
use tracing::{debug, warn};

/// Side-effect-free reads against one consistent scene state
pub trait GeometryProvider {
    fn list_meshes(&self) -> Vec<MeshId>;
    fn vertex_positions(&self, mesh: &MeshId) -> Result<Vec<Point3<f64>>, GeometryError>;
    fn topology_counts(&self, mesh: &MeshId) -> Result<TopologyCounts, GeometryError>;
    fn bounding_box(&self, mesh: &MeshId) -> Result<BoundingBox, GeometryError>;
    fn surface_area(&self, mesh: &MeshId) -> Result<f64, GeometryError>;
    fn pivot(&self, mesh: &MeshId) -> Result<Point3<f64>, GeometryError>;
}

/// Snapshots captured for one pass, plus the meshes that had to be left out
#[derive(Debug, Clone, Default)]
pub struct SnapshotSet {
    pub snapshots: Vec<MeshSnapshot>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SnapshotSet {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Read every listed mesh once and freeze it into a [`MeshSnapshot`]
pub fn capture_snapshots<P: GeometryProvider + ?Sized>(provider: &P) -> SnapshotSet {
    let mut set = SnapshotSet::default();
    let mut seen: AHashSet<MeshId> = AHashSet::new();

    for id in provider.list_meshes() {
        if !seen.insert(id.clone()) {
            warn!(mesh = %id, "duplicate mesh identifier, keeping the first one");
            set.diagnostics.push(Diagnostic::for_mesh(
                &id,
                DiagnosticKind::DuplicateMesh,
                "identifier listed more than once",
            ));
            continue;
        }

        match capture_one(provider, &id) {
            Ok(snapshot) => {
                debug!(
                    mesh = %id,
                    vertices = snapshot.topology().vertices,
                    faces = snapshot.topology().faces,
                    area = snapshot.surface_area(),
                    "captured snapshot"
                );
                set.snapshots.push(snapshot);
            }
            Err(err) => {
                warn!(mesh = %id, error = %err, "mesh excluded from classification");
                set.diagnostics.push(err.into());
            }
        }
    }

    set
}

fn capture_one<P: GeometryProvider + ?Sized>(
    provider: &P,
    id: &MeshId,
) -> Result<MeshSnapshot, GeometryError> {
    let topology = provider.topology_counts(id)?;
    if topology.vertices == 0 {
        return Err(GeometryError::degenerate(id, "mesh has no vertices"));
    }
    let vertices = provider.vertex_positions(id)?;
    let bounding_box = provider.bounding_box(id)?;
    let surface_area = provider.surface_area(id)?;
    let pivot = provider.pivot(id)?;

    MeshSnapshot::new(id.clone(), vertices, topology, bounding_box, pivot, surface_area)
}

/// In-memory scene of named polygon meshes
#[derive(Debug, Clone, Default)]
pub struct SceneProvider {
    meshes: Vec<(MeshId, PolyMesh)>,
    index: AHashMap<MeshId, usize>,
}

impl SceneProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh. A second mesh under the same name is still listed, so the
    /// capture step can report the clash.
    pub fn insert(&mut self, id: impl Into<MeshId>, mesh: PolyMesh) {
        let id = id.into();
        self.index.entry(id.clone()).or_insert(self.meshes.len());
        self.meshes.push((id, mesh));
    }

    pub fn with_mesh(mut self, id: impl Into<MeshId>, mesh: PolyMesh) -> Self {
        self.insert(id, mesh);
        self
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn mesh(&self, id: &MeshId) -> Option<&PolyMesh> {
        self.index.get(id).map(|&i| &self.meshes[i].1)
    }

    fn lookup(&self, id: &MeshId) -> Result<&PolyMesh, GeometryError> {
        self.mesh(id)
            .ok_or_else(|| GeometryError::UnknownMesh(id.clone()))
    }

    fn lookup_valid(&self, id: &MeshId, what: &'static str) -> Result<&PolyMesh, GeometryError> {
        let mesh = self.lookup(id)?;
        if mesh.has_valid_faces() {
            Ok(mesh)
        } else {
            Err(GeometryError::missing(id, what))
        }
    }
}

impl FromIterator<(MeshId, PolyMesh)> for SceneProvider {
    fn from_iter<I: IntoIterator<Item = (MeshId, PolyMesh)>>(iter: I) -> Self {
        let mut scene = SceneProvider::new();
        for (id, mesh) in iter {
            scene.insert(id, mesh);
        }
        scene
    }
}

impl GeometryProvider for SceneProvider {
    fn list_meshes(&self) -> Vec<MeshId> {
        self.meshes.iter().map(|(id, _)| id.clone()).collect()
    }

    fn vertex_positions(&self, mesh: &MeshId) -> Result<Vec<Point3<f64>>, GeometryError> {
        Ok(self.lookup(mesh)?.vertices.clone())
    }

    fn topology_counts(&self, mesh: &MeshId) -> Result<TopologyCounts, GeometryError> {
        Ok(TopologyCounts::of(self.lookup_valid(mesh, "topology counts")?))
    }

    fn bounding_box(&self, mesh: &MeshId) -> Result<BoundingBox, GeometryError> {
        let bbox = self.lookup(mesh)?.bounding_box();
        if bbox.is_empty() {
            Err(GeometryError::missing(mesh, "a bounding box"))
        } else {
            Ok(bbox)
        }
    }

    fn surface_area(&self, mesh: &MeshId) -> Result<f64, GeometryError> {
        Ok(self.lookup_valid(mesh, "a surface area")?.surface_area())
    }

    fn pivot(&self, mesh: &MeshId) -> Result<Point3<f64>, GeometryError> {
        Ok(self.bounding_box(mesh)?.center())
    }
}
