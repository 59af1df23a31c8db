// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! JSON scene files

use crate::geometry::{Face, PolyMesh};
use crate::symmetry::{MeshId, SceneProvider};
use anyhow::{Context, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk scene: `{ "meshes": [ { "name", "vertices", "faces" } ] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    pub meshes: Vec<MeshRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshRecord {
    pub name: String,
    pub vertices: Vec<[f64; 3]>,
    #[serde(default)]
    pub faces: Vec<Vec<usize>>,
}

impl MeshRecord {
    pub fn from_mesh(name: impl Into<String>, mesh: &PolyMesh) -> Self {
        Self {
            name: name.into(),
            vertices: mesh.vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: mesh.faces.iter().map(|f| f.indices.clone()).collect(),
        }
    }

    pub fn to_mesh(&self) -> PolyMesh {
        PolyMesh::from_parts(
            self.vertices
                .iter()
                .map(|&[x, y, z]| Point3::new(x, y, z))
                .collect(),
            self.faces.iter().cloned().map(Face::new).collect(),
        )
    }
}

impl SceneFile {
    pub fn into_provider(self) -> SceneProvider {
        self.meshes
            .iter()
            .map(|m| (MeshId::new(m.name.clone()), m.to_mesh()))
            .collect()
    }
}

/// Load a JSON scene file
pub fn load_json_scene(path: impl AsRef<Path>) -> Result<SceneProvider> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open scene file: {}", path.display()))?;
    let scene: SceneFile = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;
    Ok(scene.into_provider())
}

/// Write named meshes as a JSON scene file
pub fn save_json_scene<'a>(
    path: impl AsRef<Path>,
    meshes: impl IntoIterator<Item = (&'a str, &'a PolyMesh)>,
) -> Result<()> {
    let path = path.as_ref();
    let scene = SceneFile {
        meshes: meshes
            .into_iter()
            .map(|(name, mesh)| MeshRecord::from_mesh(name, mesh))
            .collect(),
    };
    let json = serde_json::to_string_pretty(&scene).context("Failed to serialize scene")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write scene file: {}", path.display()))?;
    Ok(())
}
