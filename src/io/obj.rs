// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Wavefront OBJ scene reader using pest

use crate::geometry::{Face, PolyMesh};
use crate::symmetry::{MeshId, SceneProvider};
use ahash::AHashMap;
use anyhow::{anyhow, bail, Context, Result};
use nalgebra::Point3;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::path::Path;

#[derive(Parser)]
#[grammar = "io/obj.pest"]
struct ObjParser;

/// Mesh being assembled; OBJ indices are global, so each mesh remaps them
struct ObjMesh {
    name: String,
    mesh: PolyMesh,
    local: AHashMap<usize, usize>,
}

impl ObjMesh {
    fn new(name: String) -> Self {
        Self {
            name,
            mesh: PolyMesh::new(),
            local: AHashMap::new(),
        }
    }

    fn vertex(&mut self, global: usize, positions: &[Point3<f64>]) -> usize {
        if let Some(&index) = self.local.get(&global) {
            return index;
        }
        let index = self.mesh.add_vertex(positions[global]);
        self.local.insert(global, index);
        index
    }

    fn is_empty(&self) -> bool {
        self.mesh.vertices.is_empty() && self.mesh.faces.is_empty()
    }
}

/// Parse OBJ source into named meshes.
///
/// `o` and `g` records switch to the mesh of that name; geometry before the
/// first of them goes to `default_name`. Vertices belong to the mesh that was
/// current when they were declared, plus any mesh whose faces use them.
pub fn parse_obj(source: &str, default_name: &str) -> Result<Vec<(String, PolyMesh)>> {
    let scene = ObjParser::parse(Rule::scene, source)
        .context("Failed to parse OBJ source")?
        .next()
        .ok_or_else(|| anyhow!("Empty OBJ document"))?;

    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut meshes: Vec<ObjMesh> = vec![ObjMesh::new(default_name.to_string())];
    let mut current = 0;

    for record in scene.into_inner() {
        match record.as_rule() {
            Rule::object | Rule::group => {
                let name = record
                    .into_inner()
                    .next()
                    .map(|n| n.as_str().trim().to_string())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| default_name.to_string());
                current = match meshes.iter().position(|m| m.name == name) {
                    Some(index) => index,
                    None => {
                        meshes.push(ObjMesh::new(name));
                        meshes.len() - 1
                    }
                };
            }
            Rule::vertex => {
                let line = record.as_span().start_pos().line_col().0;
                let coords = record
                    .into_inner()
                    .take(3)
                    .map(|n| n.as_str().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .with_context(|| format!("Invalid vertex on line {}", line))?;
                positions.push(Point3::new(coords[0], coords[1], coords[2]));
                let global = positions.len() - 1;
                meshes[current].vertex(global, &positions);
            }
            Rule::face => {
                let line = record.as_span().start_pos().line_col().0;
                let mut indices = Vec::new();
                for corner in record.into_inner() {
                    let global = resolve_index(corner, positions.len())
                        .with_context(|| format!("Invalid face on line {}", line))?;
                    indices.push(meshes[current].vertex(global, &positions));
                }
                meshes[current].mesh.add_face(Face::new(indices));
            }
            _ => {}
        }
    }

    Ok(meshes
        .into_iter()
        .filter(|m| !m.is_empty())
        .map(|m| (m.name, m.mesh))
        .collect())
}

/// One-based or negative (relative) OBJ index to a zero-based global index
fn resolve_index(corner: Pair<Rule>, declared: usize) -> Result<usize> {
    let raw = corner
        .into_inner()
        .next()
        .ok_or_else(|| anyhow!("Face corner without vertex index"))?
        .as_str();
    let value: i64 = raw.parse().with_context(|| format!("Bad index `{}`", raw))?;

    let resolved = match value {
        0 => bail!("OBJ indices start at 1"),
        v if v > 0 => v - 1,
        v => declared as i64 + v,
    };
    if resolved < 0 || resolved as usize >= declared {
        bail!("Vertex index {} out of range ({} declared)", value, declared);
    }
    Ok(resolved as usize)
}

/// Load an OBJ file as a scene; the file stem names geometry outside any object
pub fn load_obj_scene(path: impl AsRef<Path>) -> Result<SceneProvider> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read OBJ file: {}", path.display()))?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("default");

    let meshes = parse_obj(&source, stem)
        .with_context(|| format!("Failed to parse OBJ file: {}", path.display()))?;
    Ok(meshes.into_iter().map(|(name, mesh)| (MeshId::from(name), mesh)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUADS: &str = "\
# two mirrored quads
mtllib scene.mtl
o Wing_A
v 4.5 -0.5 0.0
v 5.5 -0.5 0.0
v 5.5 0.5 0.0
v 4.5 0.5 0.0
vn 0 0 1
f 1//1 2//1 3//1 4//1
o Wing_B
v -4.5 -0.5 0.0
v -5.5 -0.5 0.0
v -5.5 0.5 0.0
v -4.5 0.5 0.0
usemtl grey
s off
f -1/1 -2/2 -3/3 -4/4
";

    #[test]
    fn test_objects_become_meshes() -> Result<()> {
        let meshes = parse_obj(TWO_QUADS, "scene")?;
        assert_eq!(meshes.len(), 2);

        let (name, a) = &meshes[0];
        assert_eq!(name, "Wing_A");
        assert_eq!(a.vertex_count(), 4);
        assert_eq!(a.face_count(), 1);
        assert_eq!(a.faces[0].indices, vec![0, 1, 2, 3]);

        let (name, b) = &meshes[1];
        assert_eq!(name, "Wing_B");
        assert_eq!(b.vertices[0], Point3::new(-4.5, -0.5, 0.0));
        // Negative indices count back from the last declared vertex
        assert_eq!(b.faces[0].indices, vec![3, 2, 1, 0]);
        Ok(())
    }

    #[test]
    fn test_geometry_without_object_uses_default_name() -> Result<()> {
        let meshes = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", "tri")?;
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].0, "tri");
        Ok(())
    }

    #[test]
    fn test_vertex_colours_ignored() -> Result<()> {
        let source = "v 0 0 0 1 0 0\nv 2 0 0 0 1 0\nv 0 3 0 0 0 1\nv 1 1 1 1.0\nf 1 2 3\n";
        let meshes = parse_obj(source, "tinted")?;
        assert_eq!(meshes.len(), 1);

        let (_, mesh) = &meshes[0];
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertices[1], Point3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[2], Point3::new(0.0, 3.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 7\n", "bad").unwrap_err();
        assert!(format!("{:#}", err).contains("out of range"));
    }

    #[test]
    fn test_load_obj_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("wings.obj");
        std::fs::write(&path, TWO_QUADS)?;

        let scene = load_obj_scene(&path)?;
        assert_eq!(scene.len(), 2);
        Ok(())
    }
}
