// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! STL meshes: one file per mesh, a directory per scene

use crate::geometry::{Face, PolyMesh};
use crate::symmetry::{MeshId, SceneProvider};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::Point3;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Read one binary or ASCII STL file
pub fn load_stl(path: impl AsRef<Path>) -> Result<PolyMesh> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open STL file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    // read_stl welds identical corners into shared vertices
    let stl = stl_io::read_stl(&mut reader)
        .with_context(|| format!("Failed to parse STL file: {}", path.display()))?;

    debug!(
        path = %path.display(),
        vertices = stl.vertices.len(),
        triangles = stl.faces.len(),
        "loaded STL"
    );

    let mut mesh = PolyMesh::with_capacity(stl.vertices.len(), stl.faces.len());
    for v in &stl.vertices {
        mesh.add_vertex(Point3::new(v[0] as f64, v[1] as f64, v[2] as f64));
    }
    for face in &stl.faces {
        let [a, b, c] = face.vertices;
        mesh.add_face(Face::triangle(a, b, c));
    }

    Ok(mesh)
}

fn is_stl(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("stl"))
}

/// STL files below `dir`, sorted by path
pub fn discover_stl_files(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_stl(p))
        .collect();

    files.sort();
    files
}

/// Load every STL file below `dir` as one mesh named after the file stem
pub fn load_stl_scene(dir: impl AsRef<Path>, show_progress: bool) -> Result<SceneProvider> {
    let files = discover_stl_files(dir.as_ref());

    let pb = if show_progress {
        let p = ProgressBar::new(files.len() as u64);
        p.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(p)
    } else {
        None
    };

    let mut scene = SceneProvider::new();
    for path in &files {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh")
            .to_string();
        if let Some(pb) = &pb {
            pb.set_message(name.clone());
        }

        scene.insert(MeshId::new(name), load_stl(path)?);

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symmetry::GeometryProvider;
    use std::io::Write;

    const TRIANGLE: &str = "\
solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 1 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid tri
";

    #[test]
    fn test_load_ascii_stl_welds_vertices() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("square.stl");
        File::create(&path)?.write_all(TRIANGLE.as_bytes())?;

        let mesh = load_stl(&path)?;
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.edge_count(), 5);
        Ok(())
    }

    #[test]
    fn test_binary_stl_coordinates_read_back() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("wing.stl");

        let triangle = stl_io::Triangle {
            normal: stl_io::Normal::new([0.0, 0.0, 1.0]),
            vertices: [
                stl_io::Vertex::new([-4.5, 0.25, 1.0]),
                stl_io::Vertex::new([-5.5, 0.25, 1.0]),
                stl_io::Vertex::new([-5.0, 1.75, 1.0]),
            ],
        };
        let mut file = File::create(&path)?;
        stl_io::write_stl(&mut file, [triangle].iter())?;
        drop(file);

        let mesh = load_stl(&path)?;
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);

        let mut points = mesh.vertices.clone();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(points[0], Point3::new(-5.5, 0.25, 1.0));
        assert_eq!(points[1], Point3::new(-5.0, 1.75, 1.0));
        assert_eq!(points[2], Point3::new(-4.5, 0.25, 1.0));
        assert!((mesh.surface_area() - 0.75).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_directory_scene() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("nested"))?;
        for rel in ["b.stl", "nested/a.STL"] {
            File::create(dir.path().join(rel))?.write_all(TRIANGLE.as_bytes())?;
        }
        File::create(dir.path().join("notes.txt"))?.write_all(b"ignored")?;

        let scene = load_stl_scene(dir.path(), false)?;
        assert_eq!(scene.list_meshes(), vec![MeshId::new("b"), MeshId::new("a")]);
        Ok(())
    }
}
