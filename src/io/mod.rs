// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! I/O module - scene loading and report writing

mod obj;
mod report;
mod scene_json;
mod stl;

pub use obj::{load_obj_scene, parse_obj};
pub use report::{summarize, ClassCounts, SummaryTag, SymmetryReport};
pub use scene_json::{load_json_scene, save_json_scene, MeshRecord, SceneFile};
pub use stl::{discover_stl_files, load_stl, load_stl_scene};

use crate::symmetry::{MeshId, SceneProvider};
use anyhow::{bail, Result};
use std::path::Path;

/// Load a scene from a JSON scene file, an OBJ file, a single STL file or a
/// directory of STL files
pub fn load_scene(path: impl AsRef<Path>) -> Result<SceneProvider> {
    load_scene_with_progress(path, false)
}

/// Same as [`load_scene`], with a progress bar while reading STL directories
pub fn load_scene_with_progress(path: impl AsRef<Path>, show_progress: bool) -> Result<SceneProvider> {
    let path = path.as_ref();
    if path.is_dir() {
        return load_stl_scene(path, show_progress);
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => load_json_scene(path),
        "obj" => load_obj_scene(path),
        "stl" => {
            let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("mesh");
            Ok(SceneProvider::new().with_mesh(MeshId::new(name), load_stl(path)?))
        }
        _ => bail!("Unsupported scene format: {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extension_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("scene.fbx");
        std::fs::write(&path, "")?;

        let err = load_scene(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported scene format"));
        Ok(())
    }

    #[test]
    fn test_dispatch_on_extension() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tri.OBJ");
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")?;

        let scene = load_scene(&path)?;
        assert_eq!(scene.len(), 1);
        assert!(scene.mesh(&"tri".into()).is_some());
        Ok(())
    }
}
