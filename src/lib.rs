// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Meshsym
//!
//! Mesh symmetry detection and mirror pairing for asset pipelines.
//! Classifies every mesh of a scene as centred, paired left/right with a
//! mirrored partner, potentially self-symmetric, or unique.

pub mod cli;
pub mod geometry;
pub mod io;
pub mod naming;
pub mod symmetry;
pub mod utils;

pub use geometry::{Axis, BoundingBox, Face, PolyMesh, Primitive};
pub use io::load_scene;
pub use symmetry::{
    Classification, ClassificationReport, ClassificationTable, MeshId, MeshSnapshot, SymmetryConfig,
    SymmetryEngine,
};

use anyhow::Result;
use std::path::Path;

/// Classify snapshots with the default configuration
pub fn classify(snapshots: &[MeshSnapshot]) -> ClassificationReport {
    SymmetryEngine::default().classify(snapshots)
}

/// Load a scene file and classify it with the configuration from
/// `meshsym.toml` / `MESHSYM_*` when present
pub fn classify_scene(path: impl AsRef<Path>) -> Result<ClassificationReport> {
    let scene = load_scene(path)?;
    let engine = SymmetryEngine::new(SymmetryConfig::load()?);
    Ok(engine.classify_provider(&scene))
}
