// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Mesh symmetry detection and pairing
//!
//! A pass runs in three stages over immutable [`MeshSnapshot`]s:
//! 1. Cross-mesh pairing: topology filter, area prefilter, vertex correspondence
//! 2. Self symmetry for every mesh the first stage left unmatched
//! 3. Aggregation into one [`ClassificationTable`]

mod cancel;
mod classification;
mod config;
mod diagnostics;
mod engine;
mod error;
mod provider;
mod snapshot;

pub mod cross;
pub mod matcher;
pub mod prefilter;
pub mod self_sym;
pub mod topology;

pub use cancel::CancellationToken;
pub use classification::{aggregate, Classification, ClassificationEntry, ClassificationTable};
pub use config::{SymmetryConfig, CONFIG_FILE};
pub use cross::{compare_two_meshes, MirrorPair, PairEvaluation, PairMode, PairingTable};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use engine::{ClassificationReport, SymmetryEngine};
pub use error::{ConfigError, GeometryError};
pub use matcher::{MatchTolerances, VertexCorrespondence};
pub use provider::{capture_snapshots, GeometryProvider, SceneProvider, SnapshotSet};
pub use self_sym::{check_self_symmetry, SelfCheck, SelfVerdict};
pub use snapshot::{MeshId, MeshSnapshot, TopologyCounts};
pub use topology::{compatible_pairs, PairCandidate};
