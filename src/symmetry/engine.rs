// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Classification pass: cross-mesh pairing, then self symmetry, then merge

use super::classification::{aggregate, ClassificationTable};
use super::cross::{find_mirror_pairs, PairingTable};
use super::provider::{capture_snapshots, GeometryProvider};
use super::self_sym::find_self_symmetric;
use super::topology::compatible_pairs;
use super::{CancellationToken, Diagnostic, DiagnosticKind, MeshSnapshot, SymmetryConfig};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Instant;
use tracing::{info, info_span, warn};

/// Everything one pass produces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub table: ClassificationTable,
    pub pairs: PairingTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl ClassificationReport {
    pub fn was_cancelled(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Cancelled)
    }
}

/// Symmetry engine
pub struct SymmetryEngine {
    config: SymmetryConfig,
    cancel: CancellationToken,
}

impl Default for SymmetryEngine {
    fn default() -> Self {
        Self::new(SymmetryConfig::default())
    }
}

impl SymmetryEngine {
    pub fn new(config: SymmetryConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `cancel` instead of the engine's own token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &SymmetryConfig {
        &self.config
    }

    /// Handle that stops a running pass from another thread
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Classify a set of snapshots.
    ///
    /// The input is never modified and the result only depends on it and the
    /// configuration, so repeated calls give identical reports. A snapshot whose
    /// id repeats an earlier one is dropped with a `DuplicateMesh` diagnostic.
    pub fn classify(&self, snapshots: &[MeshSnapshot]) -> ClassificationReport {
        let span = info_span!("classify", meshes = snapshots.len());
        let _enter = span.enter();
        let start = Instant::now();

        let mut diagnostics = Vec::new();
        let snapshots = dedup(snapshots, &mut diagnostics);

        let candidates = compatible_pairs(&snapshots);
        info!(candidates = candidates.len(), "topology filter done");

        let cross = find_mirror_pairs(&snapshots, &candidates, &self.config, &self.cancel);
        let own = find_self_symmetric(&snapshots, &cross.matched, &self.config, &self.cancel);
        let table = aggregate(&snapshots, &cross, &own);

        diagnostics.extend(cross.diagnostics.iter().cloned());
        diagnostics.extend(own.diagnostics.iter().cloned());

        info!(
            meshes = table.len(),
            pairs = cross.pairing.len(),
            diagnostics = diagnostics.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "classification finished"
        );

        ClassificationReport {
            table,
            pairs: cross.pairing,
            diagnostics,
        }
    }

    /// Capture snapshots from `provider` and classify them.
    ///
    /// Meshes the provider cannot describe are missing from the table and listed
    /// in the diagnostics.
    pub fn classify_provider<P: GeometryProvider + ?Sized>(&self, provider: &P) -> ClassificationReport {
        let captured = capture_snapshots(provider);
        let mut report = self.classify(&captured.snapshots);

        let mut diagnostics = captured.diagnostics;
        diagnostics.append(&mut report.diagnostics);
        report.diagnostics = diagnostics;
        report
    }
}

fn dedup<'a>(snapshots: &'a [MeshSnapshot], diagnostics: &mut Vec<Diagnostic>) -> Cow<'a, [MeshSnapshot]> {
    let mut seen = AHashSet::with_capacity(snapshots.len());
    if snapshots.iter().all(|s| seen.insert(s.id())) {
        return Cow::Borrowed(snapshots);
    }

    seen.clear();
    let mut unique = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        if seen.insert(snapshot.id()) {
            unique.push(snapshot.clone());
        } else {
            warn!(mesh = %snapshot.id(), "duplicate snapshot dropped");
            diagnostics.push(Diagnostic::for_mesh(
                snapshot.id(),
                DiagnosticKind::DuplicateMesh,
                "snapshot id appears more than once",
            ));
        }
    }
    Cow::Owned(unique)
}
