// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Cross-mesh symmetry classifier: finds mirrored pairs

use super::matcher::{cross_correspondence, MatchTolerances};
use super::prefilter::{areas_match, is_off_centre, pivots_plausible, right_then_left};
use super::topology::PairCandidate;
use super::{CancellationToken, Diagnostic, DiagnosticKind, MeshId, MeshSnapshot, SymmetryConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How strictly two meshes are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairMode {
    /// Topology, area and pivot plausibility are enough
    Centred,
    /// Both pivots must sit off the mirror plane and the vertices must mirror
    /// each other
    OffCentre,
}

/// Outcome of testing one pair of meshes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairEvaluation {
    pub topology_match: bool,
    pub area_match: bool,
    pub pivots_plausible: bool,
    pub off_centre: bool,
    /// Correspondence percentage, absent when the vertex pass was skipped
    pub correspondence: Option<f64>,
    pub matched: bool,
}

impl PairEvaluation {
    fn rejected(topology_match: bool) -> Self {
        Self {
            topology_match,
            area_match: false,
            pivots_plausible: false,
            off_centre: false,
            correspondence: None,
            matched: false,
        }
    }
}

/// Test two meshes for mirror symmetry.
///
/// Topology and area are hard gates in both modes; a failed area check skips
/// the vertex pass entirely.
pub fn compare_two_meshes(
    a: &MeshSnapshot,
    b: &MeshSnapshot,
    mode: PairMode,
    config: &SymmetryConfig,
) -> PairEvaluation {
    if a.topology() != b.topology() {
        return PairEvaluation::rejected(false);
    }
    if !areas_match(a, b, config.area_tolerance) {
        return PairEvaluation::rejected(true);
    }

    let axis = config.mirror_axis;
    let plausible = pivots_plausible(a, b, config.pivot_tolerance);
    let off_centre =
        is_off_centre(a, axis, config.centre_epsilon) && is_off_centre(b, axis, config.centre_epsilon);

    let mut evaluation = PairEvaluation {
        topology_match: true,
        area_match: true,
        pivots_plausible: plausible,
        off_centre,
        correspondence: None,
        matched: false,
    };

    match mode {
        PairMode::Centred => {
            evaluation.matched = plausible;
        }
        PairMode::OffCentre => {
            // The mesh further along the axis is the source list
            let (source, target) = if axis.component(&a.pivot()) > axis.component(&b.pivot()) {
                (a, b)
            } else {
                (b, a)
            };
            let tolerances = MatchTolerances {
                position: config.position_tolerance,
                angle_deg: config.cross_angle_tolerance,
            };
            let pct = cross_correspondence(source, target, axis, tolerances).percentage();
            evaluation.correspondence = Some(pct);
            evaluation.matched = off_centre && pct > config.cross_confidence;
        }
    }

    evaluation
}

/// Two meshes recognised as mirror images of each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorPair {
    pub left: MeshId,
    pub right: MeshId,
    pub correspondence: f64,
}

impl MirrorPair {
    pub fn contains(&self, id: &MeshId) -> bool {
        &self.left == id || &self.right == id
    }

    pub fn partner_of(&self, id: &MeshId) -> Option<&MeshId> {
        if &self.left == id {
            Some(&self.right)
        } else if &self.right == id {
            Some(&self.left)
        } else {
            None
        }
    }
}

/// Mirrored pairs in the order they were accepted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairingTable {
    pub pairs: Vec<MirrorPair>,
}

impl PairingTable {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MirrorPair> {
        self.pairs.iter()
    }

    /// Partner from the last accepted pair that mentions `id`
    pub fn partner_of(&self, id: &MeshId) -> Option<&MeshId> {
        self.pairs.iter().rev().find_map(|p| p.partner_of(id))
    }
}

/// Everything the cross-mesh pass hands to the next stages
#[derive(Debug, Clone, Default)]
pub struct CrossPass {
    pub pairing: PairingTable,
    /// Indexed like the snapshot slice
    pub matched: Vec<bool>,
    pub diagnostics: Vec<Diagnostic>,
    pub cancelled: bool,
}

/// Run the off-centre pair test over all candidates and build the pairing table.
///
/// Candidates are evaluated independently (on the rayon pool when
/// `config.parallel` is set) and then accepted one by one in candidate order.
/// Unless `config.allow_rematch` is set, a pair whose meshes were already
/// claimed is not accepted and an `AmbiguousMatch` diagnostic is raised instead.
pub fn find_mirror_pairs(
    snapshots: &[MeshSnapshot],
    candidates: &[PairCandidate],
    config: &SymmetryConfig,
    cancel: &CancellationToken,
) -> CrossPass {
    let evaluate = |candidate: &PairCandidate| -> Option<PairEvaluation> {
        if cancel.is_cancelled() {
            return None;
        }
        let (a, b) = (&snapshots[candidate.first], &snapshots[candidate.second]);
        let evaluation = compare_two_meshes(a, b, PairMode::OffCentre, config);
        debug!(
            first = %a.id(),
            second = %b.id(),
            area_match = evaluation.area_match,
            correspondence = ?evaluation.correspondence,
            matched = evaluation.matched,
            "pair evaluated"
        );
        Some(evaluation)
    };

    let evaluations: Vec<Option<PairEvaluation>> = if config.parallel {
        candidates.par_iter().map(evaluate).collect()
    } else {
        let mut out = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let evaluation = evaluate(candidate);
            let stop = evaluation.is_none();
            out.push(evaluation);
            if stop {
                break;
            }
        }
        out
    };

    let mut pass = CrossPass {
        matched: vec![false; snapshots.len()],
        ..CrossPass::default()
    };

    for (candidate, evaluation) in candidates.iter().zip(evaluations) {
        let Some(evaluation) = evaluation else {
            pass.cancelled = true;
            pass.diagnostics.push(Diagnostic::cancelled(
                "pair search cancelled before every candidate was tested",
            ));
            break;
        };
        if !evaluation.matched {
            continue;
        }

        let (a, b) = (&snapshots[candidate.first], &snapshots[candidate.second]);
        let claimed = pass.matched[candidate.first] || pass.matched[candidate.second];
        if claimed && !config.allow_rematch {
            for (index, snapshot) in [(candidate.first, a), (candidate.second, b)] {
                if pass.matched[index] {
                    let other = if index == candidate.first { b } else { a };
                    pass.diagnostics.push(Diagnostic::for_mesh(
                        snapshot.id(),
                        DiagnosticKind::AmbiguousMatch,
                        format!(
                            "also mirrors `{}`; kept the earlier partner `{}`",
                            other.id(),
                            pass.pairing
                                .partner_of(snapshot.id())
                                .map(MeshId::as_str)
                                .unwrap_or("?"),
                        ),
                    ));
                }
            }
            continue;
        }

        let (right, left) = right_then_left(a, b, config.mirror_axis);
        pass.pairing.pairs.push(MirrorPair {
            left: left.id().clone(),
            right: right.id().clone(),
            correspondence: evaluation.correspondence.unwrap_or(0.0),
        });
        pass.matched[candidate.first] = true;
        pass.matched[candidate.second] = true;
    }

    info!(
        candidates = candidates.len(),
        pairs = pass.pairing.len(),
        cancelled = pass.cancelled,
        "cross-mesh pass finished"
    );

    pass
}
