// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Topology compatibility filter

use super::MeshSnapshot;
use serde::{Deserialize, Serialize};

/// Two snapshots with identical vertex, edge and face counts.
///
/// Holds positions in the snapshot slice the candidates were generated from;
/// `first` is the mesh visited first in face-count order. Never `first == second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairCandidate {
    pub first: usize,
    pub second: usize,
}

/// Every pair of snapshots whose topology counts are equal.
///
/// Meshes are visited in ascending face count (ties keep input order), and only
/// meshes inside the same face-count run are compared. The returned order is the
/// order the cross-mesh pass evaluates pairs in.
pub fn compatible_pairs(snapshots: &[MeshSnapshot]) -> Vec<PairCandidate> {
    let mut order: Vec<usize> = (0..snapshots.len()).collect();
    order.sort_by_key(|&i| snapshots[i].topology().faces);

    let mut candidates = Vec::new();
    let mut run_start = 0;

    while run_start < order.len() {
        let faces = snapshots[order[run_start]].topology().faces;
        let run_end = order[run_start..]
            .iter()
            .position(|&i| snapshots[i].topology().faces != faces)
            .map_or(order.len(), |offset| run_start + offset);

        let run = &order[run_start..run_end];
        for (k, &a) in run.iter().enumerate() {
            for &b in &run[k + 1..] {
                if snapshots[a].topology() == snapshots[b].topology() {
                    candidates.push(PairCandidate { first: a, second: b });
                }
            }
        }

        run_start = run_end;
    }

    candidates
}
