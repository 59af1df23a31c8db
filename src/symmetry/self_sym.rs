// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Self-symmetry classifier: meshes that mirror onto themselves

use super::matcher::{self_correspondence, MatchTolerances};
use super::{CancellationToken, Diagnostic, GeometryError, MeshSnapshot, SymmetryConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Verdict for one mesh tested against itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelfVerdict {
    /// Pivot on the mirror plane and vertices mirror each other
    Center,
    /// Pivot slightly off the plane, but mirrored about its own pivot
    PotentialSelfSymmetric,
    /// Not self-symmetric, or too far off-centre to be tested
    NotSymmetric,
}

/// Where the mirror plane was put and how well the vertices matched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfCheck {
    pub verdict: SelfVerdict,
    /// Plane position along the mirror axis, absent when no test ran
    pub plane: Option<f64>,
    pub correspondence: Option<f64>,
}

impl SelfCheck {
    fn skipped() -> Self {
        Self {
            verdict: SelfVerdict::NotSymmetric,
            plane: None,
            correspondence: None,
        }
    }
}

/// Test one mesh for bilateral symmetry along `config.mirror_axis`.
///
/// Pivots within `centre_epsilon` of the world plane are tested about that
/// pivot and may become `Center`. Pivots inside the nearly-centred band
/// (`centre_epsilon ..= near_centre_limit`) are tested about their own pivot
/// and can at most become `PotentialSelfSymmetric`. Anything further out is
/// not tested.
pub fn check_self_symmetry(
    snapshot: &MeshSnapshot,
    config: &SymmetryConfig,
) -> Result<SelfCheck, GeometryError> {
    let axis = config.mirror_axis;
    let pivot = axis.component(&snapshot.pivot());
    let distance = pivot.abs();

    let positive = if distance < config.centre_epsilon {
        SelfVerdict::Center
    } else if distance <= config.near_centre_limit {
        SelfVerdict::PotentialSelfSymmetric
    } else {
        return Ok(SelfCheck::skipped());
    };

    let tolerances = MatchTolerances {
        position: config.position_tolerance,
        angle_deg: config.self_angle_tolerance,
    };
    let pct = self_correspondence(snapshot, axis, pivot, config.plane_band_divisor, tolerances)?
        .percentage();

    let verdict = if pct >= config.self_confidence {
        positive
    } else {
        SelfVerdict::NotSymmetric
    };

    Ok(SelfCheck {
        verdict,
        plane: Some(pivot),
        correspondence: Some(pct),
    })
}

/// Results of the self-symmetry pass, indexed like the snapshot slice
#[derive(Debug, Clone, Default)]
pub struct SelfPass {
    /// `None` for meshes that were skipped (already paired) or not reached
    pub checks: Vec<Option<SelfCheck>>,
    pub diagnostics: Vec<Diagnostic>,
    pub cancelled: bool,
}

/// Check every mesh not flagged in `skip`.
///
/// A mesh whose geometry cannot be tested (no extent along the axis) gets a
/// `DegenerateGeometry` diagnostic and no verdict; it stays `Unique`.
pub fn find_self_symmetric(
    snapshots: &[MeshSnapshot],
    skip: &[bool],
    config: &SymmetryConfig,
    cancel: &CancellationToken,
) -> SelfPass {
    enum Outcome {
        Skipped,
        Cancelled,
        Checked(SelfCheck),
        Failed(GeometryError),
    }

    let run = |(index, snapshot): (usize, &MeshSnapshot)| -> Outcome {
        if skip.get(index).copied().unwrap_or(false) {
            return Outcome::Skipped;
        }
        if cancel.is_cancelled() {
            return Outcome::Cancelled;
        }
        match check_self_symmetry(snapshot, config) {
            Ok(check) => {
                debug!(
                    mesh = %snapshot.id(),
                    verdict = ?check.verdict,
                    correspondence = ?check.correspondence,
                    "self check"
                );
                Outcome::Checked(check)
            }
            Err(err) => Outcome::Failed(err),
        }
    };

    let outcomes: Vec<Outcome> = if config.parallel {
        snapshots.par_iter().enumerate().map(run).collect()
    } else {
        snapshots.iter().enumerate().map(run).collect()
    };

    let mut pass = SelfPass {
        checks: Vec::with_capacity(snapshots.len()),
        ..SelfPass::default()
    };

    for outcome in outcomes {
        let check = match outcome {
            Outcome::Checked(check) => Some(check),
            Outcome::Skipped => None,
            Outcome::Cancelled => {
                pass.cancelled = true;
                None
            }
            Outcome::Failed(err) => {
                warn!(error = %err, "self-symmetry test skipped");
                pass.diagnostics.push(err.into());
                None
            }
        };
        pass.checks.push(check);
    }

    if pass.cancelled {
        pass.diagnostics.push(Diagnostic::cancelled(
            "self-symmetry pass cancelled; unchecked meshes stay Unique",
        ));
    }

    info!(
        checked = pass.checks.iter().filter(|c| c.is_some()).count(),
        centred = pass
            .checks
            .iter()
            .flatten()
            .filter(|c| c.verdict == SelfVerdict::Center)
            .count(),
        "self-symmetry pass finished"
    );

    pass
}
