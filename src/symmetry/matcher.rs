// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Vertex correspondence matching.
//!
//! Every vertex is reduced to two numbers: its signed offset from the mirror
//! plane and its bearing, the angle (in degrees) of the vertex around the
//! mirror axis measured from the two remaining world axes. A mirrored vertex
//! has the opposite offset and the same bearing.
//!
//! Matching is greedy: each source vertex, in order, takes the first target
//! vertex that is not yet consumed and lies within both tolerances. This is
//! first-match-wins, not an optimal assignment; an unlucky early match can
//! steal a partner that a later vertex needed.

use super::{GeometryError, MeshSnapshot};
use crate::geometry::Axis;
use crate::utils::math::{bearing_deg, percentage};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Position and angle tolerances for one matching run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchTolerances {
    /// Largest `|offset_source + offset_target|`, in world units
    pub position: f64,
    /// Largest bearing difference, in degrees
    pub angle_deg: f64,
}

/// Result of matching one vertex list against another
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexCorrespondence {
    /// Number of vertices in the source list
    pub source_len: usize,
    /// Matched `(source vertex, target vertex)` indices, in source order
    pub pairs: Vec<(usize, usize)>,
}

impl VertexCorrespondence {
    pub fn unmatched(source_len: usize) -> Self {
        Self {
            source_len,
            pairs: Vec::new(),
        }
    }

    pub fn matched(&self) -> usize {
        self.pairs.len()
    }

    /// Matched share of the source list; 0 for an empty source
    pub fn percentage(&self) -> f64 {
        percentage(self.matched(), self.source_len)
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisSample {
    index: usize,
    offset: f64,
    bearing: f64,
}

impl AxisSample {
    fn new(index: usize, point: &Point3<f64>, axis: Axis, plane: f64) -> Self {
        let (first, second) = axis.orthogonal();
        Self {
            index,
            offset: axis.component(point) - plane,
            bearing: bearing_deg(first.component(point), second.component(point)),
        }
    }
}

fn ascending(a: &AxisSample, b: &AxisSample) -> Ordering {
    a.offset.total_cmp(&b.offset)
}

fn descending(a: &AxisSample, b: &AxisSample) -> Ordering {
    b.offset.total_cmp(&a.offset)
}

/// Greedy one-to-one matching of `source` against `target`.
///
/// Consumed targets are tracked in a separate flag array; neither list is
/// modified while it is scanned.
fn match_samples(
    source: &[AxisSample],
    target: &[AxisSample],
    tolerances: MatchTolerances,
) -> VertexCorrespondence {
    let mut consumed = vec![false; target.len()];
    let mut result = VertexCorrespondence::unmatched(source.len());

    for s in source {
        let hit = target.iter().enumerate().find(|(j, t)| {
            !consumed[*j]
                && (s.offset + t.offset).abs() < tolerances.position
                && (s.bearing - t.bearing).abs() < tolerances.angle_deg
        });

        if let Some((j, t)) = hit {
            consumed[j] = true;
            result.pairs.push((s.index, t.index));
        }
    }

    result
}

/// Match one mesh against itself across the plane `axis = plane`.
///
/// Vertices within `extent / band_divisor` of the plane are treated as lying on
/// it and ignored. The rest are split by side; unequal sides mean the mesh
/// cannot be symmetric and no matching is attempted. The positive side is the
/// source list.
pub fn self_correspondence(
    snapshot: &MeshSnapshot,
    axis: Axis,
    plane: f64,
    band_divisor: f64,
    tolerances: MatchTolerances,
) -> Result<VertexCorrespondence, GeometryError> {
    let extent = snapshot.bounding_box().extent(axis);
    if extent <= 0.0 {
        return Err(GeometryError::degenerate(
            snapshot.id(),
            format!("bounding box has no extent along {}", axis),
        ));
    }
    let band = extent / band_divisor;

    let (mut positive, mut negative): (Vec<AxisSample>, Vec<AxisSample>) = snapshot
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, p)| AxisSample::new(i, p, axis, plane))
        .filter(|s| s.offset.abs() > band)
        .partition(|s| s.offset > 0.0);

    if positive.len() != negative.len() {
        return Ok(VertexCorrespondence::unmatched(positive.len()));
    }

    positive.sort_by(ascending);
    negative.sort_by(descending);

    Ok(match_samples(&positive, &negative, tolerances))
}

/// Match `source` against `target` as mirror images across the world plane
/// perpendicular to `axis`.
///
/// No side split happens here; the full vertex lists are compared, source in
/// ascending and target in descending order along the axis.
pub fn cross_correspondence(
    source: &MeshSnapshot,
    target: &MeshSnapshot,
    axis: Axis,
    tolerances: MatchTolerances,
) -> VertexCorrespondence {
    let samples = |snapshot: &MeshSnapshot| -> Vec<AxisSample> {
        snapshot
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, p)| AxisSample::new(i, p, axis, 0.0))
            .collect()
    };

    let mut src = samples(source);
    let mut tgt = samples(target);
    src.sort_by(ascending);
    tgt.sort_by(descending);

    match_samples(&src, &tgt, tolerances)
}
