// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Error types for snapshot capture and engine configuration

use super::MeshId;
use thiserror::Error;

/// Failure to obtain or trust the geometry of one mesh
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The provider could not report a required quantity
    #[error("mesh `{mesh}` cannot report {what}")]
    MissingData { mesh: MeshId, what: &'static str },

    /// The provider does not know the mesh at all
    #[error("mesh `{0}` is not part of the scene")]
    UnknownMesh(MeshId),

    /// The geometry exists but is unusable for symmetry tests
    #[error("mesh `{mesh}` is degenerate: {reason}")]
    Degenerate { mesh: MeshId, reason: String },
}

impl GeometryError {
    pub fn missing(mesh: &MeshId, what: &'static str) -> Self {
        Self::MissingData {
            mesh: mesh.clone(),
            what,
        }
    }

    pub fn degenerate(mesh: &MeshId, reason: impl Into<String>) -> Self {
        Self::Degenerate {
            mesh: mesh.clone(),
            reason: reason.into(),
        }
    }

    pub fn mesh(&self) -> &MeshId {
        match self {
            Self::MissingData { mesh, .. } | Self::Degenerate { mesh, .. } => mesh,
            Self::UnknownMesh(mesh) => mesh,
        }
    }
}

/// Rejected engine configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite, non-negative number (got {value})")]
    NotNonNegative { field: &'static str, value: f64 },

    #[error("`{field}` must be a percentage between 0 and 100 (got {value})")]
    NotPercentage { field: &'static str, value: f64 },

    #[error("`near_centre_limit` ({limit}) must not be below `centre_epsilon` ({epsilon})")]
    CentreBand { epsilon: f64, limit: f64 },

    #[error("`plane_band_divisor` must be positive (got {0})")]
    PlaneBandDivisor(f64),
}
