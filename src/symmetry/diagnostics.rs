// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Per-mesh diagnostics reported next to the classification table

use super::{GeometryError, MeshId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What went wrong for a mesh (or for the whole pass)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Positions, counts, area or pivot could not be read; mesh excluded
    MissingGeometryData,
    /// Zero vertices, zero area, or no extent along the tested axis
    DegenerateGeometry,
    /// Another identifier already claimed this mesh id; duplicate excluded
    DuplicateMesh,
    /// Mesh passed against more than one partner, first match kept
    AmbiguousMatch,
    /// Pass stopped early; unchecked meshes were left `Unique`
    Cancelled,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingGeometryData => "missing-geometry-data",
            DiagnosticKind::DegenerateGeometry => "degenerate-geometry",
            DiagnosticKind::DuplicateMesh => "duplicate-mesh",
            DiagnosticKind::AmbiguousMatch => "ambiguous-match",
            DiagnosticKind::Cancelled => "cancelled",
        }
    }
}

/// One diagnostic line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshId>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(mesh: Option<MeshId>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            mesh,
            kind,
            message: message.into(),
        }
    }

    pub fn for_mesh(mesh: &MeshId, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Some(mesh.clone()), kind, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(None, DiagnosticKind::Cancelled, message)
    }
}

impl From<GeometryError> for Diagnostic {
    fn from(err: GeometryError) -> Self {
        let kind = match err {
            GeometryError::Degenerate { .. } => DiagnosticKind::DegenerateGeometry,
            GeometryError::MissingData { .. } | GeometryError::UnknownMesh(_) => {
                DiagnosticKind::MissingGeometryData
            }
        };
        Self::for_mesh(err.mesh(), kind, err.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mesh {
            Some(mesh) => write!(f, "[{}] {}: {}", self.kind.as_str(), mesh, self.message),
            None => write!(f, "[{}] {}", self.kind.as_str(), self.message),
        }
    }
}
