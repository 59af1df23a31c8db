// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! JSON classification reports

use crate::symmetry::{
    Classification, ClassificationReport, ClassificationTable, Diagnostic, MeshId, MirrorPair,
    SymmetryConfig,
};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Compact per-mesh tag, one key per mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SummaryTag {
    #[serde(rename = "U")]
    Unique(bool),
    #[serde(rename = "C")]
    Center(bool),
    #[serde(rename = "PAIRS")]
    Pairs(MeshId),
    #[serde(rename = "POTENTIAL SYM")]
    PotentialSymmetric(bool),
}

/// `{mesh: {"U": true} | {"C": true} | {"PAIRS": partner} | {"POTENTIAL SYM": true}}`
pub fn summarize(table: &ClassificationTable) -> BTreeMap<MeshId, SummaryTag> {
    table
        .iter()
        .map(|(id, entry)| {
            let tag = match (entry.classification, &entry.partner) {
                (Classification::Center, _) => SummaryTag::Center(true),
                (Classification::PotentialSelfSymmetric, _) => SummaryTag::PotentialSymmetric(true),
                (c, Some(partner)) if c.is_paired() => SummaryTag::Pairs(partner.clone()),
                _ => SummaryTag::Unique(true),
            };
            (id.clone(), tag)
        })
        .collect()
}

/// Counts per classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub total: usize,
    pub center: usize,
    pub left: usize,
    pub right: usize,
    pub potential: usize,
    pub unique: usize,
}

impl ClassCounts {
    pub fn of(table: &ClassificationTable) -> Self {
        Self {
            total: table.len(),
            center: table.count(Classification::Center),
            left: table.count(Classification::PairedLeft),
            right: table.count(Classification::PairedRight),
            potential: table.count(Classification::PotentialSelfSymmetric),
            unique: table.count(Classification::Unique),
        }
    }
}

/// Complete report of one classification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymmetryReport {
    pub timestamp: String,
    pub scene: String,
    pub config: SymmetryConfig,
    pub counts: ClassCounts,
    pub meshes: ClassificationTable,
    pub pairs: Vec<MirrorPair>,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: BTreeMap<MeshId, SummaryTag>,
}

impl SymmetryReport {
    pub fn new(scene: impl Into<String>, config: &SymmetryConfig, report: &ClassificationReport) -> Self {
        Self {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            scene: scene.into(),
            config: config.clone(),
            counts: ClassCounts::of(&report.table),
            meshes: report.table.clone(),
            pairs: report.pairs.pairs.clone(),
            diagnostics: report.diagnostics.clone(),
            summary: summarize(&report.table),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }
}
