// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Final per-mesh classification table

use super::cross::{CrossPass, PairingTable};
use super::self_sym::{SelfPass, SelfVerdict};
use super::{MeshId, MeshSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Exactly one of these per mesh per pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Classification {
    Unique,
    Center,
    PairedLeft,
    PairedRight,
    /// Near the mirror plane and self-symmetric about its own pivot; needs review
    PotentialSelfSymmetric,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Classification::Center,
        Classification::PairedLeft,
        Classification::PairedRight,
        Classification::PotentialSelfSymmetric,
        Classification::Unique,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Unique => "Unique",
            Classification::Center => "Center",
            Classification::PairedLeft => "PairedLeft",
            Classification::PairedRight => "PairedRight",
            Classification::PotentialSelfSymmetric => "PotentialSelfSymmetric",
        }
    }

    /// Name prefix used by the renaming stage.
    ///
    /// `PotentialSelfSymmetric` is not committed automatically and keeps the
    /// unique prefix until someone reviews it.
    pub fn prefix(&self) -> &'static str {
        match self {
            Classification::Unique | Classification::PotentialSelfSymmetric => "U_",
            Classification::Center => "C_",
            Classification::PairedLeft => "L_",
            Classification::PairedRight => "R_",
        }
    }

    pub fn is_paired(&self) -> bool {
        matches!(self, Classification::PairedLeft | Classification::PairedRight)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one mesh with its partner, if paired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<MeshId>,
    /// Correspondence percentage that decided the verdict, when one was measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correspondence: Option<f64>,
}

impl ClassificationEntry {
    pub fn unique() -> Self {
        Self {
            classification: Classification::Unique,
            partner: None,
            correspondence: None,
        }
    }
}

/// Mesh id to classification, ordered by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationTable(BTreeMap<MeshId, ClassificationEntry>);

impl ClassificationTable {
    pub fn get(&self, id: &MeshId) -> Option<&ClassificationEntry> {
        self.0.get(id)
    }

    pub fn classification(&self, id: &MeshId) -> Option<Classification> {
        self.get(id).map(|e| e.classification)
    }

    pub fn partner(&self, id: &MeshId) -> Option<&MeshId> {
        self.get(id).and_then(|e| e.partner.as_ref())
    }

    pub fn contains(&self, id: &MeshId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MeshId, &ClassificationEntry)> {
        self.0.iter()
    }

    pub fn with_classification(&self, classification: Classification) -> impl Iterator<Item = &MeshId> {
        self.0
            .iter()
            .filter(move |(_, e)| e.classification == classification)
            .map(|(id, _)| id)
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.with_classification(classification).count()
    }
}

impl FromIterator<(MeshId, ClassificationEntry)> for ClassificationTable {
    fn from_iter<I: IntoIterator<Item = (MeshId, ClassificationEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Merge both passes into one table.
///
/// Every snapshot gets an entry, `Unique` by default. Paired meshes take their
/// side from the pairing table; a mesh the cross pass matched is never looked
/// at by the self pass, so the two cannot conflict.
pub fn aggregate(snapshots: &[MeshSnapshot], cross: &CrossPass, own: &SelfPass) -> ClassificationTable {
    let sides = paired_sides(&cross.pairing);

    snapshots
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            let id = snapshot.id();
            let entry = if let Some(entry) = sides.get(id) {
                entry.clone()
            } else {
                match own.checks.get(index).copied().flatten() {
                    Some(check) => ClassificationEntry {
                        classification: match check.verdict {
                            SelfVerdict::Center => Classification::Center,
                            SelfVerdict::PotentialSelfSymmetric => {
                                Classification::PotentialSelfSymmetric
                            }
                            SelfVerdict::NotSymmetric => Classification::Unique,
                        },
                        partner: None,
                        correspondence: check.correspondence,
                    },
                    None => ClassificationEntry::unique(),
                }
            };
            (id.clone(), entry)
        })
        .collect()
}

/// Side and partner of every paired mesh; later pairs overwrite earlier ones
fn paired_sides(pairing: &PairingTable) -> BTreeMap<MeshId, ClassificationEntry> {
    let mut sides = BTreeMap::new();
    for pair in pairing.iter() {
        sides.insert(
            pair.left.clone(),
            ClassificationEntry {
                classification: Classification::PairedLeft,
                partner: Some(pair.right.clone()),
                correspondence: Some(pair.correspondence),
            },
        );
        sides.insert(
            pair.right.clone(),
            ClassificationEntry {
                classification: Classification::PairedRight,
                partner: Some(pair.left.clone()),
                correspondence: Some(pair.correspondence),
            },
        );
    }
    sides
}
