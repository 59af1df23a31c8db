// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Name prefixes derived from a classification table
//!
//! Nothing here touches a scene; callers get proposed names and apply them
//! themselves.

use crate::symmetry::{Classification, ClassificationTable, MeshId};
use serde::{Deserialize, Serialize};

/// Prefix used for groups whose children disagree and contain a unique mesh
pub const UNIQUE_PREFIX: &str = "U_";
/// Prefix used for groups whose children disagree and are all symmetric
pub const CENTER_PREFIX: &str = "C_";

/// Leading prefix of a name: one word character followed by `_`
pub fn current_prefix(name: &str) -> Option<&str> {
    let mut chars = name.char_indices();
    let (_, first) = chars.next()?;
    let (at, second) = chars.next()?;
    if (first.is_alphanumeric() || first == '_') && second == '_' {
        Some(&name[..at + second.len_utf8()])
    } else {
        None
    }
}

/// Name carrying the prefix for `classification`.
///
/// A different existing prefix is replaced, a missing one is prepended, and a
/// name that is already correct comes back unchanged.
pub fn propose_name(name: &str, classification: Classification) -> String {
    let wanted = classification.prefix();
    match current_prefix(name) {
        Some(prefix) if prefix == wanted => name.to_string(),
        Some(prefix) => format!("{}{}", wanted, &name[prefix.len()..]),
        None => format!("{}{}", wanted, name),
    }
}

/// Prefix a group should carry given the prefixes of its children.
///
/// Children that all agree decide it. Otherwise any unique child makes the
/// group unique, and a group of mixed symmetric children is centred. `None` for
/// a group without children.
pub fn group_prefix<'a, I>(children: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut distinct: Vec<&str> = Vec::new();
    for prefix in children {
        if !distinct.contains(&prefix) {
            distinct.push(prefix);
        }
    }

    match distinct.as_slice() {
        [] => None,
        [only] => Some(*only),
        many if many.contains(&UNIQUE_PREFIX) => Some(UNIQUE_PREFIX),
        _ => Some(CENTER_PREFIX),
    }
}

/// One proposed rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub mesh: MeshId,
    pub current: String,
    pub proposed: String,
}

/// Renames needed to bring every mesh name in line with its classification,
/// in table order. Meshes already named correctly are left out.
pub fn rename_plan(table: &ClassificationTable) -> Vec<Rename> {
    table
        .iter()
        .filter_map(|(id, entry)| {
            let proposed = propose_name(id.as_str(), entry.classification);
            (proposed != id.as_str()).then(|| Rename {
                mesh: id.clone(),
                current: id.as_str().to_string(),
                proposed,
            })
        })
        .collect()
}
