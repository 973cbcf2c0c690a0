//! # Order Ledger
//!
//! Each node may carry an order record listing its children by kind. The
//! record is advisory: the directory tree decides what exists, the record
//! only decides where it shows up.
//!
//! Listing merges the two in two phases ([`reconcile`]):
//!
//! 1. **Tracked**: names from the record, in record order, that still exist.
//! 2. **Untracked**: existing names missing from the record, oldest first.
//!
//! A missing or unreadable record is the same as an empty one, so a damaged
//! ledger degrades to creation-time order instead of failing the listing.

use crate::error::Result;
use crate::model::{ChildEntry, ChildKind, Direction, NodePath};
use crate::store::{Artifact, TreeStore};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub chapters: Vec<String>,
}

impl OrderRecord {
    pub fn names(&self, kind: ChildKind) -> &[String] {
        match kind {
            ChildKind::Folders => &self.folders,
            ChildKind::Chapters => &self.chapters,
        }
    }

    pub fn names_mut(&mut self, kind: ChildKind) -> &mut Vec<String> {
        match kind {
            ChildKind::Folders => &mut self.folders,
            ChildKind::Chapters => &mut self.chapters,
        }
    }
}

/// Reads the order record of `path`. Never fails.
pub fn load<S: TreeStore>(store: &S, path: &NodePath) -> OrderRecord {
    match store.read_artifact(path, &Artifact::Order) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("ignoring corrupt order record for '{}': {}", path, e);
            OrderRecord::default()
        }),
        Ok(None) => OrderRecord::default(),
        Err(e) => {
            warn!("could not read order record for '{}': {}", path, e);
            OrderRecord::default()
        }
    }
}

/// Writes the whole record in one replace.
pub fn save<S: TreeStore>(store: &mut S, path: &NodePath, record: &OrderRecord) -> Result<()> {
    let content = serde_json::to_string_pretty(record)?;
    store.write_artifact(path, &Artifact::Order, &content)
}

/// Recorded names that still exist (record order), then the rest by
/// creation time. Never yields duplicates or names outside `actual`.
pub fn reconcile(recorded: &[String], actual: &[ChildEntry]) -> Vec<String> {
    let present: HashSet<&str> = actual.iter().map(|c| c.name.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    let mut ordered: Vec<String> = recorded
        .iter()
        .filter(|name| present.contains(name.as_str()) && seen.insert(name.as_str()))
        .cloned()
        .collect();

    let mut untracked: Vec<&ChildEntry> = actual
        .iter()
        .filter(|c| !seen.contains(c.name.as_str()))
        .collect();
    untracked.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
    ordered.extend(untracked.into_iter().map(|c| c.name.clone()));
    ordered
}

/// Current effective order of one child kind under `path`.
pub fn ordered_children<S: TreeStore>(
    store: &S,
    path: &NodePath,
    kind: ChildKind,
) -> Result<Vec<String>> {
    let record = load(store, path);
    let actual: Vec<ChildEntry> = store
        .list_children(path)?
        .into_iter()
        .filter(|c| c.kind() == kind)
        .collect();
    Ok(reconcile(record.names(kind), &actual))
}

/// Swaps `name` with its neighbour in `direction`. Returns false when
/// nothing moved (unknown name, or already at that boundary).
pub fn move_entry<S: TreeStore>(
    store: &mut S,
    path: &NodePath,
    kind: ChildKind,
    name: &str,
    direction: Direction,
) -> Result<bool> {
    let mut names = ordered_children(store, path, kind)?;
    let Some(index) = names.iter().position(|n| n == name) else {
        return Ok(false);
    };
    let neighbour = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < names.len() => index + 1,
        _ => return Ok(false),
    };
    names.swap(index, neighbour);

    let mut record = load(store, path);
    *record.names_mut(kind) = names;
    save(store, path, &record)?;
    Ok(true)
}

/// Overwrites the order of one kind wholesale.
pub fn replace<S: TreeStore>(
    store: &mut S,
    path: &NodePath,
    kind: ChildKind,
    names: Vec<String>,
) -> Result<()> {
    let mut record = load(store, path);
    *record.names_mut(kind) = names;
    save(store, path, &record)
}

/// Substitutes `old` with `new` at the same index. No-op if `old` was
/// never tracked.
pub fn rename_entry<S: TreeStore>(
    store: &mut S,
    path: &NodePath,
    kind: ChildKind,
    old: &str,
    new: &str,
) -> Result<bool> {
    let mut record = load(store, path);
    let Some(slot) = record.names_mut(kind).iter_mut().find(|n| n.as_str() == old) else {
        return Ok(false);
    };
    *slot = new.to_string();
    save(store, path, &record)?;
    Ok(true)
}

/// Drops `name` from the record, if tracked.
pub fn remove_entry<S: TreeStore>(
    store: &mut S,
    path: &NodePath,
    kind: ChildKind,
    name: &str,
) -> Result<bool> {
    let mut record = load(store, path);
    let names = record.names_mut(kind);
    let before = names.len();
    names.retain(|n| n != name);
    if names.len() == before {
        return Ok(false);
    }
    save(store, path, &record)?;
    Ok(true)
}
