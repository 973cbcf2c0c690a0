use super::helpers::kind_of;
use super::{visibility, CmdMessage, CmdResult};
use crate::error::{BinderyError, Result};
use crate::model::{ChildKind, NodePath};
use crate::order;
use crate::sanitize::safe_name;
use crate::store::{Artifact, TreeStore};

/// Renames a node in place and rewrites its entry in the parent's order
/// record at the same position.
pub fn run<S: TreeStore>(store: &mut S, path: &NodePath, raw_name: &str) -> Result<CmdResult> {
    let Some(parent) = path.parent() else {
        return Err(BinderyError::NotFound(path.to_string()));
    };
    if !store.exists(path) {
        return Err(BinderyError::NotFound(path.to_string()));
    }

    let mut result = CmdResult::default();
    let new_name = safe_name(raw_name);
    if new_name.is_empty() {
        result.add_message(CmdMessage::warning("New name required"));
        return Ok(result);
    }
    if new_name == path.name() {
        result.add_message(CmdMessage::info(format!("Name unchanged: {}", path)));
        return Ok(result.with_affected(path.clone()));
    }

    let kind = kind_of(store, path);
    store.rename_node(path, &new_name)?;
    let renamed = path.with_name(&new_name);

    // Ledger and visibility first: a failed notes carry must not lose position
    order::rename_entry(store, &parent, kind, path.name(), &new_name)?;
    if parent.is_root() {
        visibility::rename(store, path.name(), &new_name)?;
    }
    if kind == ChildKind::Chapters {
        carry_notes(store, path, &renamed)?;
    }

    result.add_message(CmdMessage::success(format!(
        "Renamed {} -> {}",
        path, renamed
    )));
    Ok(result.with_affected(renamed))
}

/// Notes are named after their chapter, so they follow the new name.
fn carry_notes<S: TreeStore>(store: &mut S, old: &NodePath, renamed: &NodePath) -> Result<()> {
    let stale = Artifact::notes_for(old);
    if let Some(notes) = store.read_artifact(renamed, &stale)? {
        store.write_artifact(renamed, &Artifact::notes_for(renamed), &notes)?;
        store.remove_artifact(renamed, &stale)?;
    }
    Ok(())
}
