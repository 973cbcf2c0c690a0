use crate::error::{BinderyError, Result};
use crate::model::{ChildKind, NodePath};
use crate::order;
use crate::store::TreeStore;

pub fn require_node<S: TreeStore>(store: &S, path: &NodePath) -> Result<()> {
    if store.exists(path) {
        Ok(())
    } else {
        Err(BinderyError::NotFound(path.to_string()))
    }
}

pub fn require_book<S: TreeStore>(store: &S, path: &NodePath) -> Result<()> {
    if path.depth() == 1 && store.exists(path) {
        Ok(())
    } else {
        Err(BinderyError::NotFound(format!("book '{}'", path)))
    }
}

pub fn require_chapter<S: TreeStore>(store: &S, path: &NodePath) -> Result<()> {
    if store.is_chapter(path) {
        Ok(())
    } else {
        Err(BinderyError::NotFound(format!("chapter '{}'", path)))
    }
}

/// Ledger kind a node is tracked under in its parent's order record.
pub fn kind_of<S: TreeStore>(store: &S, path: &NodePath) -> ChildKind {
    store.node_kind(path).ledger_kind()
}

/// Every chapter under `root` in reading order: a folder's own chapters in
/// ledger order, then each sub-folder's, depth first.
pub fn walk_chapters<S: TreeStore>(store: &S, root: &NodePath) -> Result<Vec<NodePath>> {
    let mut chapters = Vec::new();
    collect_chapters(store, root, &mut chapters)?;
    Ok(chapters)
}

fn collect_chapters<S: TreeStore>(
    store: &S,
    path: &NodePath,
    out: &mut Vec<NodePath>,
) -> Result<()> {
    if store.is_chapter(path) {
        out.push(path.clone());
        return Ok(());
    }
    for name in order::ordered_children(store, path, ChildKind::Chapters)? {
        out.push(path.child(&name));
    }
    for name in order::ordered_children(store, path, ChildKind::Folders)? {
        collect_chapters(store, &path.child(&name), out)?;
    }
    Ok(())
}
