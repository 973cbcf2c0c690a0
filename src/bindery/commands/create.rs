use super::helpers::require_node;
use super::{CmdMessage, CmdResult};
use crate::error::{BinderyError, Result};
use crate::model::{ChildKind, NodePath};
use crate::sanitize::safe_name;
use crate::store::{Artifact, TreeStore};

/// Creates a book (under the root), sub-folder or chapter under `parent`.
///
/// An empty sanitized name changes nothing and reports "name required".
/// Creating a node that already exists with the same kind is a no-op.
pub fn run<S: TreeStore>(
    store: &mut S,
    parent: &NodePath,
    raw_name: &str,
    kind: ChildKind,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let noun = noun(parent, kind);

    let name = safe_name(raw_name);
    if name.is_empty() {
        result.add_message(CmdMessage::warning(format!("{} name required", noun)));
        return Ok(result);
    }

    require_node(store, parent)?;
    if store.is_chapter(parent) {
        return Err(BinderyError::Validation(format!(
            "Chapter '{}' cannot contain other nodes",
            parent
        )));
    }
    if parent.is_root() && kind == ChildKind::Chapters {
        return Err(BinderyError::Validation(
            "Chapters must be created inside a book".to_string(),
        ));
    }

    let path = parent.child(&name);
    if store.exists(&path) {
        if store.is_chapter(&path) != (kind == ChildKind::Chapters) {
            return Err(BinderyError::NameConflict(path.to_string()));
        }
        result.add_message(CmdMessage::info(format!("{} already exists: {}", noun, path)));
        return Ok(result.with_affected(path));
    }

    store.create_node(&path)?;
    if kind == ChildKind::Chapters {
        store.write_artifact(&path, &Artifact::Content, "")?;
    }

    result.add_message(CmdMessage::success(format!("{} created: {}", noun, path)));
    Ok(result.with_affected(path))
}

fn noun(parent: &NodePath, kind: ChildKind) -> &'static str {
    match kind {
        ChildKind::Folders if parent.is_root() => "Book",
        ChildKind::Folders => "Folder",
        ChildKind::Chapters => "Chapter",
    }
}
