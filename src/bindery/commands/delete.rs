use super::helpers::{kind_of, require_node};
use super::{visibility, CmdMessage, CmdResult};
use crate::error::{BinderyError, Result};
use crate::model::NodePath;
use crate::order;
use crate::store::TreeStore;

/// Removes a node and everything below it. Irreversible.
pub fn run<S: TreeStore>(store: &mut S, path: &NodePath) -> Result<CmdResult> {
    let Some(parent) = path.parent() else {
        return Err(BinderyError::Validation(
            "The store root cannot be deleted".to_string(),
        ));
    };
    require_node(store, path)?;

    let kind = kind_of(store, path);
    store.delete_node(path)?;
    order::remove_entry(store, &parent, kind, path.name())?;
    if parent.is_root() {
        visibility::forget(store, path.name())?;
    }

    let mut result = CmdResult::default().with_affected(path.clone());
    result.add_message(CmdMessage::success(format!(
        "Deleted {}: {}",
        kind.label(),
        path
    )));
    Ok(result)
}
