use super::helpers::{kind_of, require_node};
use super::{CmdMessage, CmdResult};
use crate::error::{BinderyError, Result};
use crate::model::{ChildKind, Direction, NodePath};
use crate::order;
use crate::sanitize::safe_name;
use crate::store::TreeStore;

/// Moves `path` one step within its parent's ordering.
pub fn move_node<S: TreeStore>(
    store: &mut S,
    path: &NodePath,
    direction: Direction,
) -> Result<CmdResult> {
    let Some(parent) = path.parent() else {
        return Err(BinderyError::NotFound(path.to_string()));
    };
    require_node(store, path)?;
    let kind = kind_of(store, path);
    move_child(store, &parent, kind, path.name(), direction)
}

/// Swaps `name` with its neighbour among `parent`'s children of `kind`.
/// At either end this is a no-op.
pub fn move_child<S: TreeStore>(
    store: &mut S,
    parent: &NodePath,
    kind: ChildKind,
    raw_name: &str,
    direction: Direction,
) -> Result<CmdResult> {
    require_node(store, parent)?;
    let name = safe_name(raw_name);
    let path = parent.child(&name);
    let mut result = CmdResult::default();

    if order::move_entry(store, parent, kind, &name, direction)? {
        let verb = match direction {
            Direction::Up => "up",
            Direction::Down => "down",
        };
        result.add_message(CmdMessage::success(format!("Moved {} {}", path, verb)));
    } else {
        result.add_message(CmdMessage::info(format!("{} was not moved", path)));
    }
    Ok(result.with_affected(path))
}

/// Replaces the whole ordering of one kind, e.g. after a drag and drop.
pub fn replace<S: TreeStore>(
    store: &mut S,
    parent: &NodePath,
    kind: ChildKind,
    raw_names: &[String],
) -> Result<CmdResult> {
    require_node(store, parent)?;

    let mut names: Vec<String> = Vec::with_capacity(raw_names.len());
    for name in raw_names.iter().map(|n| safe_name(n)) {
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    order::replace(store, parent, kind, names)?;
    let mut result = CmdResult::default().with_affected(parent.clone());
    result.add_message(CmdMessage::success(format!(
        "Reordered {}s in {}",
        kind.label(),
        if parent.is_root() { "/" } else { parent.name() }
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, list};
    use crate::store::memory::InMemoryStore;

    fn setup(chapters: &[&str]) -> (InMemoryStore, NodePath) {
        let mut store = InMemoryStore::new();
        create::run(&mut store, &NodePath::root(), "Book", ChildKind::Folders).unwrap();
        let book = NodePath::parse("Book").unwrap();
        for ch in chapters {
            create::run(&mut store, &book, ch, ChildKind::Chapters).unwrap();
        }
        (store, book)
    }

    fn chapters(store: &InMemoryStore, book: &NodePath) -> Vec<String> {
        list::run(store, book).unwrap().listing.unwrap().chapters
    }

    #[test]
    fn moving_first_chapter_up_changes_nothing() {
        let (mut store, book) = setup(&["Ch2", "Ch1"]);
        let result =
            move_child(&mut store, &book, ChildKind::Chapters, "Ch2", Direction::Up).unwrap();
        assert!(!result.has_warnings());
        assert_eq!(chapters(&store, &book), vec!["Ch2", "Ch1"]);
    }

    #[test]
    fn move_node_infers_parent_and_kind() {
        let (mut store, book) = setup(&["A", "B"]);
        create::run(&mut store, &book, "Part", ChildKind::Folders).unwrap();

        move_node(&mut store, &book.child("B"), Direction::Up).unwrap();
        assert_eq!(chapters(&store, &book), vec!["B", "A"]);

        let listing = list::run(&store, &book).unwrap().listing.unwrap();
        assert_eq!(listing.subfolders, vec!["Part"]);
    }

    #[test]
    fn move_down_then_up_restores_order() {
        let (mut store, book) = setup(&["A", "B", "C"]);
        move_node(&mut store, &book.child("A"), Direction::Down).unwrap();
        assert_eq!(chapters(&store, &book), vec!["B", "A", "C"]);
        move_node(&mut store, &book.child("A"), Direction::Up).unwrap();
        assert_eq!(chapters(&store, &book), vec!["A", "B", "C"]);
    }

    #[test]
    fn books_can_be_moved_at_root() {
        let mut store = InMemoryStore::new();
        for name in ["First", "Second"] {
            create::run(&mut store, &NodePath::root(), name, ChildKind::Folders).unwrap();
        }
        move_node(&mut store, &NodePath::parse("Second").unwrap(), Direction::Up).unwrap();
        let names: Vec<String> = list::books(&store, true)
            .unwrap()
            .books
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn replace_sanitizes_and_dedups() {
        let (mut store, book) = setup(&["A", "B", "C"]);
        replace(
            &mut store,
            &book,
            ChildKind::Chapters,
            &["C".to_string(), "C".to_string(), "??".to_string(), "A".to_string()],
        )
        .unwrap();
        assert_eq!(order::load(&store, &book).chapters, vec!["C", "A"]);
        assert_eq!(chapters(&store, &book), vec!["C", "A", "B"]);
    }

    #[test]
    fn replace_on_missing_parent_is_not_found() {
        let mut store = InMemoryStore::new();
        assert!(replace(&mut store, &NodePath::parse("Nope").unwrap(), ChildKind::Folders, &[]).is_err());
    }
}
