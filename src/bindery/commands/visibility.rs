//! Open/closed state of books.
//!
//! Closed books are hidden from the default root listing without being
//! deleted. The state is a flat list of closed book names stored at the
//! root, independent of the order ledger.

use super::helpers::require_book;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NodePath;
use crate::store::{Artifact, TreeStore};
use log::warn;

pub fn closed_books<S: TreeStore>(store: &S) -> Vec<String> {
    match store.read_artifact(&NodePath::root(), &Artifact::Visibility) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("ignoring corrupt closed-book list: {}", e);
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("could not read closed-book list: {}", e);
            Vec::new()
        }
    }
}

fn save_closed<S: TreeStore>(store: &mut S, names: &[String]) -> Result<()> {
    let content = serde_json::to_string_pretty(names)?;
    store.write_artifact(&NodePath::root(), &Artifact::Visibility, &content)
}

pub fn close<S: TreeStore>(store: &mut S, book: &NodePath) -> Result<CmdResult> {
    require_book(store, book)?;
    let mut closed = closed_books(store);
    let mut result = CmdResult::default().with_affected(book.clone());
    if closed.iter().any(|n| n == book.name()) {
        result.add_message(CmdMessage::info(format!("Book already closed: {}", book)));
        return Ok(result);
    }
    closed.push(book.name().to_string());
    save_closed(store, &closed)?;
    result.add_message(CmdMessage::success(format!("Book closed: {}", book)));
    Ok(result)
}

pub fn open<S: TreeStore>(store: &mut S, book: &NodePath) -> Result<CmdResult> {
    require_book(store, book)?;
    let mut result = CmdResult::default().with_affected(book.clone());
    if forget(store, book.name())? {
        result.add_message(CmdMessage::success(format!("Book opened: {}", book)));
    } else {
        result.add_message(CmdMessage::info(format!("Book already open: {}", book)));
    }
    Ok(result)
}

/// Keeps a renamed book's closed state.
pub fn rename<S: TreeStore>(store: &mut S, old: &str, new: &str) -> Result<()> {
    let mut closed = closed_books(store);
    let mut changed = false;
    for name in closed.iter_mut().filter(|n| n.as_str() == old) {
        *name = new.to_string();
        changed = true;
    }
    if changed {
        save_closed(store, &closed)?;
    }
    Ok(())
}

/// Drops a book from the closed set. Returns whether it was there.
pub fn forget<S: TreeStore>(store: &mut S, name: &str) -> Result<bool> {
    let mut closed = closed_books(store);
    let before = closed.len();
    closed.retain(|n| n != name);
    if closed.len() == before {
        return Ok(false);
    }
    save_closed(store, &closed)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn store_with_book(name: &str) -> (InMemoryStore, NodePath) {
        let mut store = InMemoryStore::new();
        let book = NodePath::parse(name).unwrap();
        store.create_node(&book).unwrap();
        (store, book)
    }

    #[test]
    fn close_then_open_round_trip() {
        let (mut store, book) = store_with_book("Novel");
        close(&mut store, &book).unwrap();
        assert_eq!(closed_books(&store), vec!["Novel".to_string()]);

        open(&mut store, &book).unwrap();
        assert!(closed_books(&store).is_empty());
    }

    #[test]
    fn closing_twice_records_once() {
        let (mut store, book) = store_with_book("Novel");
        close(&mut store, &book).unwrap();
        let second = close(&mut store, &book).unwrap();
        assert_eq!(closed_books(&store).len(), 1);
        assert_eq!(second.messages[0].level, super::super::MessageLevel::Info);
    }

    #[test]
    fn close_requires_an_existing_book() {
        let mut store = InMemoryStore::new();
        assert!(close(&mut store, &NodePath::parse("Ghost").unwrap()).is_err());
        store.create_node(&NodePath::parse("Book/Part").unwrap()).unwrap();
        assert!(close(&mut store, &NodePath::parse("Book/Part").unwrap()).is_err());
    }

    #[test]
    fn corrupt_list_reads_as_empty() {
        let mut store = InMemoryStore::new();
        store
            .write_artifact(&NodePath::root(), &Artifact::Visibility, "[1, 2")
            .unwrap();
        assert!(closed_books(&store).is_empty());
    }

    #[test]
    fn rename_carries_closed_state() {
        let (mut store, book) = store_with_book("Old");
        close(&mut store, &book).unwrap();
        rename(&mut store, "Old", "New").unwrap();
        assert_eq!(closed_books(&store), vec!["New".to_string()]);
    }
}
