use super::helpers::require_node;
use super::visibility::closed_books;
use super::CmdResult;
use crate::error::Result;
use crate::model::{BookEntry, ChildKind, Listing, NodePath};
use crate::order;
use crate::store::TreeStore;

/// Ordered children of `path`, split into sub-folders and chapters.
pub fn run<S: TreeStore>(store: &S, path: &NodePath) -> Result<CmdResult> {
    require_node(store, path)?;
    let listing = Listing {
        path: path.clone(),
        subfolders: order::ordered_children(store, path, ChildKind::Folders)?,
        chapters: order::ordered_children(store, path, ChildKind::Chapters)?,
    };
    Ok(CmdResult::default().with_listing(listing))
}

/// Books at the root in ledger order. A root directory holding a content
/// artifact is a stray chapter, not a book. Closed books are left out unless
/// `include_closed` is set.
pub fn books<S: TreeStore>(store: &S, include_closed: bool) -> Result<CmdResult> {
    let closed = closed_books(store);

    let books = order::ordered_children(store, &NodePath::root(), ChildKind::Folders)?
        .into_iter()
        .map(|name| BookEntry {
            is_open: !closed.contains(&name),
            name,
        })
        .filter(|book| include_closed || book.is_open)
        .collect();
    Ok(CmdResult::default().with_books(books))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, delete, visibility};
    use crate::store::memory::InMemoryStore;
    use crate::store::Artifact;

    fn root() -> NodePath {
        NodePath::root()
    }

    #[test]
    fn lists_subfolders_and_chapters_separately() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, &root(), "Book", ChildKind::Folders).unwrap();
        let book = NodePath::parse("Book").unwrap();
        create::run(&mut store, &book, "Part", ChildKind::Folders).unwrap();
        create::run(&mut store, &book, "Ch1", ChildKind::Chapters).unwrap();

        let listing = run(&store, &book).unwrap().listing.unwrap();
        assert_eq!(listing.subfolders, vec!["Part".to_string()]);
        assert_eq!(listing.chapters, vec!["Ch1".to_string()]);
    }

    #[test]
    fn created_chapter_is_never_a_subfolder() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, &root(), "Book", ChildKind::Folders).unwrap();
        let book = NodePath::parse("Book").unwrap();
        create::run(&mut store, &book, "Ch", ChildKind::Chapters).unwrap();

        let listing = run(&store, &book).unwrap().listing.unwrap();
        assert!(listing.chapters.contains(&"Ch".to_string()));
        assert!(!listing.subfolders.contains(&"Ch".to_string()));
    }

    #[test]
    fn deleted_chapter_disappears_from_both_kinds() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, &root(), "Book", ChildKind::Folders).unwrap();
        let book = NodePath::parse("Book").unwrap();
        create::run(&mut store, &book, "Ch", ChildKind::Chapters).unwrap();
        delete::run(&mut store, &book.child("Ch")).unwrap();

        let listing = run(&store, &book).unwrap().listing.unwrap();
        assert!(listing.chapters.is_empty());
        assert!(listing.subfolders.is_empty());
    }

    #[test]
    fn removing_content_turns_chapter_into_subfolder() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, &root(), "Book", ChildKind::Folders).unwrap();
        let book = NodePath::parse("Book").unwrap();
        create::run(&mut store, &book, "Ch", ChildKind::Chapters).unwrap();
        store
            .remove_artifact(&book.child("Ch"), &Artifact::Content)
            .unwrap();

        let listing = run(&store, &book).unwrap().listing.unwrap();
        assert!(listing.chapters.is_empty());
        assert_eq!(listing.subfolders, vec!["Ch".to_string()]);
    }

    #[test]
    fn root_chapter_is_not_a_book() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, &root(), "Book", ChildKind::Folders).unwrap();
        store
            .write_artifact(&NodePath::parse("Stray").unwrap(), &Artifact::Content, "")
            .unwrap();

        let names: Vec<String> = books(&store, true)
            .unwrap()
            .books
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Book"]);
    }

    #[test]
    fn missing_path_is_not_found() {
        let store = InMemoryStore::new();
        assert!(run(&store, &NodePath::parse("Nope").unwrap()).is_err());
    }

    #[test]
    fn closed_books_are_hidden_by_default() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, &root(), "Open", ChildKind::Folders).unwrap();
        create::run(&mut store, &root(), "Shelved", ChildKind::Folders).unwrap();
        visibility::close(&mut store, &NodePath::parse("Shelved").unwrap()).unwrap();

        let visible = books(&store, false).unwrap().books;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Open");

        let all = books(&store, true).unwrap().books;
        assert_eq!(all.len(), 2);
        assert!(!all[1].is_open);
    }

    #[test]
    fn books_follow_root_order_record() {
        let mut store = InMemoryStore::new();
        for name in ["A", "B", "C"] {
            create::run(&mut store, &root(), name, ChildKind::Folders).unwrap();
        }
        order::replace(
            &mut store,
            &root(),
            ChildKind::Folders,
            vec!["C".to_string(), "A".to_string()],
        )
        .unwrap();

        let names: Vec<String> = books(&store, true)
            .unwrap()
            .books
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
