use super::helpers::{require_node, walk_chapters};
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NodePath;
use crate::richtext;
use crate::store::{Artifact, TreeStore};
use serde::Serialize;

/// Which artifact of a chapter matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Content,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub path: NodePath,
    pub kind: MatchKind,
}

/// Case-insensitive substring search over every chapter under `root`.
/// A chapter yields at most one hit per artifact kind.
pub fn run<S: TreeStore>(store: &S, root: &NodePath, query: &str) -> Result<CmdResult> {
    require_node(store, root)?;

    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Nothing to search for"));
        return Ok(result);
    }

    let mut hits = Vec::new();
    for chapter in walk_chapters(store, root)? {
        let markup = store
            .read_artifact(&chapter, &Artifact::Content)?
            .unwrap_or_default();
        if contains(&richtext::plain_text(&markup), &needle) {
            hits.push(SearchHit {
                path: chapter.clone(),
                kind: MatchKind::Content,
            });
        }

        let notes = store.read_artifact(&chapter, &Artifact::notes_for(&chapter))?;
        if notes.is_some_and(|n| contains(&n, &needle)) {
            hits.push(SearchHit {
                path: chapter,
                kind: MatchKind::Notes,
            });
        }
    }

    log::debug!("Search '{}' under {}: {} hits", query, root, hits.len());
    let mut result = CmdResult::default().with_affected(root.clone());
    if hits.is_empty() {
        result.add_message(CmdMessage::info(format!("No matches for '{}'", query.trim())));
    }
    Ok(result.with_hits(hits))
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::ChildKind;
    use crate::store::memory::InMemoryStore;

    fn setup() -> (InMemoryStore, NodePath) {
        let mut store = InMemoryStore::new();
        create::run(&mut store, &NodePath::root(), "Book", ChildKind::Folders).unwrap();
        let book = NodePath::parse("Book").unwrap();
        for (name, body) in [
            ("Harbor", "<p>The <em>Lighthouse</em> keeper</p>"),
            ("Inland", "<p>Fields and wheat</p>"),
        ] {
            create::run(&mut store, &book, name, ChildKind::Chapters).unwrap();
            store
                .write_artifact(&book.child(name), &Artifact::Content, body)
                .unwrap();
        }
        let inland = book.child("Inland");
        store
            .write_artifact(&inland, &Artifact::notes_for(&inland), "move the lighthouse here?")
            .unwrap();
        (store, book)
    }

    #[test]
    fn matches_content_and_notes_separately() {
        let (store, book) = setup();
        let hits = run(&store, &NodePath::root(), "LIGHTHOUSE").unwrap().hits;
        assert_eq!(
            hits,
            vec![
                SearchHit {
                    path: book.child("Harbor"),
                    kind: MatchKind::Content,
                },
                SearchHit {
                    path: book.child("Inland"),
                    kind: MatchKind::Notes,
                },
            ]
        );
    }

    #[test]
    fn markup_is_not_searchable() {
        let (store, _book) = setup();
        let result = run(&store, &NodePath::root(), "<em>").unwrap();
        assert!(result.hits.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn match_spanning_formatting_is_found() {
        let (store, _book) = setup();
        assert_eq!(run(&store, &NodePath::root(), "the lighthouse keeper").unwrap().hits.len(), 1);
    }

    #[test]
    fn space_before_formatted_run_matches_single_space() {
        let (mut store, book) = setup();
        create::run(&mut store, &book, "Greeting", ChildKind::Chapters).unwrap();
        store
            .write_artifact(
                &book.child("Greeting"),
                &Artifact::Content,
                "<p>Hello <b> World</b></p>",
            )
            .unwrap();
        let hits = run(&store, &NodePath::root(), "hello world").unwrap().hits;
        assert_eq!(
            hits,
            vec![SearchHit {
                path: book.child("Greeting"),
                kind: MatchKind::Content,
            }]
        );
    }

    #[test]
    fn blank_query_yields_nothing() {
        let (store, _book) = setup();
        let result = run(&store, &NodePath::root(), "   ").unwrap();
        assert!(result.hits.is_empty());
        assert!(!result.has_warnings());
    }

    #[test]
    fn search_can_be_scoped() {
        let (store, book) = setup();
        let hits = run(&store, &book.child("Harbor"), "lighthouse").unwrap().hits;
        assert_eq!(hits.len(), 1);
    }
}
