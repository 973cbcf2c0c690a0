use super::helpers::{require_chapter, require_node};
use super::{CmdMessage, CmdResult};
use crate::error::{BinderyError, Result};
use crate::model::NodePath;
use crate::richtext;
use crate::store::{Artifact, TreeStore};

/// How a content write should be reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Explicit save: confirms with a message.
    Save,
    /// Background save: silent on success.
    Autosave,
}

pub fn get_content<S: TreeStore>(store: &S, path: &NodePath) -> Result<CmdResult> {
    require_chapter(store, path)?;
    let markup = store
        .read_artifact(path, &Artifact::Content)?
        .unwrap_or_default();
    Ok(CmdResult::default()
        .with_affected(path.clone())
        .with_text(markup))
}

/// Plain-text rendering of a chapter, as used by search and statistics.
pub fn get_plain_text<S: TreeStore>(store: &S, path: &NodePath) -> Result<CmdResult> {
    require_chapter(store, path)?;
    let markup = store
        .read_artifact(path, &Artifact::Content)?
        .unwrap_or_default();
    Ok(CmdResult::default()
        .with_affected(path.clone())
        .with_text(richtext::plain_text(&markup)))
}

/// Replaces the chapter body wholesale. Concurrent writers: last one wins.
pub fn set_content<S: TreeStore>(
    store: &mut S,
    path: &NodePath,
    markup: &str,
    mode: SaveMode,
) -> Result<CmdResult> {
    require_chapter(store, path)?;
    store.write_artifact(path, &Artifact::Content, markup)?;

    let mut result = CmdResult::default().with_affected(path.clone());
    if mode == SaveMode::Save {
        let words = richtext::plain::word_count(&richtext::plain_text(markup));
        result.add_message(CmdMessage::success(format!(
            "Saved {} ({} words)",
            path, words
        )));
    }
    Ok(result)
}

pub fn get_notes<S: TreeStore>(store: &S, path: &NodePath) -> Result<CmdResult> {
    require_notes_owner(store, path)?;
    let notes = store
        .read_artifact(path, &Artifact::notes_for(path))?
        .unwrap_or_default();
    Ok(CmdResult::default()
        .with_affected(path.clone())
        .with_text(notes))
}

/// Notes may be written before the chapter has any content.
pub fn set_notes<S: TreeStore>(
    store: &mut S,
    path: &NodePath,
    notes: &str,
    mode: SaveMode,
) -> Result<CmdResult> {
    require_notes_owner(store, path)?;
    store.write_artifact(path, &Artifact::notes_for(path), notes)?;

    let mut result = CmdResult::default().with_affected(path.clone());
    if mode == SaveMode::Save {
        result.add_message(CmdMessage::success(format!("Notes saved: {}", path)));
    }
    Ok(result)
}

fn require_notes_owner<S: TreeStore>(store: &S, path: &NodePath) -> Result<()> {
    if path.depth() < 2 {
        return Err(BinderyError::Validation(
            "Notes belong to chapters, not books".to_string(),
        ));
    }
    require_node(store, path)
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
        create::run(&mut store, &book, "Ch", ChildKind::Chapters).unwrap();
        (store, book.child("Ch"))
    }

    #[test]
    fn new_chapter_has_empty_content() {
        let (store, ch) = setup();
        assert_eq!(get_content(&store, &ch).unwrap().text, Some(String::new()));
    }

    #[test]
    fn save_overwrites_wholesale() {
        let (mut store, ch) = setup();
        set_content(&mut store, &ch, "<p>first draft</p>", SaveMode::Save).unwrap();
        set_content(&mut store, &ch, "<p>second</p>", SaveMode::Save).unwrap();
        assert_eq!(
            get_content(&store, &ch).unwrap().text.as_deref(),
            Some("<p>second</p>")
        );
    }

    #[test]
    fn autosave_is_silent_and_save_reports_words() {
        let (mut store, ch) = setup();
        let auto = set_content(&mut store, &ch, "<p>a b</p>", SaveMode::Autosave).unwrap();
        assert!(auto.messages.is_empty());

        let saved = set_content(&mut store, &ch, "<p>a b c</p>", SaveMode::Save).unwrap();
        assert!(saved.messages[0].content.contains("3 words"));
    }

    #[test]
    fn plain_text_strips_markup() {
        let (mut store, ch) = setup();
        set_content(
            &mut store,
            &ch,
            "<p>Hello <strong>World</strong></p><p>Next</p>",
            SaveMode::Autosave,
        )
        .unwrap();
        assert_eq!(
            get_plain_text(&store, &ch).unwrap().text.as_deref(),
            Some("Hello World\nNext")
        );
    }

    #[test]
    fn content_of_a_folder_is_not_found() {
        let (mut store, _ch) = setup();
        let book = NodePath::parse("Book").unwrap();
        create::run(&mut store, &book, "Part", ChildKind::Folders).unwrap();
        let err = set_content(&mut store, &book.child("Part"), "x", SaveMode::Save).unwrap_err();
        assert!(matches!(err, BinderyError::NotFound(_)));
        assert!(!store.is_chapter(&book.child("Part")));
    }

    #[test]
    fn notes_round_trip_independently_of_content() {
        let (mut store, ch) = setup();
        assert_eq!(get_notes(&store, &ch).unwrap().text, Some(String::new()));
        set_notes(&mut store, &ch, "check dates", SaveMode::Autosave).unwrap();
        assert_eq!(
            get_notes(&store, &ch).unwrap().text.as_deref(),
            Some("check dates")
        );
        assert_eq!(get_content(&store, &ch).unwrap().text, Some(String::new()));
    }

    #[test]
    fn books_have_no_notes() {
        let (store, _ch) = setup();
        assert!(get_notes(&store, &NodePath::parse("Book").unwrap()).is_err());
    }
}
