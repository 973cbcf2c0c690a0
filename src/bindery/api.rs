//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! bindery operation, whatever the front end.
//!
//! The facade:
//! - **Normalizes inputs**: raw slash-delimited strings become sanitized
//!   [`NodePath`]s before any command sees them
//! - **Applies settings**: export layout, the default statistics window and
//!   closed-book visibility come from [`BinderyConfig`]
//! - **Dispatches** to the matching `commands::*` function
//!
//! It does no printing and holds no business logic.
//!
//! `BinderyApi<S: TreeStore>` is generic over the storage backend:
//! `BinderyApi<FileStore>` in production, `BinderyApi<InMemoryStore>` in tests.

use crate::commands::{self, content::SaveMode, CmdMessage, CmdResult};
use crate::config::BinderyConfig;
use crate::error::Result;
use crate::model::{ChildKind, Direction, NodePath};
use crate::richtext::docx::DocxStyle;
use crate::store::TreeStore;
use chrono::Local;
use std::path::PathBuf;

pub use crate::commands::{MessageLevel, SearchHit, StatsReport};

pub struct BinderyApi<S: TreeStore> {
    store: S,
    config: BinderyConfig,
    config_dir: Option<PathBuf>,
}

impl<S: TreeStore> BinderyApi<S> {
    /// Loads settings from `config_dir`; `set_config` writes them back there.
    pub fn new(store: S, config_dir: PathBuf) -> Self {
        let config = BinderyConfig::load(&config_dir);
        Self {
            store,
            config,
            config_dir: Some(config_dir),
        }
    }

    /// Fixed settings that are never persisted.
    pub fn with_config(store: S, config: BinderyConfig) -> Self {
        Self {
            store,
            config,
            config_dir: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BinderyConfig {
        &self.config
    }

    // --- tree ---

    pub fn list_books(&self, include_closed: bool) -> Result<CmdResult> {
        commands::list::books(
            &self.store,
            include_closed || self.config.show_closed_books,
        )
    }

    pub fn list_children(&self, path: &str) -> Result<CmdResult> {
        commands::list::run(&self.store, &NodePath::parse(path)?)
    }

    pub fn create_book(&mut self, name: &str) -> Result<CmdResult> {
        commands::create::run(&mut self.store, &NodePath::root(), name, ChildKind::Folders)
    }

    pub fn create_folder(&mut self, parent: &str, name: &str) -> Result<CmdResult> {
        commands::create::run(
            &mut self.store,
            &NodePath::parse(parent)?,
            name,
            ChildKind::Folders,
        )
    }

    pub fn create_chapter(&mut self, parent: &str, name: &str) -> Result<CmdResult> {
        commands::create::run(
            &mut self.store,
            &NodePath::parse(parent)?,
            name,
            ChildKind::Chapters,
        )
    }

    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<CmdResult> {
        commands::rename::run(&mut self.store, &NodePath::parse(path)?, new_name)
    }

    pub fn delete(&mut self, path: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, &NodePath::parse(path)?)
    }

    // --- ordering ---

    pub fn move_node(&mut self, path: &str, direction: Direction) -> Result<CmdResult> {
        commands::reorder::move_node(&mut self.store, &NodePath::parse(path)?, direction)
    }

    pub fn reorder(&mut self, parent: &str, kind: ChildKind, names: &[String]) -> Result<CmdResult> {
        commands::reorder::replace(&mut self.store, &NodePath::parse(parent)?, kind, names)
    }

    // --- content ---

    pub fn get_content(&self, path: &str) -> Result<CmdResult> {
        commands::content::get_content(&self.store, &NodePath::parse(path)?)
    }

    pub fn get_plain_text(&self, path: &str) -> Result<CmdResult> {
        commands::content::get_plain_text(&self.store, &NodePath::parse(path)?)
    }

    pub fn set_content(&mut self, path: &str, markup: &str, mode: SaveMode) -> Result<CmdResult> {
        commands::content::set_content(&mut self.store, &NodePath::parse(path)?, markup, mode)
    }

    pub fn get_notes(&self, path: &str) -> Result<CmdResult> {
        commands::content::get_notes(&self.store, &NodePath::parse(path)?)
    }

    pub fn set_notes(&mut self, path: &str, notes: &str, mode: SaveMode) -> Result<CmdResult> {
        commands::content::set_notes(&mut self.store, &NodePath::parse(path)?, notes, mode)
    }

    // --- export ---

    /// Chapter export for chapters, combined export for anything else.
    pub fn export(&self, path: &str) -> Result<CmdResult> {
        let path = NodePath::parse(path)?;
        if self.store.is_chapter(&path) {
            commands::export::chapter(&self.store, &path, &self.docx_style())
        } else {
            commands::export::combined(&self.store, &path, &self.docx_style())
        }
    }

    pub fn export_chapter(&self, path: &str) -> Result<CmdResult> {
        commands::export::chapter(&self.store, &NodePath::parse(path)?, &self.docx_style())
    }

    pub fn export_combined(&self, path: &str) -> Result<CmdResult> {
        commands::export::combined(&self.store, &NodePath::parse(path)?, &self.docx_style())
    }

    fn docx_style(&self) -> DocxStyle {
        DocxStyle::from(&self.config)
    }

    // --- derived views ---

    /// `window_days` falls back to the configured window.
    pub fn stats(&self, path: &str, window_days: Option<u32>) -> Result<CmdResult> {
        commands::stats::run(
            &self.store,
            &NodePath::parse(path)?,
            window_days.unwrap_or(self.config.stats_window_days),
            Local::now().date_naive(),
        )
    }

    pub fn search(&self, root: &str, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, &NodePath::parse(root)?, query)
    }

    // --- books ---

    pub fn open_book(&mut self, book: &str) -> Result<CmdResult> {
        commands::visibility::open(&mut self.store, &NodePath::parse(book)?)
    }

    pub fn close_book(&mut self, book: &str) -> Result<CmdResult> {
        commands::visibility::close(&mut self.store, &NodePath::parse(book)?)
    }

    pub fn book_info(&self, book: &str) -> Result<CmdResult> {
        commands::info::get(&self.store, &NodePath::parse(book)?)
    }

    pub fn set_book_info(
        &mut self,
        book: &str,
        description: Option<&str>,
        author: Option<&str>,
    ) -> Result<CmdResult> {
        commands::info::set(&mut self.store, &NodePath::parse(book)?, description, author)
    }

    // --- settings ---

    pub fn config_entries(&self) -> CmdResult {
        let text = self
            .config
            .entries()
            .into_iter()
            .map(|(key, value)| format!("{} = {}", key, value))
            .collect::<Vec<_>>()
            .join("\n");
        CmdResult::default().with_text(text)
    }

    pub fn set_config(&mut self, key: &str, value: &str) -> Result<CmdResult> {
        self.config.set(key, value)?;
        if let Some(dir) = &self.config_dir {
            self.config.save(dir)?;
        }
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!("{} = {}", key, value)));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MatchKind;
    use crate::error::BinderyError;
    use crate::store::memory::InMemoryStore;

    fn api() -> BinderyApi<InMemoryStore> {
        BinderyApi::with_config(InMemoryStore::new(), BinderyConfig::default())
    }

    #[test]
    fn raw_paths_are_sanitized() {
        let mut api = api();
        api.create_book("My Book!").unwrap();
        api.create_chapter("My Book", "Ch: 1").unwrap();

        let listing = api.list_children("/My Book!/").unwrap().listing.unwrap();
        assert_eq!(listing.chapters, vec!["Ch 1"]);
        assert!(api.store().is_chapter(&NodePath::parse("My Book/Ch 1").unwrap()));
    }

    #[test]
    fn unsanitizable_segment_never_resolves_to_its_parent() {
        let mut api = api();
        api.create_book("Book").unwrap();
        api.create_chapter("Book", "Keep").unwrap();

        assert!(matches!(
            api.delete("Book/!!!"),
            Err(BinderyError::Validation(_))
        ));
        assert!(api.rename("Book/..", "Other").is_err());
        assert!(api.create_chapter("Book/???", "Ch").is_err());
        assert!(api
            .set_content("Book/Keep/!!", "<p>x</p>", SaveMode::Save)
            .is_err());

        let book = NodePath::parse("Book").unwrap();
        assert!(api.store().exists(&book));
        assert!(api.store().is_chapter(&book.child("Keep")));
        let listing = api.list_children("Book").unwrap().listing.unwrap();
        assert_eq!(listing.chapters, vec!["Keep"]);
        assert!(listing.subfolders.is_empty());
    }

    #[test]
    fn closed_books_follow_settings() {
        let mut api = api();
        api.create_book("A").unwrap();
        api.create_book("B").unwrap();
        api.close_book("A").unwrap();
        assert_eq!(api.list_books(false).unwrap().books.len(), 1);
        assert_eq!(api.list_books(true).unwrap().books.len(), 2);

        let mut config = BinderyConfig::default();
        config.show_closed_books = true;
        let mut shown = BinderyApi::with_config(InMemoryStore::new(), config);
        shown.create_book("A").unwrap();
        shown.close_book("A").unwrap();
        assert_eq!(shown.list_books(false).unwrap().books.len(), 1);
    }

    #[test]
    fn export_dispatches_on_node_kind() {
        let mut api = api();
        api.create_book("Book").unwrap();
        api.create_chapter("Book", "One").unwrap();
        api.set_content("Book/One", "<p>text</p>", SaveMode::Autosave)
            .unwrap();

        let chapter = api.export("Book/One").unwrap().document.unwrap();
        assert_eq!(chapter.file_name, "One.docx");
        let combined = api.export("Book").unwrap().document.unwrap();
        assert_eq!(combined.file_name, "Book.docx");
    }

    #[test]
    fn reorder_and_move() {
        let mut api = api();
        api.create_book("Book").unwrap();
        for name in ["A", "B", "C"] {
            api.create_chapter("Book", name).unwrap();
        }
        api.reorder("Book", ChildKind::Chapters, &["C".to_string(), "B".to_string(), "A".to_string()])
            .unwrap();
        api.move_node("Book/A", Direction::Up).unwrap();

        let listing = api.list_children("Book").unwrap().listing.unwrap();
        assert_eq!(listing.chapters, vec!["C", "A", "B"]);
    }

    #[test]
    fn search_and_stats_walk_the_store() {
        let mut api = api();
        api.create_book("Book").unwrap();
        api.create_chapter("Book", "One").unwrap();
        api.set_content("Book/One", "<p>one two three</p>", SaveMode::Save)
            .unwrap();
        api.set_notes("Book/One", "TWO notes", SaveMode::Save).unwrap();

        let hits = api.search("", "two").unwrap().hits;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].kind, MatchKind::Notes);

        let stats = api.stats("Book", None).unwrap().stats.unwrap();
        assert_eq!(stats.total_words, 3);
    }

    #[test]
    fn book_info_round_trip() {
        let mut api = api();
        api.create_book("Book").unwrap();
        api.set_book_info("Book", Some("Sea story"), Some("Ann"))
            .unwrap();
        let info = api.book_info("Book").unwrap().book_info.unwrap();
        assert_eq!(info.description, "Sea story");
        assert_eq!(info.author, "Ann");
    }

    #[test]
    fn set_config_validates_keys() {
        let mut api = api();
        api.set_config("heading-size", "40").unwrap();
        assert_eq!(api.config().heading_size, 40);
        assert!(matches!(
            api.set_config("colour", "blue"),
            Err(BinderyError::Validation(_))
        ));
        assert!(api
            .config_entries()
            .text
            .unwrap()
            .contains("heading-size = 40"));
    }
}
