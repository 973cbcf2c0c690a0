use crate::model::{BookEntry, BookInfo, Listing, NodePath};
use std::fmt;

pub mod content;
pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod info;
pub mod list;
pub mod rename;
pub mod reorder;
pub mod search;
pub mod stats;
pub mod visibility;

pub use export::ExportedDocument;
pub use search::{MatchKind, SearchHit};
pub use stats::StatsReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

impl fmt::Display for CmdMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<NodePath>,
    pub listing: Option<Listing>,
    pub books: Vec<BookEntry>,
    pub text: Option<String>,
    pub book_info: Option<BookInfo>,
    pub document: Option<ExportedDocument>,
    pub stats: Option<StatsReport>,
    pub hits: Vec<SearchHit>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, path: NodePath) -> Self {
        self.affected.push(path);
        self
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_books(mut self, books: Vec<BookEntry>) -> Self {
        self.books = books;
        self
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_book_info(mut self, info: BookInfo) -> Self {
        self.book_info = Some(info);
        self
    }

    pub fn with_document(mut self, document: ExportedDocument) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_stats(mut self, stats: StatsReport) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.hits = hits;
        self
    }

    /// True if any warning was reported.
    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
