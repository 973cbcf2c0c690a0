//! # Storage Layer
//!
//! This module defines the storage abstraction for bindery. The [`TreeStore`]
//! trait maps a [`NodePath`] onto a storage location and exposes whole-file
//! artifacts attached to each node.
//!
//! ## Design Rationale
//!
//! Storage sits behind a trait so that:
//! - command logic is **tested** against `InMemoryStore` without a filesystem
//! - the directory tree stays the single system of record in production
//!
//! ## Classification
//!
//! Nodes carry no type tag. A child is a chapter iff its content artifact
//! exists; everything else is a sub-folder (or a book at depth 1). Stores
//! report this as [`ChildEntry::is_chapter`] at discovery time.
//!
//! ## Storage Layout
//!
//! For `FileStore`:
//! ```text
//! <root>/
//! ├── config.json            # Settings
//! ├── closed_books.json      # Book visibility set
//! ├── order.json             # Root order record
//! └── <Book>/
//!     ├── order.json         # {"folders": [...], "chapters": [...]}
//!     ├── description.txt
//!     ├── author.txt
//!     └── <Chapter>/
//!         ├── content.html   # Presence makes this node a chapter
//!         └── <Chapter>.notes.txt
//! ```
//!
//! Every artifact write replaces the whole file; there are no partial
//! updates, so the last writer wins.

use crate::error::Result;
use crate::model::{ChildEntry, NodeKind, NodePath};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

pub const CONTENT_FILE: &str = "content.html";
pub const ORDER_FILE: &str = "order.json";
pub const VISIBILITY_FILE: &str = "closed_books.json";
pub const DESCRIPTION_FILE: &str = "description.txt";
pub const AUTHOR_FILE: &str = "author.txt";
const NOTES_SUFFIX: &str = ".notes.txt";

/// A whole-file artifact attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Markup body; its presence makes the node a chapter.
    Content,
    /// Plain-text notes, named after the owning chapter.
    Notes(String),
    /// Child ordering record.
    Order,
    /// Closed-book set, only meaningful at the root.
    Visibility,
    Description,
    Author,
}

impl Artifact {
    pub fn notes_for(path: &NodePath) -> Self {
        Artifact::Notes(path.name().to_string())
    }

    pub fn file_name(&self) -> String {
        match self {
            Artifact::Content => CONTENT_FILE.to_string(),
            Artifact::Notes(chapter) => format!("{}{}", chapter, NOTES_SUFFIX),
            Artifact::Order => ORDER_FILE.to_string(),
            Artifact::Visibility => VISIBILITY_FILE.to_string(),
            Artifact::Description => DESCRIPTION_FILE.to_string(),
            Artifact::Author => AUTHOR_FILE.to_string(),
        }
    }
}

/// Abstract interface for the node tree.
///
/// Paths handed to a store are already sanitized; the store only composes
/// them into locations. Existence checks are the caller's job.
pub trait TreeStore {
    /// Storage location for a node (a real directory for `FileStore`,
    /// a virtual path for `InMemoryStore`).
    fn resolve(&self, path: &NodePath) -> PathBuf;

    /// Whether the node exists. The root always exists.
    fn exists(&self, path: &NodePath) -> bool;

    /// Immediate children of a node, unordered.
    fn list_children(&self, path: &NodePath) -> Result<Vec<ChildEntry>>;

    /// Create a node (and any missing ancestors). Existing nodes are left as is.
    fn create_node(&mut self, path: &NodePath) -> Result<()>;

    /// Rename a node in place. Fails with `NameConflict` if the target exists.
    fn rename_node(&mut self, path: &NodePath, new_name: &str) -> Result<()>;

    /// Remove a node and its whole subtree.
    fn delete_node(&mut self, path: &NodePath) -> Result<()>;

    /// Read an artifact. `Ok(None)` if it does not exist.
    fn read_artifact(&self, path: &NodePath, artifact: &Artifact) -> Result<Option<String>>;

    /// Replace an artifact wholesale. MUST be atomic to readers.
    fn write_artifact(&mut self, path: &NodePath, artifact: &Artifact, content: &str)
        -> Result<()>;

    /// Remove an artifact if present.
    fn remove_artifact(&mut self, path: &NodePath, artifact: &Artifact) -> Result<()>;

    /// Last modification time of an artifact, if it exists.
    fn artifact_mtime(&self, path: &NodePath, artifact: &Artifact)
        -> Result<Option<DateTime<Utc>>>;

    fn has_artifact(&self, path: &NodePath, artifact: &Artifact) -> bool {
        matches!(self.artifact_mtime(path, artifact), Ok(Some(_)))
    }

    /// Derived from depth and the presence of the content artifact.
    fn node_kind(&self, path: &NodePath) -> NodeKind {
        NodeKind::classify(path.depth(), self.has_artifact(path, &Artifact::Content))
    }

    /// A node is a chapter iff its content artifact exists.
    fn is_chapter(&self, path: &NodePath) -> bool {
        !path.is_root() && self.node_kind(path) == NodeKind::Chapter
    }
}
