use crate::error::{BinderyError, Result};
use crate::sanitize::safe_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the tree: a sequence of sanitized name segments.
///
/// The empty path is the store root; depth 1 is a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Splits a slash-delimited path and sanitizes every segment.
    ///
    /// Leading, trailing and doubled slashes are ignored. A segment with
    /// text that sanitizes to nothing (`..`, `!!!`) is rejected rather than
    /// dropped, so a bad name never resolves to its parent.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for piece in raw.split('/').filter(|p| !p.is_empty()) {
            let name = safe_name(piece);
            if name.is_empty() {
                return Err(BinderyError::Validation(format!(
                    "Invalid name '{}' in path '{}'",
                    piece, raw
                )));
            }
            segments.push(name);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or an empty string for the root.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    pub fn parent(&self) -> Option<NodePath> {
        if self.is_root() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(NodePath { segments })
    }

    /// Appends an already-sanitized segment.
    pub fn child(&self, name: &str) -> NodePath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        NodePath { segments }
    }

    /// Same parent, different last segment.
    pub fn with_name(&self, name: &str) -> NodePath {
        match self.parent() {
            Some(parent) => parent.child(name),
            None => NodePath::root(),
        }
    }

    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// The two child kinds an order record tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildKind {
    Folders,
    Chapters,
}

impl ChildKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChildKind::Folders => "folder",
            ChildKind::Chapters => "chapter",
        }
    }
}

/// Derived classification of a node. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Book,
    SubFolder,
    Chapter,
}

impl NodeKind {
    /// A node with a content artifact is a chapter at any depth; otherwise
    /// depth decides between book and sub-folder.
    pub fn classify(depth: usize, has_content: bool) -> Self {
        if has_content {
            NodeKind::Chapter
        } else if depth == 1 {
            NodeKind::Book
        } else {
            NodeKind::SubFolder
        }
    }

    /// Order-ledger list a node of this kind is tracked under.
    pub fn ledger_kind(self) -> ChildKind {
        match self {
            NodeKind::Chapter => ChildKind::Chapters,
            NodeKind::Book | NodeKind::SubFolder => ChildKind::Folders,
        }
    }
}

/// An immediate child as discovered by the store, before any ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub name: String,
    pub is_chapter: bool,
    pub created_at: DateTime<Utc>,
}

impl ChildEntry {
    pub fn kind(&self) -> ChildKind {
        if self.is_chapter {
            ChildKind::Chapters
        } else {
            ChildKind::Folders
        }
    }
}

/// Ordered children of a node, as presented to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub path: NodePath,
    pub subfolders: Vec<String>,
    pub chapters: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Book-level free-text metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookInfo {
    pub description: String,
    pub author: String,
}

/// Root-level listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookEntry {
    pub name: String,
    pub is_open: bool,
}
