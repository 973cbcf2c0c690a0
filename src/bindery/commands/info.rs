use super::helpers::require_book;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{BookInfo, NodePath};
use crate::store::{Artifact, TreeStore};

pub fn get<S: TreeStore>(store: &S, book: &NodePath) -> Result<CmdResult> {
    require_book(store, book)?;
    let info = BookInfo {
        description: store
            .read_artifact(book, &Artifact::Description)?
            .unwrap_or_default(),
        author: store
            .read_artifact(book, &Artifact::Author)?
            .unwrap_or_default(),
    };
    Ok(CmdResult::default()
        .with_affected(book.clone())
        .with_book_info(info))
}

/// Writes whichever fields are given; `None` leaves a field as is.
pub fn set<S: TreeStore>(
    store: &mut S,
    book: &NodePath,
    description: Option<&str>,
    author: Option<&str>,
) -> Result<CmdResult> {
    require_book(store, book)?;
    if let Some(description) = description {
        store.write_artifact(book, &Artifact::Description, description)?;
    }
    if let Some(author) = author {
        store.write_artifact(book, &Artifact::Author, author.trim())?;
    }

    let mut result = get(store, book)?;
    if description.is_some() || author.is_some() {
        result.add_message(CmdMessage::success(format!("Book details saved: {}", book)));
    }
    Ok(result)
}
