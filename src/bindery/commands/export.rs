use super::helpers::{require_chapter, require_node, walk_chapters};
use super::{CmdMessage, CmdResult};
use crate::error::{BinderyError, Result};
use crate::model::NodePath;
use crate::richtext::{self, docx::DocxStyle};
use crate::store::{Artifact, TreeStore};

pub const DOCX_EXTENSION: &str = "docx";

/// A packed document plus the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    fn named(path: &NodePath, bytes: Vec<u8>) -> Self {
        let stem = if path.is_root() { "export" } else { path.name() };
        Self {
            file_name: format!("{}.{}", stem, DOCX_EXTENSION),
            bytes,
        }
    }
}

/// Structured export of a single chapter.
pub fn chapter<S: TreeStore>(store: &S, path: &NodePath, style: &DocxStyle) -> Result<CmdResult> {
    require_chapter(store, path)?;
    let markup = store
        .read_artifact(path, &Artifact::Content)?
        .unwrap_or_default();

    let document = richtext::structured(&markup);
    let bytes = richtext::docx::to_docx(&document, style)?;
    log::info!("Exported chapter {} ({} bytes)", path, bytes.len());

    Ok(CmdResult::default()
        .with_affected(path.clone())
        .with_document(ExportedDocument::named(path, bytes)))
}

/// Every chapter under a folder in reading order, one heading each, with a
/// section break between consecutive chapters.
pub fn combined<S: TreeStore>(
    store: &S,
    folder: &NodePath,
    style: &DocxStyle,
) -> Result<CmdResult> {
    require_node(store, folder)?;
    if store.is_chapter(folder) {
        return Err(BinderyError::Validation(format!(
            "{} is a chapter; export it on its own",
            folder
        )));
    }

    let mut chapters: Vec<(String, String)> = Vec::new();
    for path in walk_chapters(store, folder)? {
        let markup = store
            .read_artifact(&path, &Artifact::Content)?
            .unwrap_or_default();
        chapters.push((path.name().to_string(), markup));
    }

    let document =
        richtext::combine(chapters.iter().map(|(t, m)| (t.as_str(), m.as_str())));
    let bytes = richtext::docx::to_docx(&document, style)?;
    log::info!(
        "Exported {} chapters from {} ({} bytes)",
        chapters.len(),
        folder,
        bytes.len()
    );

    let mut result = CmdResult::default()
        .with_affected(folder.clone())
        .with_document(ExportedDocument::named(folder, bytes));
    if chapters.is_empty() {
        result.add_message(CmdMessage::info(format!("No chapters under {}", folder)));
    }
    Ok(result)
}
