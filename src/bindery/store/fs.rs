use super::{Artifact, TreeStore};
use crate::error::{BinderyError, Result};
use crate::model::{ChildEntry, NodePath};
use chrono::{DateTime, Utc};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory-tree store: every node is a directory under `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(BinderyError::Io)?;
        }
        Ok(())
    }

    fn artifact_path(&self, path: &NodePath, artifact: &Artifact) -> PathBuf {
        self.resolve(path).join(artifact.file_name())
    }
}

impl TreeStore for FileStore {
    fn resolve(&self, path: &NodePath) -> PathBuf {
        path.segments()
            .iter()
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    fn exists(&self, path: &NodePath) -> bool {
        path.is_root() || self.resolve(path).is_dir()
    }

    fn list_children(&self, path: &NodePath) -> Result<Vec<ChildEntry>> {
        let dir = self.resolve(path);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut children = Vec::new();
        for entry in fs::read_dir(&dir).map_err(BinderyError::Io)? {
            let entry = entry.map_err(BinderyError::Io)?;
            let entry_path = entry.path();
            if !entry_path.is_dir() {
                continue;
            }
            let Some(name) = entry_path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            // Hidden and temp entries are never nodes
            if name.starts_with('.') {
                continue;
            }

            let meta = entry.metadata().map_err(BinderyError::Io)?;
            let created = meta
                .created()
                .or_else(|_| meta.modified())
                .map_err(BinderyError::Io)?;

            children.push(ChildEntry {
                name: name.to_string(),
                is_chapter: entry_path.join(Artifact::Content.file_name()).is_file(),
                created_at: DateTime::<Utc>::from(created),
            });
        }
        Ok(children)
    }

    fn create_node(&mut self, path: &NodePath) -> Result<()> {
        let dir = self.resolve(path);
        debug!("creating node {}", dir.display());
        self.ensure_dir(&dir)
    }

    fn rename_node(&mut self, path: &NodePath, new_name: &str) -> Result<()> {
        let from = self.resolve(path);
        if path.is_root() || !from.is_dir() {
            return Err(BinderyError::NotFound(path.to_string()));
        }
        let target = path.with_name(new_name);
        let to = self.resolve(&target);
        if to.exists() {
            return Err(BinderyError::NameConflict(target.to_string()));
        }
        debug!("renaming {} -> {}", from.display(), to.display());
        fs::rename(&from, &to).map_err(BinderyError::Io)?;
        Ok(())
    }

    fn delete_node(&mut self, path: &NodePath) -> Result<()> {
        if path.is_root() {
            return Err(BinderyError::Validation(
                "The store root cannot be deleted".to_string(),
            ));
        }
        let dir = self.resolve(path);
        if !dir.is_dir() {
            return Err(BinderyError::NotFound(path.to_string()));
        }
        debug!("deleting subtree {}", dir.display());
        fs::remove_dir_all(dir).map_err(BinderyError::Io)?;
        Ok(())
    }

    fn read_artifact(&self, path: &NodePath, artifact: &Artifact) -> Result<Option<String>> {
        let file = self.artifact_path(path, artifact);
        if !file.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(file).map_err(BinderyError::Io)?;
        Ok(Some(content))
    }

    fn write_artifact(
        &mut self,
        path: &NodePath,
        artifact: &Artifact,
        content: &str,
    ) -> Result<()> {
        let dir = self.resolve(path);
        self.ensure_dir(&dir)?;

        let target = dir.join(artifact.file_name());

        // Atomic write
        let tmp = dir.join(format!(".{}-{}.tmp", artifact.file_name(), Uuid::new_v4()));
        fs::write(&tmp, content).map_err(BinderyError::Io)?;
        fs::rename(&tmp, &target).map_err(BinderyError::Io)?;
        Ok(())
    }

    fn remove_artifact(&mut self, path: &NodePath, artifact: &Artifact) -> Result<()> {
        let file = self.artifact_path(path, artifact);
        if file.is_file() {
            fs::remove_file(file).map_err(BinderyError::Io)?;
        }
        Ok(())
    }

    fn artifact_mtime(
        &self,
        path: &NodePath,
        artifact: &Artifact,
    ) -> Result<Option<DateTime<Utc>>> {
        let file = self.artifact_path(path, artifact);
        if !file.is_file() {
            return Ok(None);
        }
        let meta = fs::metadata(file).map_err(BinderyError::Io)?;
        let modified = meta.modified().map_err(BinderyError::Io)?;
        Ok(Some(modified.into()))
    }
}
