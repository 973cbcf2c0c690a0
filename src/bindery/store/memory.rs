use super::{Artifact, TreeStore};
use crate::error::{BinderyError, Result};
use crate::model::{ChildEntry, NodePath};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

#[derive(Clone)]
struct MemFile {
    text: String,
    mtime: DateTime<Utc>,
}

#[derive(Clone)]
struct MemNode {
    created_at: DateTime<Utc>,
    files: HashMap<String, MemFile>,
}

/// In-memory tree store for testing.
///
/// Timestamps come from a logical clock that advances one second per
/// mutation, so creation order is always strictly observable.
pub struct InMemoryStore {
    nodes: BTreeMap<NodePath, MemNode>,
    epoch: DateTime<Utc>,
    tick: i64,
    simulate_write_error: bool,
    failing_artifact: Option<Artifact>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        let epoch = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            NodePath::root(),
            MemNode {
                created_at: epoch,
                files: HashMap::new(),
            },
        );
        Self {
            nodes,
            epoch,
            tick: 0,
            simulate_write_error: false,
            failing_artifact: None,
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Make writes of one artifact kind fail while every other write succeeds.
    pub fn set_failing_artifact(&mut self, artifact: Option<Artifact>) {
        self.failing_artifact = artifact;
    }

    /// Test helper to pin an artifact's mtime. Returns true if it existed.
    pub fn set_artifact_mtime(
        &mut self,
        path: &NodePath,
        artifact: &Artifact,
        mtime: DateTime<Utc>,
    ) -> bool {
        match self
            .nodes
            .get_mut(path)
            .and_then(|node| node.files.get_mut(&artifact.file_name()))
        {
            Some(file) => {
                file.mtime = mtime;
                true
            }
            None => false,
        }
    }

    fn now(&mut self) -> DateTime<Utc> {
        self.tick += 1;
        self.epoch + Duration::seconds(self.tick)
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(BinderyError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl TreeStore for InMemoryStore {
    fn resolve(&self, path: &NodePath) -> PathBuf {
        PathBuf::from("memory").join(path.to_string())
    }

    fn exists(&self, path: &NodePath) -> bool {
        self.nodes.contains_key(path)
    }

    fn list_children(&self, path: &NodePath) -> Result<Vec<ChildEntry>> {
        let depth = path.depth() + 1;
        Ok(self
            .nodes
            .iter()
            .filter(|(p, _)| p.depth() == depth && p.starts_with(path))
            .map(|(p, node)| ChildEntry {
                name: p.name().to_string(),
                is_chapter: node.files.contains_key(&Artifact::Content.file_name()),
                created_at: node.created_at,
            })
            .collect())
    }

    fn create_node(&mut self, path: &NodePath) -> Result<()> {
        self.check_writable()?;
        let mut current = NodePath::root();
        for segment in path.segments() {
            current = current.child(segment);
            if !self.nodes.contains_key(&current) {
                let created_at = self.now();
                self.nodes.insert(
                    current.clone(),
                    MemNode {
                        created_at,
                        files: HashMap::new(),
                    },
                );
            }
        }
        Ok(())
    }

    fn rename_node(&mut self, path: &NodePath, new_name: &str) -> Result<()> {
        self.check_writable()?;
        if path.is_root() || !self.exists(path) {
            return Err(BinderyError::NotFound(path.to_string()));
        }
        let target = path.with_name(new_name);
        if self.exists(&target) {
            return Err(BinderyError::NameConflict(target.to_string()));
        }

        let moved: Vec<NodePath> = self
            .nodes
            .keys()
            .filter(|p| p.starts_with(path))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = self.nodes.remove(&old) {
                let mut renamed = target.clone();
                for segment in &old.segments()[path.depth()..] {
                    renamed = renamed.child(segment);
                }
                self.nodes.insert(renamed, node);
            }
        }
        Ok(())
    }

    fn delete_node(&mut self, path: &NodePath) -> Result<()> {
        self.check_writable()?;
        if path.is_root() {
            return Err(BinderyError::Validation(
                "The store root cannot be deleted".to_string(),
            ));
        }
        if !self.exists(path) {
            return Err(BinderyError::NotFound(path.to_string()));
        }
        self.nodes.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn read_artifact(&self, path: &NodePath, artifact: &Artifact) -> Result<Option<String>> {
        Ok(self
            .nodes
            .get(path)
            .and_then(|node| node.files.get(&artifact.file_name()))
            .map(|file| file.text.clone()))
    }

    fn write_artifact(
        &mut self,
        path: &NodePath,
        artifact: &Artifact,
        content: &str,
    ) -> Result<()> {
        self.check_writable()?;
        if self.failing_artifact.as_ref() == Some(artifact) {
            return Err(BinderyError::Store(format!(
                "Simulated write error for {}",
                artifact.file_name()
            )));
        }
        self.create_node(path)?;
        let mtime = self.now();
        if let Some(node) = self.nodes.get_mut(path) {
            node.files.insert(
                artifact.file_name(),
                MemFile {
                    text: content.to_string(),
                    mtime,
                },
            );
        }
        Ok(())
    }

    fn remove_artifact(&mut self, path: &NodePath, artifact: &Artifact) -> Result<()> {
        self.check_writable()?;
        if let Some(node) = self.nodes.get_mut(path) {
            node.files.remove(&artifact.file_name());
        }
        Ok(())
    }

    fn artifact_mtime(
        &self,
        path: &NodePath,
        artifact: &Artifact,
    ) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .nodes
            .get(path)
            .and_then(|node| node.files.get(&artifact.file_name()))
            .map(|file| file.mtime))
    }
}
