//! Materializing artifacts.
//!
//! [`TreeWriter`] is the only seam through which the generator touches the
//! filesystem. [`FileTreeWriter`] writes under a root directory; [`MemoryTree`]
//! records the same calls in memory and can compare itself against a tree on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{CourseError, Result};

/// What an artifact is, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Verilog starter and library sources.
    Code,
    /// Makefiles and repository plumbing.
    Build,
    /// Markdown documents.
    Doc,
    /// reveal.js slide decks.
    Deck,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Build => "build",
            Self::Doc => "doc",
            Self::Deck => "deck",
        }
    }
}

/// One file to be written, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub output_path: PathBuf,
    pub content: String,
    pub kind: ArtifactKind,
}

impl ArtifactSpec {
    pub fn new(output_path: impl Into<PathBuf>, content: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            output_path: output_path.into(),
            content: content.into(),
            kind,
        }
    }
}

/// Destination for generated files.
pub trait TreeWriter {
    /// Write `content` to `path` (relative to the writer's root), replacing any previous content.
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;
}

/// Writes artifacts under a directory on disk.
#[derive(Debug, Clone)]
pub struct FileTreeWriter {
    root: PathBuf,
}

impl FileTreeWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TreeWriter for FileTreeWriter {
    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CourseError::IoWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&full, content).map_err(|source| CourseError::IoWrite {
            path: full.clone(),
            source,
        })?;
        tracing::info!("wrote {}", full.display());
        Ok(())
    }
}

/// In-memory tree: path -> content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTree {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Compare every recorded file against the same path under `root`.
    ///
    /// Files on disk that this tree does not know about are ignored.
    pub fn drift(&self, root: &Path) -> Result<Drift> {
        let mut drift = Drift::default();
        for (path, content) in &self.files {
            let on_disk = match std::fs::read(root.join(path)) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    drift.missing.push(path.clone());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if digest(&on_disk) == digest(content.as_bytes()) {
                drift.unchanged += 1;
            } else {
                tracing::debug!(path = %path.display(), "content differs");
                drift.stale.push(path.clone());
            }
        }
        Ok(drift)
    }
}

impl TreeWriter for MemoryTree {
    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// Result of [`MemoryTree::drift`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drift {
    /// Expected files absent on disk.
    pub missing: Vec<PathBuf>,
    /// Files whose content differs from a fresh render.
    pub stale: Vec<PathBuf>,
    pub unchanged: usize,
}

impl Drift {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.stale.is_empty()
    }
}

/// Hex SHA-256 of `bytes`.
pub fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
