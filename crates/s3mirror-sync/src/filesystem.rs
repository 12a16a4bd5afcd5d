//! Local filesystem adapter (secondary/driven adapter)
//!
//! Implements the [`TreeWalker`], [`ContentHasher`] and [`FileSource`]
//! ports over the real filesystem using `tokio::fs`. All three operate on
//! paths relative to the tree root the adapter is constructed with, which
//! is exactly the form local paths take in the content index.
//!
//! The digest is SHA-256 of the full file contents, emitted as standard
//! base64 - collision resistance matters because the digest value becomes
//! the persisted authority for "this file changed".

use std::path::{Path, PathBuf};

use base64::Engine;
use s3mirror_core::ports::{ContentHasher, FileSource, TreeWalker};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

/// Adapter bridging the local-tree ports to the real filesystem
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    /// Create an adapter rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The tree root this adapter resolves paths against
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait::async_trait]
impl TreeWalker for LocalFileSystem {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn walk(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();
        let mut stack = vec![self.root.clone()];

        while let Some(dir) = stack.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let metadata = entry.metadata().await?;

                if metadata.is_dir() {
                    stack.push(path);
                } else if metadata.is_file() {
                    let relative = path
                        .strip_prefix(&self.root)
                        .unwrap_or(&path)
                        .to_string_lossy()
                        .into_owned();
                    files.push(relative);
                }
            }
        }

        // Sort for consistent ordering across runs
        files.sort();
        debug!(count = files.len(), "walk complete");
        Ok(files)
    }
}

#[async_trait::async_trait]
impl ContentHasher for LocalFileSystem {
    #[instrument(skip(self))]
    async fn digest(&self, path: &str) -> anyhow::Result<String> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        let digest = Sha256::digest(&data);
        Ok(base64::engine::general_purpose::STANDARD.encode(digest))
    }
}

#[async_trait::async_trait]
impl FileSource for LocalFileSystem {
    #[instrument(skip(self))]
    async fn read(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        debug!(bytes = data.len(), "file read complete");
        Ok(data)
    }
}
