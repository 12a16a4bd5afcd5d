//! Local file access ports (driven/secondary ports)
//!
//! Three small, independently substitutable capabilities over the local
//! tree being mirrored. Splitting them keeps tests honest: a scanner test
//! can plug in a synthetic walker and hasher without touching a real
//! filesystem, and the engine only ever sees [`FileSource`].
//!
//! All paths exchanged through these ports are relative to the tree root
//! the adapter was constructed with. Errors use `anyhow::Result` because
//! failures at this boundary are adapter-specific and need no domain-level
//! classification.

use async_trait::async_trait;

/// Reads the full contents of a local file
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Read the file at `path` (relative to the tree root)
    async fn read(&self, path: &str) -> anyhow::Result<Vec<u8>>;
}

/// Computes a content digest of a local file
///
/// The digest is a pure function of the file's bytes and becomes the
/// persisted authority for "this file changed", so implementations must use
/// a collision-resistant hash.
#[async_trait]
pub trait ContentHasher: Send + Sync {
    /// Digest the contents of the file at `path` (relative to the tree root)
    async fn digest(&self, path: &str) -> anyhow::Result<String>;
}

/// Enumerates the regular files of a local tree
#[async_trait]
pub trait TreeWalker: Send + Sync {
    /// List every regular file under the tree root, as root-relative paths
    ///
    /// Directories are not reported. The order of the returned paths is
    /// unspecified.
    async fn walk(&self) -> anyhow::Result<Vec<String>>;
}
