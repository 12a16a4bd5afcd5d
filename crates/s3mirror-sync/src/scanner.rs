//! Tree scanner - builds the local content index
//!
//! Walks the mirrored tree through an injected [`TreeWalker`] and digests
//! every regular file through an injected [`ContentHasher`], producing the
//! local [`Index`] for this run. Both collaborators are ports so tests can
//! substitute a synthetic tree without touching a real filesystem.
//!
//! A scan is all-or-nothing: any walk or hash failure aborts it, because an
//! incomplete local index could lead to false "already mirrored"
//! conclusions downstream.

use s3mirror_core::domain::{Index, Sourcefile};
use s3mirror_core::ports::{ContentHasher, TreeWalker};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building the local index
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory walk itself failed
    #[error("directory walk failed: {0}")]
    Walk(#[source] anyhow::Error),

    /// A single file could not be digested (vanished mid-walk, permission
    /// denied, ...)
    #[error("failed to hash '{path}': {source}")]
    Hash {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Replace host path separators with forward slashes
///
/// Index paths and object keys are slash-normalized regardless of the host
/// convention, so indexes written on different platforms stay comparable.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Build the content index of the tree behind `walker`
///
/// Every regular file is recorded under its slash-normalized path. The
/// object key is `{bucket_prefix}/{path}` when `bucket_prefix` is
/// non-empty, else the path itself.
pub async fn build_index(
    bucket_prefix: &str,
    walker: &dyn TreeWalker,
    hasher: &dyn ContentHasher,
) -> Result<Index, ScanError> {
    let files = walker.walk().await.map_err(ScanError::Walk)?;

    let mut index = Index::new();
    for path in files {
        let hash = hasher.digest(&path).await.map_err(|source| ScanError::Hash {
            path: path.clone(),
            source,
        })?;

        let normalized = normalize_path(&path);
        let key = if bucket_prefix.is_empty() {
            normalized.clone()
        } else {
            format!("{bucket_prefix}/{normalized}")
        };

        debug!(path = %normalized, key = %key, "indexed local file");
        index.add(normalized, Sourcefile { key, hash });
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Synthetic tree: a fixed list of paths, digests derived from the path
    struct FakeTree {
        paths: Vec<&'static str>,
        fail_on: Option<&'static str>,
    }

    impl FakeTree {
        fn new(paths: Vec<&'static str>) -> Self {
            Self {
                paths,
                fail_on: None,
            }
        }
    }

    #[async_trait]
    impl TreeWalker for FakeTree {
        async fn walk(&self) -> anyhow::Result<Vec<String>> {
            Ok(self.paths.iter().map(|p| p.to_string()).collect())
        }
    }

    #[async_trait]
    impl ContentHasher for FakeTree {
        async fn digest(&self, path: &str) -> anyhow::Result<String> {
            if self.fail_on == Some(path) {
                anyhow::bail!("permission denied");
            }
            Ok(format!("digest({path})"))
        }
    }

    /// A walker that always fails
    struct BrokenTree;

    #[async_trait]
    impl TreeWalker for BrokenTree {
        async fn walk(&self) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("root directory vanished")
        }
    }

    #[async_trait]
    impl ContentHasher for BrokenTree {
        async fn digest(&self, _path: &str) -> anyhow::Result<String> {
            unreachable!("walk fails before any hashing")
        }
    }

    #[tokio::test]
    async fn indexes_every_file_without_prefix() {
        let tree = FakeTree::new(vec!["a.txt", "docs/b.txt"]);
        let index = build_index("", &tree, &tree).await.unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.files["a.txt"].key, "a.txt");
        assert_eq!(index.files["a.txt"].hash, "digest(a.txt)");
        assert_eq!(index.files["docs/b.txt"].key, "docs/b.txt");
    }

    #[tokio::test]
    async fn prefixes_keys_with_bucket_prefix() {
        let tree = FakeTree::new(vec!["a.txt"]);
        let index = build_index("laptop", &tree, &tree).await.unwrap();
        assert_eq!(index.files["a.txt"].key, "laptop/a.txt");
    }

    #[tokio::test]
    async fn normalizes_backslash_paths_before_keying() {
        let tree = FakeTree::new(vec!["docs\\sub\\c.txt"]);
        let index = build_index("root", &tree, &tree).await.unwrap();

        // Indexed and keyed in forward-slash form
        assert_eq!(index.len(), 1);
        assert_eq!(index.files["docs/sub/c.txt"].key, "root/docs/sub/c.txt");
    }

    #[tokio::test]
    async fn hash_failure_aborts_the_whole_scan() {
        let mut tree = FakeTree::new(vec!["a.txt", "b.txt", "c.txt"]);
        tree.fail_on = Some("b.txt");

        let err = build_index("", &tree, &tree).await.unwrap_err();
        match err {
            ScanError::Hash { path, .. } => assert_eq!(path, "b.txt"),
            other => panic!("expected hash error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn walk_failure_aborts_the_whole_scan() {
        let err = build_index("", &BrokenTree, &BrokenTree).await.unwrap_err();
        assert!(matches!(err, ScanError::Walk(_)));
    }

    #[test]
    fn normalize_path_leaves_forward_slashes_alone() {
        assert_eq!(normalize_path("a/b/c"), "a/b/c");
        assert_eq!(normalize_path("a\\b\\c"), "a/b/c");
    }
}
