//! The content index: a mapping from local path to remote key + content hash
//!
//! The index is the single source of truth for "what is already stored
//! remotely". A **local** index is built fresh on every run by scanning the
//! file tree; the **remote** index is decoded from the last checkpoint saved
//! in the object store. Diffing the two yields the minimal set of objects
//! that must be transferred.
//!
//! ## Durable form
//!
//! The index serializes to a YAML document with a single top-level `files`
//! mapping, each entry keyed by local path:
//!
//! ```yaml
//! files:
//!   docs/report.txt:
//!     key: backups/docs/report.txt
//!     hash: LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=
//! ```
//!
//! Paths are stored in a `BTreeMap`, so encoding is deterministic and two
//! index documents can be compared with ordinary text tooling. Unknown
//! fields are ignored on decode, so documents written by a future version
//! remain readable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::IndexError;

/// Metadata for a single mirrored file
///
/// `key` is the fully-qualified object name in the remote store (it may be
/// prefixed with a logical bucket-root segment); `hash` is the base64 digest
/// of the file's contents. Two sourcefiles are equal iff both fields are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sourcefile {
    /// Location of this file in the bucket
    pub key: String,
    /// Digest of the file contents
    pub hash: String,
}

/// All of the metadata for files mirrored to the remote store
///
/// An index with zero entries is valid and means "nothing known".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Maps the local file path (slash-normalized) to its metadata
    #[serde(default)]
    pub files: BTreeMap<String, Sourcefile>,
}

impl Index {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an index from its durable YAML form
    ///
    /// The exact inverse of [`Index::encode`] for well-formed documents.
    /// An empty document decodes to an empty index.
    pub fn decode(text: &str) -> Result<Self, IndexError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_yaml::from_str(text).map_err(IndexError::Parse)
    }

    /// Encode the index as YAML
    ///
    /// Entries are emitted in path order, so the output is deterministic
    /// and round-trips through [`Index::decode`].
    pub fn encode(&self) -> Result<String, IndexError> {
        serde_yaml::to_string(self).map_err(IndexError::Encode)
    }

    /// Insert a single source file, overwriting any existing entry for `path`
    pub fn add(&mut self, path: impl Into<String>, file: Sourcefile) {
        self.files.insert(path.into(), file);
    }

    /// Find all entries in this index that are absent from `remote` or whose
    /// hash differs from the remote entry
    ///
    /// This is a one-directional "what must I push" diff: entries present
    /// only in `remote` are never included, and unchanged entries (same
    /// hash) are excluded.
    #[must_use]
    pub fn diff(&self, remote: &Index) -> Index {
        let mut diff = Index::new();
        for (path, file) in &self.files {
            match remote.files.get(path) {
                Some(theirs) if theirs.hash == file.hash => {}
                _ => diff.add(path.clone(), file.clone()),
            }
        }
        diff
    }

    /// Number of entries in the index
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the index has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
