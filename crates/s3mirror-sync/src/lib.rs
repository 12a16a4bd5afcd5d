//! s3mirror Sync - Content-addressed synchronization engine
//!
//! Provides:
//! - Content indexing of a local file tree (SHA-256 per file)
//! - One-directional diffing against the last remote checkpoint
//! - Bounded-concurrency uploads, checkpointed in batches so a failure
//!   partway through a run never loses track of what is already stored
//!
//! ## Modules
//!
//! - [`scanner`] - Builds the local content index from an injected walker and hasher
//! - [`scheduler`] - Counting semaphore capping uploads in flight
//! - [`engine`] - Batch checkpoint orchestrator driving the upload run
//! - [`filesystem`] - Local filesystem adapter (walk, read, SHA-256 digest)

pub mod engine;
pub mod filesystem;
pub mod scanner;
pub mod scheduler;

use s3mirror_core::domain::IndexError;
use s3mirror_core::ports::StoreError;
use thiserror::Error;

/// Errors that can occur during a synchronization run
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote checkpoint could not be fetched (anything but "not found",
    /// which simply means a first run)
    #[error("failed to fetch remote index: {0}")]
    FetchIndex(#[source] StoreError),

    /// The remote checkpoint document could not be decoded, or the
    /// accumulating index could not be encoded
    #[error(transparent)]
    BadIndex(#[from] IndexError),

    /// A single object failed to transfer; already-uploaded objects of the
    /// same batch stay in the store but are not checkpointed
    #[error("upload failed for '{path}': {source}")]
    Upload {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The checkpoint write itself failed; the run stops so the remote
    /// index never describes objects that are not actually present
    #[error("checkpoint write failed: {0}")]
    Checkpoint(#[source] StoreError),

    /// An upload task was cancelled or panicked before reporting a result
    #[error("upload task aborted: {0}")]
    TaskAborted(String),
}
