//! Object store port (driven/secondary port)
//!
//! This module defines the interface for the remote key/value object store.
//! The primary implementation targets S3-compatible services (see
//! `s3mirror-store`), but the trait is deliberately minimal - get by key,
//! save by key - so tests can substitute an in-memory store.
//!
//! ## Design Notes
//!
//! - Unlike the other ports, errors here are typed: the engine must be able
//!   to tell "no such object" apart from any other failure, because a
//!   missing checkpoint simply means "first run" while everything else is
//!   fatal.
//! - Uses `#[async_trait]` for async trait methods.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by object store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No object exists under the requested key
    #[error("no object under key '{0}'")]
    NotFound(String),

    /// Any other store failure (network, authentication, service error)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Port trait for remote object storage
///
/// Implementations handle transport, authentication and service-specific
/// error mapping. The engine never retries through this port; a re-run of
/// the whole sync is the retry mechanism.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Retrieve the object stored under `key`
    ///
    /// # Returns
    /// The object's bytes, or [`StoreError::NotFound`] if no such object
    /// exists.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Store `data` under `key`, overwriting any existing object
    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), StoreError>;
}
