//! Bounded upload scheduler - caps the number of uploads in flight
//!
//! The [`UploadScheduler`] is a fixed-capacity concurrency limiter shared
//! across the whole run: batch size controls checkpoint granularity, the
//! scheduler controls resource pressure, and the two are independent knobs.
//!
//! Slots are handed out as RAII [`UploadPermit`]s. A permit is acquired
//! before an upload starts and returned when it is dropped, so a failing
//! upload can never leak a slot, and the number of releases always equals
//! the number of acquisitions actually issued. A final batch smaller than
//! the capacity therefore leaves no dangling waiters behind.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Fixed-capacity concurrency limiter shared by every upload batch of a run
///
/// Cloning is cheap and shares the underlying semaphore.
#[derive(Debug, Clone)]
pub struct UploadScheduler {
    permits: Arc<Semaphore>,
    capacity: usize,
}

/// An acquired upload slot; the slot is returned when the permit is dropped
#[derive(Debug)]
pub struct UploadPermit {
    _permit: OwnedSemaphorePermit,
}

impl UploadScheduler {
    /// Create a scheduler allowing at most `parallel_limit` concurrent
    /// uploads (a limit of zero is treated as one)
    #[must_use]
    pub fn new(parallel_limit: usize) -> Self {
        let capacity = parallel_limit.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait until an upload slot is free, then claim it
    pub async fn acquire(&self) -> UploadPermit {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .expect("scheduler semaphore closed");
        UploadPermit { _permit: permit }
    }

    /// The configured concurrency limit
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently free
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
