//! Batch checkpoint sync engine
//!
//! The [`SyncEngine`] drives a whole upload run:
//!
//! 1. Diff the freshly-scanned local index against the remote checkpoint.
//! 2. Partition the diff into batches of at most `batch_size` entries.
//! 3. Upload each batch concurrently, capped by the shared
//!    [`UploadScheduler`](crate::scheduler::UploadScheduler).
//! 4. After every fully-successful batch, persist the accumulating index
//!    under [`INDEX_KEY`] as the new checkpoint.
//!
//! Checkpointing per batch bounds the re-work after a crash to one batch's
//! worth of files without serializing every upload behind an index write.
//! When any upload in a batch fails, the batch's remaining tasks run to
//! completion (no sibling cancellation), the checkpoint for that batch is
//! *not* written, and the first error is propagated - so a re-run re-diffs
//! and re-attempts exactly the entries that are not yet checkpointed.
//! Re-uploads are idempotent, which makes that safe.

use std::sync::Arc;
use std::time::Instant;

use s3mirror_core::domain::{Index, Sourcefile};
use s3mirror_core::ports::{FileSource, ObjectStore, StoreError};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::scheduler::UploadScheduler;
use crate::SyncError;

/// Well-known key of the checkpoint index in the object store
///
/// Always written at the bucket root, never under the bucket prefix.
pub const INDEX_KEY: &str = ".index.yaml";

/// Summary of a completed synchronization run
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Number of files uploaded
    pub files_uploaded: u64,
    /// Number of local files already present remotely with the same hash
    pub files_unchanged: u64,
    /// Number of batches fully uploaded and checkpointed
    pub batches_completed: u64,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

/// Content-addressed upload orchestrator
///
/// ## Dependencies
///
/// - `store`: remote object operations (get/put by key)
/// - `files`: local file reads for upload payloads
/// - the scheduler is constructed once here and shared by every batch
pub struct SyncEngine {
    store: Arc<dyn ObjectStore>,
    files: Arc<dyn FileSource>,
    scheduler: UploadScheduler,
    batch_size: usize,
}

impl SyncEngine {
    /// Create a new engine
    ///
    /// `parallel_limit` caps uploads in flight across the whole run;
    /// `batch_size` sets how many files are uploaded between checkpoint
    /// writes. Zero values are treated as one.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        files: Arc<dyn FileSource>,
        parallel_limit: usize,
        batch_size: usize,
    ) -> Self {
        Self {
            store,
            files,
            scheduler: UploadScheduler::new(parallel_limit),
            batch_size: batch_size.max(1),
        }
    }

    /// Fetch and decode the remote checkpoint index
    ///
    /// A missing checkpoint means "first run" and yields an empty index.
    /// Any other store failure, or a checkpoint that does not parse, is
    /// fatal: the run cannot safely determine what is already stored.
    pub async fn fetch_remote_index(&self) -> Result<Index, SyncError> {
        match self.store.get(INDEX_KEY).await {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                let index = Index::decode(&text)?;
                debug!(entries = index.len(), "decoded remote index");
                Ok(index)
            }
            Err(StoreError::NotFound(_)) => {
                info!("remote index does not exist, using empty index");
                Ok(Index::new())
            }
            Err(err) => Err(SyncError::FetchIndex(err)),
        }
    }

    /// Upload everything in `local` that is missing or changed in `remote`,
    /// checkpointing after each successful batch
    #[tracing::instrument(skip_all)]
    pub async fn sync(&self, local: &Index, remote: &Index) -> Result<SyncReport, SyncError> {
        let start = Instant::now();

        let diff = local.diff(remote);
        let mut report = SyncReport {
            files_unchanged: (local.len() - diff.len()) as u64,
            ..SyncReport::default()
        };

        info!(
            pending = diff.len(),
            unchanged = report.files_unchanged,
            "computed index diff"
        );

        if diff.is_empty() {
            report.duration_ms = start.elapsed().as_millis() as u64;
            info!("nothing to upload");
            return Ok(report);
        }

        // The accumulating index starts as a copy of the remote one and
        // gains entries as uploads succeed; it is the only state mutated
        // concurrently, hence the mutex.
        let to_upload = Arc::new(Mutex::new(remote.clone()));

        let entries: Vec<(String, Sourcefile)> = diff
            .files
            .iter()
            .map(|(path, file)| (path.clone(), file.clone()))
            .collect();

        for (batch_no, batch) in entries.chunks(self.batch_size).enumerate() {
            debug!(batch = batch_no, files = batch.len(), "uploading batch");
            self.upload_batch(batch, &to_upload).await?;
            report.files_uploaded += batch.len() as u64;

            // Persist the checkpoint before the next batch may start. A
            // failed write here must stop the run: the remote index must
            // never describe objects that are not actually present.
            let document = to_upload.lock().await.encode()?;
            self.store
                .put(INDEX_KEY, document.into_bytes())
                .await
                .map_err(SyncError::Checkpoint)?;

            report.batches_completed += 1;
            debug!(batch = batch_no, "checkpoint written");
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            uploaded = report.files_uploaded,
            batches = report.batches_completed,
            duration_ms = report.duration_ms,
            "sync completed"
        );
        Ok(report)
    }

    /// Upload one batch concurrently and wait for every task to finish
    ///
    /// Successful entries are recorded into the accumulating index even
    /// when a sibling fails; the first error (in batch order) is returned.
    async fn upload_batch(
        &self,
        batch: &[(String, Sourcefile)],
        to_upload: &Arc<Mutex<Index>>,
    ) -> Result<(), SyncError> {
        let mut tasks = Vec::with_capacity(batch.len());

        for (path, file) in batch {
            let path = path.clone();
            let file = file.clone();
            let store = Arc::clone(&self.store);
            let files = Arc::clone(&self.files);
            let scheduler = self.scheduler.clone();
            let to_upload = Arc::clone(to_upload);

            tasks.push(tokio::spawn(async move {
                let _permit = scheduler.acquire().await;

                let upload = async {
                    let data = files.read(&path).await?;
                    debug!(path = %path, key = %file.key, "uploading");
                    store.put(&file.key, data).await?;
                    Ok::<(), anyhow::Error>(())
                };

                match upload.await {
                    Ok(()) => {
                        to_upload.lock().await.add(path, file);
                        Ok(())
                    }
                    Err(source) => Err(SyncError::Upload { path, source }),
                }
            }));
        }

        // Batch barrier: wait for all tasks, report the first failure.
        let mut first_error = None;
        for task in tasks {
            match task.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn!(error = %err, "upload failed");
                    first_error.get_or_insert(err);
                }
                Err(join_err) => {
                    first_error.get_or_insert(SyncError::TaskAborted(join_err.to_string()));
                }
            }
        }

        match first_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}
