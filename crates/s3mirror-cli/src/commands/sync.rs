//! Sync command - upload new and changed files to the bucket
//!
//! Provides the `s3mirror sync` CLI command which:
//! 1. Scans the local tree into a content index
//! 2. Fetches the remote checkpoint (empty on first run)
//! 3. Runs the sync engine and displays the resulting report

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use s3mirror_core::config::Config;
use s3mirror_store::{S3Options, S3Store};
use s3mirror_sync::engine::SyncEngine;
use s3mirror_sync::filesystem::LocalFileSystem;
use s3mirror_sync::scanner;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Directory to scan (overrides the configured sync root)
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

impl SyncCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        super::check_config(config)?;

        let root = self.root.clone().unwrap_or_else(|| config.sync.root.clone());
        let fs = LocalFileSystem::new(&root);

        info!(root = %root.display(), "scanning local tree");
        let local = scanner::build_index(&config.sync.bucket_prefix, &fs, &fs)
            .await
            .context("failed to build local index")?;

        let store = Arc::new(S3Store::connect(S3Options::from(&config.s3)).await);
        let engine = SyncEngine::new(
            store,
            Arc::new(fs),
            config.sync.parallel_limit,
            config.sync.batch_size,
        );

        let remote = engine.fetch_remote_index().await?;
        let report = engine.sync(&local, &remote).await?;

        match format {
            OutputFormat::Json => formatter.print_json(&serde_json::json!({
                "uploaded": report.files_uploaded,
                "unchanged": report.files_unchanged,
                "batches": report.batches_completed,
                "duration_ms": report.duration_ms,
            })),
            OutputFormat::Human => formatter.success(&format!(
                "{} uploaded, {} unchanged ({} ms)",
                report.files_uploaded, report.files_unchanged, report.duration_ms
            )),
        }

        Ok(())
    }
}
