//! Status command - preview what a sync would upload
//!
//! Diffs the local tree against the remote checkpoint and reports the
//! pending entries without transferring anything.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use s3mirror_core::config::Config;
use s3mirror_store::{S3Options, S3Store};
use s3mirror_sync::engine::SyncEngine;
use s3mirror_sync::filesystem::LocalFileSystem;
use s3mirror_sync::scanner;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Directory to scan (overrides the configured sync root)
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

impl StatusCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        super::check_config(config)?;

        let root = self.root.clone().unwrap_or_else(|| config.sync.root.clone());
        let fs = LocalFileSystem::new(&root);

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

        let diff = local.diff(&remote);
        let unchanged = local.len() - diff.len();

        match format {
            OutputFormat::Json => formatter.print_json(&serde_json::json!({
                "pending": diff
                    .files
                    .iter()
                    .map(|(path, file)| serde_json::json!({"path": path, "key": file.key}))
                    .collect::<Vec<_>>(),
                "unchanged": unchanged,
            })),
            OutputFormat::Human => {
                for (path, file) in &diff.files {
                    formatter.info(&format!("would upload {} -> {}", path, file.key));
                }
                formatter.success(&format!(
                    "{} to upload, {} unchanged",
                    diff.len(),
                    unchanged
                ));
            }
        }

        Ok(())
    }
}
