//! Index command - write the local content index to a file
//!
//! Generates the same document a checkpoint would contain, without talking
//! to the store at all. Useful for seeding a bucket's index or inspecting
//! what a scan sees.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use s3mirror_core::config::Config;
use s3mirror_sync::filesystem::LocalFileSystem;
use s3mirror_sync::scanner;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct IndexCommand {
    /// Location of the index file to write
    #[arg(long, default_value = ".s3mirror.yaml")]
    pub file: PathBuf,

    /// Directory to scan (overrides the configured sync root)
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

impl IndexCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let root = self.root.clone().unwrap_or_else(|| config.sync.root.clone());
        let fs = LocalFileSystem::new(&root);

        let index = scanner::build_index(&config.sync.bucket_prefix, &fs, &fs)
            .await
            .context("unable to read files for index")?;
        let document = index.encode().context("unable to encode index")?;

        tokio::fs::write(&self.file, document)
            .await
            .with_context(|| format!("unable to write {}", self.file.display()))?;

        formatter.success(&format!(
            "indexed {} files into {}",
            index.len(),
            self.file.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use s3mirror_core::config::ConfigBuilder;
    use s3mirror_core::domain::Index;

    use super::*;

    #[tokio::test]
    async fn writes_a_decodable_index_of_the_tree() {
        let tree = tempfile::tempdir().unwrap();
        std::fs::write(tree.path().join("a.txt"), b"alpha").unwrap();
        std::fs::create_dir(tree.path().join("sub")).unwrap();
        std::fs::write(tree.path().join("sub/b.txt"), b"beta").unwrap();

        let out = tree.path().join("index.yaml");
        let cmd = IndexCommand {
            file: out.clone(),
            root: Some(tree.path().to_path_buf()),
        };
        let config = ConfigBuilder::new().sync_bucket_prefix("backups").build();

        cmd.execute(&config, OutputFormat::Human).await.unwrap();

        let document = std::fs::read_to_string(&out).unwrap();
        let index = Index::decode(&document).unwrap();
        // The index file itself was written after the scan, so only the
        // two fixture files appear.
        assert_eq!(index.len(), 2);
        assert_eq!(index.files["a.txt"].key, "backups/a.txt");
        assert_eq!(index.files["sub/b.txt"].key, "backups/sub/b.txt");
    }
}
