//! s3mirror CLI - Command-line interface for s3mirror
//!
//! Provides commands for:
//! - Mirroring a local tree into an S3 bucket (`sync`)
//! - Previewing what a sync would transfer (`status`)
//! - Writing the local content index to a file (`index`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{index::IndexCommand, status::StatusCommand, sync::SyncCommand};
use output::OutputFormat;
use s3mirror_core::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "s3mirror",
    version,
    about = "Content-addressed mirroring of a file tree to S3"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload new and changed files to the bucket
    Sync(SyncCommand),
    /// Show what a sync would upload, without transferring anything
    Status(StatusCommand),
    /// Write the local content index to a file
    Index(IndexCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // An explicitly named config file must exist; the default path may not.
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_or_default(&Config::default_path()),
    };

    // Setup tracing: -v flags win over the configured level
    let level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Sync(cmd) => cmd.execute(&config, format).await,
        Commands::Status(cmd) => cmd.execute(&config, format).await,
        Commands::Index(cmd) => cmd.execute(&config, format).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_declaration_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sync_with_globals() {
        let cli = Cli::parse_from(["s3mirror", "--json", "-vv", "sync"]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Sync(_)));
    }

    #[test]
    fn parses_index_with_target_file() {
        let cli = Cli::parse_from(["s3mirror", "index", "--file", "out.yaml"]);
        match cli.command {
            Commands::Index(cmd) => assert_eq!(cmd.file, PathBuf::from("out.yaml")),
            other => panic!("expected index command, got {other:?}"),
        }
    }
}
