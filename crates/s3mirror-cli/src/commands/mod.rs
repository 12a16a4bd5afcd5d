//! CLI command implementations

pub mod index;
pub mod status;
pub mod sync;

use anyhow::{bail, Result};
use s3mirror_core::config::Config;

/// Refuse to talk to the store with a config that cannot work
pub(crate) fn check_config(config: &Config) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!("invalid configuration:\n  {}", details.join("\n  "));
}
