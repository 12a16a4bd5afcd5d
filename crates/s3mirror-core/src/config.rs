//! Configuration module for s3mirror.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, defaults, and a builder pattern for
//! programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for s3mirror.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub s3: S3Config,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// S3 connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket the mirrored objects and the checkpoint index are written to.
    pub bucket: String,
    /// AWS region of the bucket.
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, Storj gateways).
    /// `None` uses the regular AWS endpoint.
    pub endpoint: Option<String>,
    /// Static access key ID. Leave empty to use the ambient AWS credential
    /// chain (environment, profile, instance metadata).
    pub access_key_id: String,
    /// Static secret access key.
    pub secret_access_key: String,
    /// Optional session token for temporary credentials.
    pub session_token: Option<String>,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Root directory of the local tree to mirror.
    pub root: PathBuf,
    /// Logical prefix prepended to every object key. Empty means objects
    /// land at the bucket root.
    pub bucket_prefix: String,
    /// Maximum number of uploads in flight at any instant.
    pub parallel_limit: usize,
    /// Number of files uploaded between checkpoint writes.
    pub batch_size: usize,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/s3mirror/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("s3mirror")
            .join("config.yaml")
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            bucket_prefix: String::new(),
            parallel_limit: 8,
            batch_size: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.batch_size"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- s3 ---
        if self.s3.bucket.is_empty() {
            errors.push(ValidationError {
                field: "s3.bucket".into(),
                message: "must not be empty".into(),
            });
        }
        if self.s3.region.is_empty() {
            errors.push(ValidationError {
                field: "s3.region".into(),
                message: "must not be empty".into(),
            });
        }
        // Static credentials come as a pair; one half alone is a config typo.
        if self.s3.access_key_id.is_empty() != self.s3.secret_access_key.is_empty() {
            errors.push(ValidationError {
                field: "s3.access_key_id".into(),
                message: "access_key_id and secret_access_key must be set together".into(),
            });
        }

        // --- sync ---
        if self.sync.parallel_limit == 0 {
            errors.push(ValidationError {
                field: "sync.parallel_limit".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.sync.batch_size == 0 {
            errors.push(ValidationError {
                field: "sync.batch_size".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.sync.bucket_prefix.ends_with('/') {
            errors.push(ValidationError {
                field: "sync.bucket_prefix".into(),
                message: "must not end with '/'".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use s3mirror_core::config::ConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = ConfigBuilder::new()
///     .s3_bucket("my-backups")
///     .sync_root(PathBuf::from("/home/user/docs"))
///     .sync_parallel_limit(4)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- s3 ---

    pub fn s3_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.s3.bucket = bucket.into();
        self
    }

    pub fn s3_region(mut self, region: impl Into<String>) -> Self {
        self.config.s3.region = region.into();
        self
    }

    pub fn s3_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.s3.endpoint = Some(endpoint.into());
        self
    }

    pub fn s3_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.config.s3.access_key_id = access_key_id.into();
        self.config.s3.secret_access_key = secret_access_key.into();
        self
    }

    pub fn s3_session_token(mut self, token: impl Into<String>) -> Self {
        self.config.s3.session_token = Some(token.into());
        self
    }

    // --- sync ---

    pub fn sync_root(mut self, root: PathBuf) -> Self {
        self.config.sync.root = root;
        self
    }

    pub fn sync_bucket_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.sync.bucket_prefix = prefix.into();
        self
    }

    pub fn sync_parallel_limit(mut self, n: usize) -> Self {
        self.config.sync.parallel_limit = n;
        self
    }

    pub fn sync_batch_size(mut self, n: usize) -> Self {
        self.config.sync.batch_size = n;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
