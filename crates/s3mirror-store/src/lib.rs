//! S3 object store adapter (secondary/driven adapter)
//!
//! Implements the [`ObjectStore`] port against S3 and S3-compatible
//! services (MinIO, Storj gateways) via `aws-sdk-s3`.
//!
//! ## Design Notes
//!
//! - Credentials can be given statically in the configuration or left empty
//!   to fall back to the ambient AWS credential chain (environment,
//!   profile, instance metadata).
//! - Path-style addressing is always used; most S3-compatible gateways
//!   require it and AWS still accepts it.
//! - `NoSuchKey` on a get is mapped to [`StoreError::NotFound`] so the sync
//!   engine can tell "first run, no checkpoint yet" apart from real
//!   failures. Everything else is passed through as an opaque error.

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use s3mirror_core::config::S3Config;
use s3mirror_core::ports::{ObjectStore, StoreError};

/// Connection settings for an [`S3Store`]
#[derive(Debug, Clone, Default)]
pub struct S3Options {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services; `None` means AWS proper
    pub endpoint: Option<String>,
    /// Static access key ID; empty means "use the ambient credential chain"
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl From<&S3Config> for S3Options {
    fn from(config: &S3Config) -> Self {
        Self {
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            session_token: config.session_token.clone(),
        }
    }
}

/// Object store backed by an S3 bucket
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Build a client for the bucket described by `options`
    pub async fn connect(options: S3Options) -> Self {
        let mut builder = if options.access_key_id.is_empty() {
            // No static credentials configured: resolve region and
            // credentials from the ambient chain.
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(options.region.clone()))
                .load()
                .await;
            aws_sdk_s3::config::Builder::from(&shared)
        } else {
            let credentials = Credentials::new(
                &options.access_key_id,
                &options.secret_access_key,
                options.session_token.clone(),
                None,
                "s3mirror-config",
            );
            aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new(options.region.clone()))
                .credentials_provider(credentials)
        };

        builder = builder.force_path_style(true);
        if let Some(endpoint) = &options.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: options.bucket,
        }
    }

    /// The bucket this store reads from and writes to
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        debug!(bucket = %self.bucket, key = %key, "getting object");

        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let data = output.body.collect().await.map_err(|err| {
                    StoreError::Other(
                        anyhow::Error::new(err)
                            .context(format!("failed to read body of '{key}'")),
                    )
                })?;
                Ok(data.into_bytes().to_vec())
            }
            Err(err) if err.as_service_error().is_some_and(|e| e.is_no_such_key()) => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(err) => Err(StoreError::Other(
                anyhow::Error::new(err).context(format!("failed to get '{key}'")),
            )),
        }
    }

    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), StoreError> {
        debug!(bucket = %self.bucket, key = %key, bytes = data.len(), "putting object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|err| {
                StoreError::Other(anyhow::Error::new(err).context(format!("failed to put '{key}'")))
            })?;

        Ok(())
    }
}
