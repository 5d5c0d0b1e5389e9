//! S3 storage adapter - Implements ObjectStoragePort using rust-s3

use application::error::ApplicationError;
use application::ports::ObjectStoragePort;
use async_trait::async_trait;
use bytes::Bytes;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument};

use crate::config::StorageAppConfig;

/// Adapter for an S3-compatible bucket
pub struct S3StorageAdapter {
    bucket: Box<Bucket>,
}

impl std::fmt::Debug for S3StorageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3StorageAdapter")
            .field("bucket", &self.bucket.name())
            .finish()
    }
}

impl S3StorageAdapter {
    /// Build the bucket handle from configuration
    ///
    /// Credentials fall back to the AWS environment variables when not
    /// configured explicitly.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no bucket is configured, the region
    /// is invalid or no credentials can be found.
    pub fn new(config: &StorageAppConfig) -> Result<Self, ApplicationError> {
        let name = config
            .bucket
            .as_deref()
            .ok_or_else(|| ApplicationError::Configuration("storage.bucket is not set".into()))?;

        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(access), Some(secret)) => Credentials::new(
                Some(access.expose_secret()),
                Some(secret.expose_secret()),
                None,
                None,
                None,
            ),
            _ => Credentials::default(),
        }
        .map_err(|e| ApplicationError::Configuration(format!("S3 credentials: {e}")))?;

        let region = if let Some(ref endpoint) = config.endpoint {
            Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            }
        } else {
            config
                .region
                .parse()
                .map_err(|e| ApplicationError::Configuration(format!("Invalid S3 region: {e}")))?
        };

        let bucket = Bucket::new(name, region, credentials)
            .map_err(|e| ApplicationError::Configuration(format!("S3 bucket handle: {e}")))?
            .with_path_style();

        info!(bucket = %name, endpoint = ?config.endpoint, "S3 storage configured");
        Ok(Self { bucket })
    }
}

#[async_trait]
impl ObjectStoragePort for S3StorageAdapter {
    #[instrument(skip(self))]
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ApplicationError> {
        let pages = self
            .bucket
            .list(prefix.to_string(), None)
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("S3 list failed: {e}")))?;

        let keys: Vec<String> = pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| object.key)
            .collect();

        debug!(count = keys.len(), "Listed objects");
        Ok(keys)
    }

    #[instrument(skip(self))]
    async fn get_object(&self, key: &str) -> Result<Bytes, ApplicationError> {
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("S3 download failed: {e}")))?;

        match response.status_code() {
            200 => {
                debug!(bytes = response.as_slice().len(), "Downloaded object");
                Ok(Bytes::copy_from_slice(response.as_slice()))
            },
            404 => Err(ApplicationError::NotFound(format!("Object '{key}' not found"))),
            status => Err(ApplicationError::ExternalService(format!(
                "S3 download returned status {status}: {}",
                String::from_utf8_lossy(response.as_slice())
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config() -> StorageAppConfig {
        StorageAppConfig {
            bucket: Some("drain-images".to_string()),
            endpoint: Some("http://127.0.0.1:9000".to_string()),
            access_key: Some(SecretString::from("minio")),
            secret_key: Some(SecretString::from("minio-secret")),
            ..StorageAppConfig::default()
        }
    }

    #[test]
    fn new_requires_bucket() {
        let config = StorageAppConfig {
            bucket: None,
            ..config()
        };
        let err = S3StorageAdapter::new(&config).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn new_with_custom_endpoint() {
        let adapter = S3StorageAdapter::new(&config()).unwrap();
        assert!(format!("{adapter:?}").contains("drain-images"));
    }
}
