//! Object storage port

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for a bucket of reference images
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStoragePort: Send + Sync {
    /// List all object keys under a prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ApplicationError>;

    /// Download an object
    async fn get_object(&self, key: &str) -> Result<Bytes, ApplicationError>;
}
