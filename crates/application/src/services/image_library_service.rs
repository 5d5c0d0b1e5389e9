//! Reference image library
//!
//! Serves a random reference image from object storage.

use std::{fmt, sync::Arc};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::ObjectStoragePort};

/// Key prefix of the reference images of unblocked drains
pub const DEFAULT_IMAGE_PREFIX: &str = "NO BLOCKAGE/";

/// Picks random images from a bucket prefix
pub struct ImageLibraryService {
    storage: Arc<dyn ObjectStoragePort>,
    prefix: String,
}

impl fmt::Debug for ImageLibraryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageLibraryService")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl ImageLibraryService {
    pub fn new(storage: Arc<dyn ObjectStoragePort>, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    /// Download a random image under the prefix, base64 encoded
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub async fn random_image_base64(&self) -> Result<String, ApplicationError> {
        let keys: Vec<String> = self
            .storage
            .list_keys(&self.prefix)
            .await?
            .into_iter()
            .filter(|key| !key.ends_with('/'))
            .collect();

        let key = keys.choose(&mut rand::rng()).ok_or_else(|| {
            ApplicationError::NotFound(format!("No images found under '{}'", self.prefix))
        })?;
        debug!(key = %key, candidates = keys.len(), "Selected reference image");

        let body = self.storage.get_object(key).await?;
        Ok(STANDARD.encode(&body))
    }
}
