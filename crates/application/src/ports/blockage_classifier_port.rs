//! Drain blockage classifier port

use async_trait::async_trait;
use domain::BlockagePrediction;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the image classifier
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlockageClassifierPort: Send + Sync {
    /// Classify the blockage state of a drain photo
    async fn classify(&self, image: &[u8]) -> Result<BlockagePrediction, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn BlockageClassifierPort>();
    }
}
