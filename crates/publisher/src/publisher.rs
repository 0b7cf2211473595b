use async_trait::async_trait;
use crier_core::{MediaRequirement, Platform, PublishOutcome, StagedMedia};
use tracing::{info, warn};

use crate::error::PublishError;

/// Strongly-typed publisher trait with native `async fn`.
///
/// Each implementation drives one social network's publish protocol. The
/// fallible [`try_publish`](Self::try_publish) returns the upstream post id;
/// callers normally go through [`DynPublisher::publish`], which never fails
/// and folds every error into a [`PublishOutcome`].
///
/// This trait is **not** object-safe. Every `Publisher` automatically
/// implements [`DynPublisher`] via a blanket implementation.
pub trait Publisher: Send + Sync {
    /// The platform this publisher targets.
    fn platform(&self) -> Platform;

    /// How the publisher's protocol needs media delivered.
    fn media_requirement(&self) -> MediaRequirement;

    /// Run the protocol and return the identifier the platform assigned.
    fn try_publish(
        &self,
        caption: &str,
        media: &StagedMedia,
    ) -> impl std::future::Future<Output = Result<String, PublishError>> + Send;
}

/// Object-safe publisher trait for use behind `Arc<dyn DynPublisher>`.
///
/// You generally should not implement this trait directly -- implement
/// [`Publisher`] and rely on the blanket implementation.
#[async_trait]
pub trait DynPublisher: Send + Sync {
    /// The platform this publisher targets.
    fn platform(&self) -> Platform;

    /// How the publisher's protocol needs media delivered.
    fn media_requirement(&self) -> MediaRequirement;

    /// Publish `caption` with `media`. Never fails: errors become a failed
    /// outcome carrying the error's message.
    async fn publish(&self, caption: &str, media: &StagedMedia) -> PublishOutcome;
}

#[async_trait]
impl<T: Publisher + Sync> DynPublisher for T {
    fn platform(&self) -> Platform {
        Publisher::platform(self)
    }

    fn media_requirement(&self) -> MediaRequirement {
        Publisher::media_requirement(self)
    }

    async fn publish(&self, caption: &str, media: &StagedMedia) -> PublishOutcome {
        let platform = Publisher::platform(self);
        match self.try_publish(caption, media).await {
            Ok(post_id) => {
                info!(%platform, %post_id, "published");
                PublishOutcome::published(platform, post_id)
            }
            Err(err) => {
                warn!(%platform, error = %err, retryable = err.is_retryable(), "publish failed");
                PublishOutcome::failed(platform, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crier_core::MediaKind;

    use super::*;

    struct MockPublisher {
        platform: Platform,
        should_fail: bool,
    }

    impl Publisher for MockPublisher {
        fn platform(&self) -> Platform {
            self.platform
        }

        fn media_requirement(&self) -> MediaRequirement {
            MediaRequirement::PublicUrl
        }

        async fn try_publish(
            &self,
            _caption: &str,
            _media: &StagedMedia,
        ) -> Result<String, PublishError> {
            if self.should_fail {
                return Err(PublishError::Api("mock failure".into()));
            }
            Ok("post-1".into())
        }
    }

    fn media() -> StagedMedia {
        StagedMedia::url(MediaKind::Image, "https://cdn.example.com/x.png")
    }

    #[tokio::test]
    async fn blanket_impl_wraps_success() {
        let publisher: Arc<dyn DynPublisher> = Arc::new(MockPublisher {
            platform: Platform::Facebook,
            should_fail: false,
        });
        let outcome = publisher.publish("hi", &media()).await;
        assert_eq!(outcome, PublishOutcome::published(Platform::Facebook, "post-1"));
    }

    #[tokio::test]
    async fn blanket_impl_folds_error_into_outcome() {
        let publisher: Arc<dyn DynPublisher> = Arc::new(MockPublisher {
            platform: Platform::Linkedin,
            should_fail: true,
        });
        let outcome = publisher.publish("hi", &media()).await;
        assert!(!outcome.is_success());
        assert_eq!(outcome.platform(), Platform::Linkedin);
        assert_eq!(outcome.error(), Some("mock failure"));
    }

    #[tokio::test]
    async fn try_publish_exposes_typed_error() {
        let publisher = MockPublisher {
            platform: Platform::Instagram,
            should_fail: true,
        };
        let err = publisher.try_publish("hi", &media()).await.unwrap_err();
        assert!(matches!(err, PublishError::Api(_)));
    }
}
