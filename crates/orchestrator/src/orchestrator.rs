use std::str::FromStr;
use std::sync::Arc;

use crier_core::{MediaSource, Platform, PublishOutcome, PublishRequest};
use crier_media::{Cleanup, MediaStager, Staged};
use crier_publisher::{DynPublisher, PublishError, PublisherSelector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::builder::OrchestratorBuilder;
use crate::error::OrchestratorError;
use crate::metrics::OrchestratorMetrics;
use crate::receipt::PublishReceipt;

/// One destination in a multi-platform publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishTarget {
    pub platform: Platform,
    pub caption: String,
    /// Already hosted media; targets without one are skipped.
    #[serde(default)]
    pub media_url: Option<String>,
}

impl PublishTarget {
    pub fn new(platform: Platform, caption: impl Into<String>, media_url: Option<String>) -> Self {
        Self {
            platform,
            caption: caption.into(),
            media_url,
        }
    }
}

/// The publish facade.
///
/// Resolves a publisher, stages media for its protocol, publishes and
/// cleans up after failures. Publishes run one at a time per call; callers
/// decide whether separate calls overlap.
pub struct Orchestrator {
    pub(crate) selector: PublisherSelector,
    pub(crate) stager: MediaStager,
    pub(crate) metrics: Arc<OrchestratorMetrics>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Platforms with a registered publisher.
    pub fn platforms(&self) -> Vec<Platform> {
        self.selector.platforms()
    }

    pub fn metrics(&self) -> &Arc<OrchestratorMetrics> {
        &self.metrics
    }

    /// Parse a platform name and check that it can be published to.
    pub fn resolve(&self, name: &str) -> Result<Platform, OrchestratorError> {
        let platform = Platform::from_str(name).map_err(|e| {
            self.metrics.increment_unsupported();
            warn!(platform = name, "unknown platform requested");
            OrchestratorError::from(PublishError::from(e))
        })?;
        self.publisher(platform)?;
        Ok(platform)
    }

    fn publisher(&self, platform: Platform) -> Result<Arc<dyn DynPublisher>, OrchestratorError> {
        self.selector.get(platform).map_err(|e| {
            self.metrics.increment_unsupported();
            warn!(%platform, "no publisher registered");
            e.into()
        })
    }

    /// Stage the request's media, publish it and clean up on failure.
    ///
    /// Returns `Err` only when the platform has no publisher. Invalid
    /// requests, staging problems and publish failures all come back as a
    /// failed receipt whose error is the cause's message.
    #[instrument(skip(self, request), fields(platform = %request.platform))]
    pub async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt, OrchestratorError> {
        let publisher = self.publisher(request.platform)?;
        Ok(self.run(publisher.as_ref(), &request).await)
    }

    /// Like [`publish`](Self::publish) with the platform given by name,
    /// e.g. from a form field or a CLI argument.
    pub async fn publish_named(
        &self,
        platform: &str,
        caption: impl Into<String>,
        media: MediaSource,
    ) -> Result<PublishReceipt, OrchestratorError> {
        let platform = self.resolve(platform)?;
        self.publish(PublishRequest::new(platform, caption, media))
            .await
    }

    /// Publish media that is already hosted at `url`.
    ///
    /// Nothing is uploaded to the media host, so a failure leaves nothing
    /// to clean up.
    pub async fn publish_existing_url(
        &self,
        platform: Platform,
        caption: &str,
        url: &str,
    ) -> Result<PublishReceipt, OrchestratorError> {
        self.publish(PublishRequest::new(
            platform,
            caption,
            MediaSource::PublicUrl(url.to_owned()),
        ))
        .await
    }

    /// Publish a video to TikTok, whose upload protocol reads the bytes
    /// from local disk. In-memory uploads are written to a temporary file
    /// that is removed once the attempt completes.
    pub async fn publish_video(
        &self,
        caption: &str,
        source: MediaSource,
    ) -> Result<PublishReceipt, OrchestratorError> {
        self.publish(PublishRequest::new(Platform::Tiktok, caption, source))
            .await
    }

    /// Publish one piece of content to several platforms, in order.
    ///
    /// Targets without a media URL are skipped. An unsupported platform
    /// becomes a failed receipt instead of stopping the batch.
    pub async fn publish_all(&self, targets: &[PublishTarget]) -> Vec<PublishReceipt> {
        let mut receipts = Vec::with_capacity(targets.len());
        for target in targets {
            let Some(url) = target.media_url.as_deref().filter(|u| !u.trim().is_empty()) else {
                debug!(platform = %target.platform, "no media for target; skipping");
                continue;
            };
            let receipt = match self
                .publish_existing_url(target.platform, &target.caption, url)
                .await
            {
                Ok(receipt) => receipt,
                Err(e) => PublishReceipt::failed(target.platform, e.to_string()),
            };
            receipts.push(receipt);
        }
        receipts
    }

    async fn run(&self, publisher: &dyn DynPublisher, request: &PublishRequest) -> PublishReceipt {
        let platform = request.platform;
        self.metrics.increment_attempted();

        if let Err(e) = request.validate() {
            return self.rejected(platform, PublishError::from(e).to_string());
        }

        let staged = match self
            .stager
            .stage(&request.media, publisher.media_requirement())
            .await
        {
            Ok(staged) => staged,
            Err(e) => return self.rejected(platform, PublishError::from(e).to_string()),
        };
        debug!(media = %staged.media.location, cleanup = ?staged.cleanup, "media staged");

        let outcome = publisher.publish(&request.caption, &staged.media).await;
        if outcome.is_success() {
            self.metrics.increment_published();
            info!(post_id = outcome.post_id().unwrap_or_default(), "published");
            self.finish_success(outcome, staged).await
        } else {
            self.metrics.increment_failed();
            warn!(error = outcome.error().unwrap_or_default(), "publish failed");
            self.release(&staged.cleanup).await;
            PublishReceipt::new(outcome)
        }
    }

    /// Hosted media outlives a successful publish; temporary files do not.
    async fn finish_success(&self, outcome: PublishOutcome, staged: Staged) -> PublishReceipt {
        match staged.cleanup {
            Cleanup::TempFile(_) => {
                self.release(&staged.cleanup).await;
                PublishReceipt::new(outcome)
            }
            Cleanup::None | Cleanup::Hosted(_) => PublishReceipt::new(outcome)
                .with_media(Some(staged.media.location.to_string()), staged.filename),
        }
    }

    async fn release(&self, cleanup: &Cleanup) {
        if self.stager.release(cleanup).await {
            self.metrics.increment_cleaned_up();
        }
    }

    fn rejected(&self, platform: Platform, error: String) -> PublishReceipt {
        self.metrics.increment_failed();
        warn!(%error, "publish rejected before reaching the platform");
        PublishReceipt::failed(platform, error)
    }
}
