use crier_core::{MediaRequirement, Platform, StagedMedia};
use tracing::info;

use crate::error::PublishError;
use crate::publisher::Publisher;

/// A publisher that logs what it would publish and succeeds without any
/// network I/O.
///
/// Stands in for a real platform during local runs (`crier --dry-run`).
pub struct DryRunPublisher {
    platform: Platform,
    requirement: MediaRequirement,
}

impl DryRunPublisher {
    pub fn new(platform: Platform, requirement: MediaRequirement) -> Self {
        Self {
            platform,
            requirement,
        }
    }
}

impl Publisher for DryRunPublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn media_requirement(&self) -> MediaRequirement {
        self.requirement
    }

    #[allow(clippy::unused_async)]
    async fn try_publish(&self, caption: &str, media: &StagedMedia) -> Result<String, PublishError> {
        let post_id = format!("dry-run-{}", uuid::Uuid::new_v4());
        info!(
            platform = %self.platform,
            caption_chars = caption.chars().count(),
            media = %media.location,
            %post_id,
            "dry-run publish"
        );
        Ok(post_id)
    }
}
