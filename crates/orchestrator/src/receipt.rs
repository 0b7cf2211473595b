use crier_core::{Platform, PublishOutcome};
use serde::Serialize;

/// What the orchestrator hands back for one publish attempt.
///
/// The outcome, plus where the media ended up when the publish succeeded
/// so callers can record it. Serialises flat: `success`, `platform`,
/// `postId` / `error`, `mediaUrl`, `filename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    #[serde(flatten)]
    pub outcome: PublishOutcome,
    /// Public URL or path of the media used; only set on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Name under which staging stored the media, if it stored it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl PublishReceipt {
    pub fn new(outcome: PublishOutcome) -> Self {
        Self {
            outcome,
            media_url: None,
            filename: None,
        }
    }

    /// A failed receipt with no media bookkeeping.
    pub fn failed(platform: Platform, error: impl Into<String>) -> Self {
        Self::new(PublishOutcome::failed(platform, error))
    }

    #[must_use]
    pub fn with_media(mut self, media_url: Option<String>, filename: Option<String>) -> Self {
        self.media_url = media_url;
        self.filename = filename;
        self
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn platform(&self) -> Platform {
        self.outcome.platform()
    }

    pub fn post_id(&self) -> Option<&str> {
        self.outcome.post_id()
    }

    pub fn error(&self) -> Option<&str> {
        self.outcome.error()
    }
}
