//! Test doubles shared by the orchestrator's unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use crier_core::{MediaLocation, MediaRequirement, Platform, StagedMedia};
use crier_media::{HostedMedia, MediaError, MediaHost};
use crier_publisher::{PublishError, Publisher};

/// Media host that records every call and never touches the network.
#[derive(Default)]
pub struct RecordingHost {
    pub uploads: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaHost for RecordingHost {
    async fn upload_from_url(&self, url: &str) -> Result<HostedMedia, MediaError> {
        self.uploads.lock().unwrap().push(url.to_owned());
        Ok(HostedMedia {
            url: url.to_owned(),
            filename: "remote".into(),
            content_type: None,
            size: 0,
        })
    }

    async fn upload_from_bytes(
        &self,
        data: Bytes,
        filename: &str,
        content_type: Option<&str>,
    ) -> Result<HostedMedia, MediaError> {
        let stored = format!("stored-{filename}");
        self.uploads.lock().unwrap().push(stored.clone());
        Ok(HostedMedia {
            url: format!("https://media.test/uploads/{stored}"),
            filename: stored,
            content_type: content_type.map(str::to_owned),
            size: data.len() as u64,
        })
    }

    async fn delete(&self, reference: &str) -> Result<bool, MediaError> {
        self.deletes.lock().unwrap().push(reference.to_owned());
        Ok(true)
    }
}

/// What a stub publisher saw for one call.
#[derive(Debug, Clone)]
pub struct SeenCall {
    pub caption: String,
    pub media: StagedMedia,
    /// Whether a local media file existed while publishing.
    pub file_present: bool,
}

/// Publisher returning a fixed result and recording its inputs.
pub struct StubPublisher {
    platform: Platform,
    requirement: MediaRequirement,
    failure: Option<String>,
    pub calls: Mutex<Vec<SeenCall>>,
}

impl StubPublisher {
    pub fn ok(platform: Platform, requirement: MediaRequirement) -> Self {
        Self {
            platform,
            requirement,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(platform: Platform, requirement: MediaRequirement, error: &str) -> Self {
        Self {
            failure: Some(error.to_owned()),
            ..Self::ok(platform, requirement)
        }
    }

    pub fn calls(&self) -> Vec<SeenCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Publisher for StubPublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn media_requirement(&self) -> MediaRequirement {
        self.requirement
    }

    async fn try_publish(&self, caption: &str, media: &StagedMedia) -> Result<String, PublishError> {
        let file_present = match &media.location {
            MediaLocation::LocalPath(path) => path.exists(),
            MediaLocation::PublicUrl(_) => false,
        };
        self.calls.lock().unwrap().push(SeenCall {
            caption: caption.to_owned(),
            media: media.clone(),
            file_present,
        });
        match &self.failure {
            Some(error) => Err(PublishError::Api(error.clone())),
            None => Ok(format!("{}-post", self.platform)),
        }
    }
}
