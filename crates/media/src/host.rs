use async_trait::async_trait;
use bytes::Bytes;

use crate::error::MediaError;

/// Media stored by a [`MediaHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedMedia {
    /// Permanent public URL.
    pub url: String,
    /// Name the host stored the media under.
    pub filename: String,
    pub content_type: Option<String>,
    pub size: u64,
}

/// External media hosting capability.
///
/// A host turns bytes or a remote URL into a permanent public URL that
/// platforms can fetch, and can later delete what it stored. Crier ships
/// [`LocalMediaHost`](crate::LocalMediaHost); cloud hosts plug in behind
/// the same trait.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Re-host media currently reachable at `url`.
    async fn upload_from_url(&self, url: &str) -> Result<HostedMedia, MediaError>;

    /// Store `data` and return where it can be fetched publicly.
    ///
    /// `filename` is the original name and is used only to pick an
    /// extension; the stored name is always unique.
    async fn upload_from_bytes(
        &self,
        data: Bytes,
        filename: &str,
        content_type: Option<&str>,
    ) -> Result<HostedMedia, MediaError>;

    /// Delete previously hosted media by public URL or storage path.
    ///
    /// Returns `true` if something was removed. Deleting a reference that
    /// no longer exists is not an error.
    async fn delete(&self, reference: &str) -> Result<bool, MediaError>;
}
