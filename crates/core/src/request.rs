use crate::error::CoreError;
use crate::media::MediaSource;
use crate::platform::Platform;

/// A request to publish one piece of content to one platform.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub platform: Platform,
    pub caption: String,
    pub media: MediaSource,
}

impl PublishRequest {
    pub fn new(platform: Platform, caption: impl Into<String>, media: MediaSource) -> Self {
        Self {
            platform,
            caption: caption.into(),
            media,
        }
    }

    /// Check the request invariants: a non-blank caption and a media source
    /// that can be resolved to bytes.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.caption.trim().is_empty() {
            return Err(CoreError::InvalidRequest("Caption es requerido".into()));
        }
        match &self.media {
            MediaSource::PublicUrl(url) if url.trim().is_empty() => Err(
                CoreError::InvalidRequest("La URL del archivo está vacía".into()),
            ),
            MediaSource::LocalFile(path) if path.as_os_str().is_empty() => Err(
                CoreError::InvalidRequest("La ruta del archivo está vacía".into()),
            ),
            MediaSource::InMemory { data, .. } if data.is_empty() => Err(
                CoreError::InvalidRequest("No se recibió ningún archivo".into()),
            ),
            _ => Ok(()),
        }
    }
}
