use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use crier_core::{MediaKind, MediaRequirement, MediaSource, StagedMedia, mime};
use tracing::{debug, instrument, warn};

use crate::download::{remove_quietly, unique_name, url_file_name, write_new_file};
use crate::error::MediaError;
use crate::host::{HostedMedia, MediaHost};

/// What must be undone once a publish attempt that used staged media
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleanup {
    /// Nothing was created; the media belongs to the caller.
    None,
    /// A temporary file on local disk.
    TempFile(PathBuf),
    /// Media stored on the media host, by public URL.
    Hosted(String),
}

/// Media placed for one publish call, plus how to undo the placement.
#[derive(Debug, Clone)]
pub struct Staged {
    pub media: StagedMedia,
    pub cleanup: Cleanup,
    /// Stored file name when staging created one.
    pub filename: Option<String>,
}

impl Staged {
    fn borrowed(media: StagedMedia) -> Self {
        Self {
            media,
            cleanup: Cleanup::None,
            filename: None,
        }
    }

    fn hosted(kind: MediaKind, hosted: HostedMedia) -> Self {
        let mut media = StagedMedia::url(kind, hosted.url.clone());
        media.content_type = hosted.content_type;
        Self {
            media,
            cleanup: Cleanup::Hosted(hosted.url),
            filename: Some(hosted.filename),
        }
    }
}

/// Prepares media in the form each publisher protocol consumes.
///
/// | source \ requirement | `PublicUrl`            | `LocalBytes`             |
/// |----------------------|------------------------|--------------------------|
/// | public URL           | passed through         | passed through (the publisher stages it) |
/// | local file           | uploaded to the host   | passed through           |
/// | in-memory bytes      | uploaded to the host   | written to a temp file   |
pub struct MediaStager {
    host: Arc<dyn MediaHost>,
    temp_dir: PathBuf,
    max_bytes: u64,
}

impl MediaStager {
    pub fn new(host: Arc<dyn MediaHost>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            host,
            temp_dir: temp_dir.into(),
            max_bytes: crate::download::DEFAULT_MAX_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Place `source` so that a publisher with `requirement` can consume it.
    #[instrument(skip(self))]
    pub async fn stage(
        &self,
        source: &MediaSource,
        requirement: MediaRequirement,
    ) -> Result<Staged, MediaError> {
        match (source, requirement) {
            (MediaSource::PublicUrl(url), _) => {
                let content_type = url_file_name(url)
                    .and_then(mime::content_type_for);
                let kind = content_type
                    .and_then(MediaKind::from_content_type)
                    .unwrap_or(MediaKind::Image);
                let mut media = StagedMedia::url(kind, url.clone());
                media.content_type = content_type.map(str::to_owned);
                Ok(Staged::borrowed(media))
            }
            (MediaSource::LocalFile(path), MediaRequirement::LocalBytes) => {
                // The publisher reports a missing file itself.
                let content_type = mime::content_type_for(path);
                let kind = content_type
                    .and_then(MediaKind::from_content_type)
                    .unwrap_or(MediaKind::Video);
                let mut media = StagedMedia::local(kind, path.clone());
                media.content_type = content_type.map(str::to_owned);
                Ok(Staged::borrowed(media))
            }
            (MediaSource::LocalFile(path), MediaRequirement::PublicUrl) => {
                let content_type = mime::content_type_for(path)
                    .ok_or_else(|| MediaError::InvalidContentType(path.display().to_string()))?;
                let kind = classify(content_type)?;
                let data = self.read_limited(path).await?;
                let filename = file_name(path);
                let hosted = self
                    .host
                    .upload_from_bytes(data, &filename, Some(content_type))
                    .await?;
                debug!(url = %hosted.url, "local file hosted");
                Ok(Staged::hosted(kind, hosted))
            }
            (
                MediaSource::InMemory {
                    data,
                    filename,
                    content_type,
                },
                requirement,
            ) => {
                let content_type = content_type
                    .as_deref()
                    .or_else(|| mime::content_type_for(filename))
                    .ok_or_else(|| MediaError::InvalidContentType(filename.clone()))?;
                let kind = classify(content_type)?;
                self.check_size(data.len() as u64)?;

                match requirement {
                    MediaRequirement::PublicUrl => {
                        let hosted = self
                            .host
                            .upload_from_bytes(data.clone(), filename, Some(content_type))
                            .await?;
                        debug!(url = %hosted.url, "upload hosted");
                        Ok(Staged::hosted(kind, hosted))
                    }
                    MediaRequirement::LocalBytes => {
                        let path = self.write_temp(data, content_type).await?;
                        let stored = file_name(&path);
                        Ok(Staged {
                            media: StagedMedia::local(kind, path.clone())
                                .with_content_type(content_type),
                            cleanup: Cleanup::TempFile(path),
                            filename: Some(stored),
                        })
                    }
                }
            }
        }
    }

    /// Undo a staging step. Best effort: failures are logged, never
    /// returned, so they cannot mask the publish outcome. Returns whether
    /// something was removed.
    #[instrument(skip(self))]
    pub async fn release(&self, cleanup: &Cleanup) -> bool {
        match cleanup {
            Cleanup::None => false,
            Cleanup::TempFile(path) => remove_quietly(path).await,
            Cleanup::Hosted(reference) => match self.host.delete(reference).await {
                Ok(removed) => removed,
                Err(e) => {
                    warn!(reference = %reference, error = %e, "failed to delete hosted media");
                    false
                }
            },
        }
    }

    fn check_size(&self, size: u64) -> Result<(), MediaError> {
        if size > self.max_bytes {
            return Err(MediaError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    async fn read_limited(&self, path: &Path) -> Result<Bytes, MediaError> {
        let size = tokio::fs::metadata(path).await?.len();
        self.check_size(size)?;
        Ok(Bytes::from(tokio::fs::read(path).await?))
    }

    async fn write_temp(&self, data: &Bytes, content_type: &str) -> Result<PathBuf, MediaError> {
        let ext = mime::extension_for(content_type).unwrap_or("bin");
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let path = self.temp_dir.join(unique_name(ext));
        write_new_file(&path, data).await?;
        Ok(path)
    }
}

fn classify(content_type: &str) -> Result<MediaKind, MediaError> {
    MediaKind::from_content_type(content_type)
        .ok_or_else(|| MediaError::InvalidContentType(content_type.to_owned()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
