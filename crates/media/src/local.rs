use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use crier_core::mime;
use tracing::{info, instrument};

use crate::download::{Downloader, remove_quietly, unique_name, url_file_name, write_new_file};
use crate::error::MediaError;
use crate::host::{HostedMedia, MediaHost};

/// Stores media under a local upload directory that a web server exposes
/// at `<base_url>/uploads/<file>`.
#[derive(Debug, Clone)]
pub struct LocalMediaHost {
    upload_dir: PathBuf,
    base_url: String,
    downloader: Downloader,
}

impl LocalMediaHost {
    /// Create a host writing to `upload_dir` and serving under `base_url`
    /// (e.g. `http://localhost:3000`).
    pub fn new(upload_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let upload_dir = upload_dir.into();
        Self {
            downloader: Downloader::new(upload_dir.clone()),
            upload_dir,
            base_url: base_url.into(),
        }
    }

    /// Limit the size of media accepted from remote URLs.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.downloader = self.downloader.with_max_bytes(max_bytes);
        self
    }

    /// Public URL for a stored file name.
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/uploads/{filename}", self.base_url.trim_end_matches('/'))
    }

    /// Map a public URL or a path to a file inside the upload directory.
    fn resolve(&self, reference: &str) -> Result<PathBuf, MediaError> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            let name = url_file_name(reference)
                .ok_or_else(|| {
                    MediaError::Host(format!("La URL no contiene un nombre de archivo: {reference}"))
                })?;
            return Ok(self.upload_dir.join(name));
        }
        let path = PathBuf::from(reference);
        if path.starts_with(&self.upload_dir) && !reference.contains("..") {
            Ok(path)
        } else {
            Err(MediaError::Host(format!(
                "{reference} está fuera del directorio de subidas"
            )))
        }
    }

    fn hosted(&self, path: &Path, content_type: Option<String>, size: u64) -> HostedMedia {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        HostedMedia {
            url: self.public_url(&filename),
            filename,
            content_type,
            size,
        }
    }
}

#[async_trait]
impl MediaHost for LocalMediaHost {
    #[instrument(skip(self))]
    async fn upload_from_url(&self, url: &str) -> Result<HostedMedia, MediaError> {
        let file = self.downloader.download(url).await?;
        let hosted = self.hosted(&file.path, file.content_type, file.size);
        info!(url = %hosted.url, size = hosted.size, "media re-hosted locally");
        Ok(hosted)
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload_from_bytes(
        &self,
        data: Bytes,
        filename: &str,
        content_type: Option<&str>,
    ) -> Result<HostedMedia, MediaError> {
        let content_type = content_type
            .map(str::to_owned)
            .or_else(|| mime::content_type_for(filename).map(str::to_owned));
        let ext = mime::content_type_for(filename)
            .and_then(mime::extension_for)
            .or_else(|| content_type.as_deref().and_then(mime::extension_for))
            .unwrap_or("bin");

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        let path = self.upload_dir.join(unique_name(ext));
        write_new_file(&path, &data).await?;

        let hosted = self.hosted(&path, content_type, data.len() as u64);
        info!(url = %hosted.url, size = hosted.size, "media stored locally");
        Ok(hosted)
    }

    #[instrument(skip(self))]
    async fn delete(&self, reference: &str) -> Result<bool, MediaError> {
        let path = self.resolve(reference)?;
        Ok(remove_quietly(&path).await)
    }
}
