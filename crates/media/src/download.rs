use std::path::{Path, PathBuf};
use std::time::Duration;

use crier_core::mime;
use crier_publisher::http::{DEFAULT_TIMEOUT, build_client, transfer_timeout};
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use crate::error::MediaError;

/// Default upper bound on a single staged artifact: 500 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 500 * 1024 * 1024;

/// A file written to local disk by [`Downloader::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    /// `Content-Type` reported by the remote server, if any.
    pub content_type: Option<String>,
    pub size: u64,
}

/// Streams remote media into uniquely named files under one directory.
#[derive(Clone)]
pub struct Downloader {
    client: reqwest::Client,
    dir: PathBuf,
    max_bytes: u64,
    /// Longest wait for the next body chunk before the download is dropped.
    stall_timeout: Duration,
}

impl std::fmt::Debug for Downloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Downloader")
            .field("dir", &self.dir)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

impl Downloader {
    /// Download into `dir` with the default timeout and size limit.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_client(dir, build_client(DEFAULT_TIMEOUT))
    }

    pub fn with_client(dir: impl Into<PathBuf>, client: reqwest::Client) -> Self {
        Self {
            client,
            dir: dir.into(),
            max_bytes: DEFAULT_MAX_BYTES,
            stall_timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Fetch `url` and stream its body into a new file.
    ///
    /// The file extension comes from the response content type, then from
    /// the URL path, then falls back to `bin`. The transfer may take as long
    /// as the size limit needs at the minimum transfer rate, but fails once
    /// no bytes arrive for the stall timeout. A partially written file is
    /// removed before any error is returned.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub async fn download(&self, url: &str) -> Result<DownloadedFile, MediaError> {
        let response = self
            .client
            .get(url)
            .timeout(transfer_timeout(self.max_bytes))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::Download(status.to_string()));
        }

        if let Some(len) = response.content_length()
            && len > self.max_bytes
        {
            return Err(MediaError::TooLarge {
                size: len,
                limit: self.max_bytes,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let ext = content_type
            .as_deref()
            .and_then(mime::extension_for)
            .or_else(|| url_extension(url))
            .unwrap_or("bin");

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(unique_name(ext));
        let mut file = tokio::fs::File::create(&path).await?;
        let mut stream = response.bytes_stream();

        let size = discard_on_error(&path, async move {
            let mut size = 0u64;
            loop {
                let next = tokio::time::timeout(self.stall_timeout, stream.next())
                    .await
                    .map_err(|_| MediaError::Stalled(self.stall_timeout))?;
                let Some(chunk) = next else {
                    break;
                };
                let chunk = chunk?;
                size += chunk.len() as u64;
                if size > self.max_bytes {
                    return Err(MediaError::TooLarge {
                        size,
                        limit: self.max_bytes,
                    });
                }
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            Ok::<_, MediaError>(size)
        })
        .await?;

        debug!(path = %path.display(), size, "media downloaded");
        Ok(DownloadedFile {
            path,
            content_type,
            size,
        })
    }
}

/// Create `path` and write all of `data` to disk. A file left behind by a
/// failed write is removed.
pub(crate) async fn write_new_file(path: &Path, data: &[u8]) -> Result<(), MediaError> {
    let mut file = tokio::fs::File::create(path).await?;
    discard_on_error(path, async move {
        file.write_all(data).await?;
        file.sync_all().await?;
        Ok::<_, MediaError>(())
    })
    .await
}

/// Run `step`, which owns the open handle to `path`, and remove `path` if
/// it fails.
async fn discard_on_error<T>(
    path: &Path,
    step: impl Future<Output = Result<T, MediaError>>,
) -> Result<T, MediaError> {
    let result = step.await;
    if result.is_err() {
        remove_quietly(path).await;
    }
    result
}

/// A collision-free file name: `crier-<unix millis>-<uuid>.<ext>`.
pub fn unique_name(ext: &str) -> String {
    format!(
        "crier-{}-{}.{ext}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Delete `path`, logging instead of failing. Returns whether a file was
/// actually removed.
pub async fn remove_quietly(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "removed staged file");
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove staged file");
            false
        }
    }
}

/// Last path segment of a URL, without query string or fragment.
pub(crate) fn url_file_name(url: &str) -> Option<&str> {
    let without_query = url.split(['?', '#']).next()?;
    let after_scheme = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);
    let (_, path) = after_scheme.split_once('/')?;
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Known media extension of a URL's last path segment.
fn url_extension(url: &str) -> Option<&'static str> {
    url_file_name(url)
        .and_then(mime::content_type_for)
        .and_then(mime::extension_for)
}

#[cfg(test)]
mod tests {
    use crier_test_support::{MockHttpServer, MockResponse};

    use super::*;

    const KIB: usize = 1024;

    #[test]
    fn unique_names_differ() {
        let a = unique_name("mp4");
        let b = unique_name("mp4");
        assert_ne!(a, b);
        assert!(a.starts_with("crier-"));
        assert!(a.ends_with(".mp4"));
    }

    #[test]
    fn url_file_name_strips_query() {
        assert_eq!(
            url_file_name("https://cdn.example.com/a/b/clip.MP4?sig=1#t"),
            Some("clip.MP4")
        );
        assert_eq!(url_file_name("https://cdn.example.com/"), None);
        assert_eq!(url_file_name("https://cdn.example.com"), None);
        assert_eq!(url_extension("https://x/y/photo.jpeg"), Some("jpg"));
        assert_eq!(url_extension("https://x/y/file.txt"), None);
    }

    #[tokio::test]
    async fn downloads_body_to_unique_file() {
        let dir = tempfile::tempdir().unwrap();
        let server =
            MockHttpServer::start(vec![MockResponse::bytes(200, "video/mp4", b"fake-video")])
                .await;
        let downloader = Downloader::new(dir.path());

        let file = downloader.download(&server.url("/v/clip")).await.unwrap();

        assert_eq!(file.size, 10);
        assert_eq!(file.content_type.as_deref(), Some("video/mp4"));
        assert_eq!(file.path.extension().unwrap(), "mp4");
        assert!(file.path.starts_with(dir.path()));
        assert_eq!(tokio::fs::read(&file.path).await.unwrap(), b"fake-video");
    }

    #[tokio::test]
    async fn extension_falls_back_to_url() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockHttpServer::start(vec![MockResponse::bytes(
            200,
            "application/octet-stream",
            b"png-bytes",
        )])
        .await;
        let downloader = Downloader::new(dir.path());

        let file = downloader.download(&server.url("/img/photo.png")).await.unwrap();
        assert_eq!(file.path.extension().unwrap(), "png");
    }

    #[tokio::test]
    async fn non_success_status_is_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockHttpServer::start(vec![MockResponse::text(404, "nope")]).await;
        let downloader = Downloader::new(dir.path());

        let err = downloader.download(&server.url("/missing.mp4")).await.unwrap_err();
        assert!(matches!(err, MediaError::Download(_)));
        assert!(err.to_string().contains("404"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn oversized_download_is_rejected_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let server =
            MockHttpServer::start(vec![MockResponse::bytes(200, "video/mp4", &[0u8; 64])]).await;
        let downloader = Downloader::new(dir.path()).with_max_bytes(16);

        let err = downloader.download(&server.url("/big.mp4")).await.unwrap_err();
        assert!(matches!(err, MediaError::TooLarge { limit: 16, .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn slow_download_outlives_the_request_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let video = vec![7u8; 256 * KIB];
        let server = MockHttpServer::start(vec![
            MockResponse::bytes(200, "video/mp4", &video).paced(16 * KIB, Duration::from_millis(50)),
        ])
        .await;
        // Sixteen pieces 50 ms apart take far longer than the client timeout.
        let downloader =
            Downloader::with_client(dir.path(), build_client(Duration::from_millis(200)));

        let file = downloader.download(&server.url("/v/long.mp4")).await.unwrap();

        assert_eq!(file.size, video.len() as u64);
        assert_eq!(tokio::fs::read(&file.path).await.unwrap(), video);
    }

    #[tokio::test]
    async fn stalled_download_fails_and_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockHttpServer::start(vec![
            MockResponse::bytes(200, "video/mp4", &[1u8; 8 * KIB])
                .paced(KIB, Duration::from_millis(500)),
        ])
        .await;
        let downloader = Downloader {
            stall_timeout: Duration::from_millis(100),
            ..Downloader::new(dir.path())
        };

        let err = downloader.download(&server.url("/v/stuck.mp4")).await.unwrap_err();

        assert!(matches!(err, MediaError::Stalled(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn failed_write_step_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.png");
        tokio::fs::write(&path, b"half").await.unwrap();

        let result: Result<(), MediaError> = discard_on_error(&path, async {
            Err(MediaError::Io(std::io::Error::other("disk full")))
        })
        .await;

        assert!(matches!(result, Err(MediaError::Io(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn successful_write_keeps_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whole.png");

        write_new_file(&path, b"png-bytes").await.unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn remove_quietly_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.mp4");
        assert!(!remove_quietly(&path).await);
        tokio::fs::write(&path, b"x").await.unwrap();
        assert!(remove_quietly(&path).await);
        assert!(!path.exists());
    }
}
