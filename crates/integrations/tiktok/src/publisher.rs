use std::path::PathBuf;

use crier_core::limits::TIKTOK_VIDEO_TITLE;
use crier_core::{MediaLocation, MediaRequirement, Platform, StagedMedia, mime, truncate_chars};
use crier_media::{Downloader, remove_quietly};
use crier_publisher::http::{DEFAULT_TIMEOUT, JsonResponse, build_client, transfer_timeout};
use crier_publisher::{PublishError, Publisher};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client};
use tokio_util::io::ReaderStream;
use tracing::{debug, info, instrument};

use crate::config::TiktokConfig;
use crate::error::TiktokError;
use crate::types::{InitRequest, InitResponse, PostInfo, SourceInfo, content_range};

const JSON_UTF8: &str = "application/json; charset=UTF-8";
const DEFAULT_VIDEO_TYPE: &str = "video/mp4";

/// Video file on local disk, possibly downloaded for this attempt.
#[derive(Debug)]
struct LocalVideo {
    path: PathBuf,
    content_type: Option<String>,
    /// Set when the file was downloaded and must be removed afterwards.
    temporary: bool,
}

/// Result of a successful init call.
#[derive(Debug)]
struct UploadTicket {
    publish_id: String,
    upload_url: String,
}

/// Publishes a video to TikTok through the direct-post file upload flow.
pub struct TiktokPublisher {
    config: TiktokConfig,
    client: Client,
    downloader: Downloader,
}

impl TiktokPublisher {
    pub fn new(config: TiktokConfig) -> Self {
        Self::with_client(config, build_client(DEFAULT_TIMEOUT))
    }

    pub fn with_client(config: TiktokConfig, client: Client) -> Self {
        let downloader = Downloader::with_client(config.temp_dir.clone(), client.clone())
            .with_max_bytes(config.max_bytes);
        Self {
            config,
            client,
            downloader,
        }
    }

    /// Bring the media onto local disk.
    async fn localize(&self, media: &StagedMedia) -> Result<LocalVideo, PublishError> {
        match &media.location {
            MediaLocation::LocalPath(path) => Ok(LocalVideo {
                path: path.clone(),
                content_type: media.content_type.clone(),
                temporary: false,
            }),
            MediaLocation::PublicUrl(url) => {
                debug!(%url, "downloading video to a temporary file");
                let file = self.downloader.download(url).await?;
                Ok(LocalVideo {
                    path: file.path,
                    content_type: file.content_type.or_else(|| media.content_type.clone()),
                    temporary: true,
                })
            }
        }
    }

    async fn upload(
        &self,
        token: &str,
        caption: &str,
        video: &LocalVideo,
    ) -> Result<String, PublishError> {
        let size = match tokio::fs::metadata(&video.path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => return Err(TiktokError::VideoNotFound.into()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TiktokError::VideoNotFound.into());
            }
            Err(e) => return Err(e.into()),
        };
        if size == 0 {
            return Err(TiktokError::EmptyVideo.into());
        }

        let ticket = self.init(token, caption, size).await?;
        info!(publish_id = %ticket.publish_id, size, "upload initialised");
        self.send_file(&ticket.upload_url, video, size).await?;
        Ok(ticket.publish_id)
    }

    async fn init(&self, token: &str, caption: &str, size: u64) -> Result<UploadTicket, PublishError> {
        let title = truncate_chars(caption, TIKTOK_VIDEO_TITLE);
        let request = InitRequest {
            post_info: PostInfo {
                title,
                privacy_level: self.config.privacy_level,
                disable_comment: self.config.disable_comment,
                disable_duet: self.config.disable_duet,
                disable_stitch: self.config.disable_stitch,
            },
            source_info: SourceInfo::single_chunk(size),
        };
        let body = serde_json::to_vec(&request)
            .map_err(|e| PublishError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .post(self.config.init_url())
            .bearer_auth(token)
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(body)
            .send()
            .await?;
        let response = JsonResponse::read(response).await?;
        let status_ok = response.is_success();
        let parsed: InitResponse = serde_json::from_value(response.body.clone()).unwrap_or_default();

        if let Some(error) = parsed.error.as_ref()
            && !error.is_ok()
        {
            debug!(code = %error.code, log_id = ?error.log_id, "init rejected");
            return Err(TiktokError::Api {
                code: error.code.clone(),
                message: error.message.clone(),
            }
            .into());
        }
        if !status_ok {
            return Err(response.into_error("Error en paso 1"));
        }

        let data = parsed.data.unwrap_or_default();
        let upload_url = data
            .upload_url
            .filter(|u| !u.is_empty())
            .ok_or(TiktokError::MissingUploadUrl)?;
        let publish_id = data
            .publish_id
            .filter(|id| !id.is_empty())
            .ok_or(TiktokError::MissingPublishId)?;
        Ok(UploadTicket {
            publish_id,
            upload_url,
        })
    }

    async fn send_file(
        &self,
        upload_url: &str,
        video: &LocalVideo,
        size: u64,
    ) -> Result<(), PublishError> {
        let content_type = video_content_type(video);
        debug!(%content_type, size, "uploading video bytes");
        let file = tokio::fs::File::open(&video.path).await?;

        let response = self
            .client
            .put(upload_url)
            .timeout(transfer_timeout(size))
            .header(CONTENT_TYPE, content_type)
            .header("Content-Range", content_range(size))
            .header(CONTENT_LENGTH, size)
            .body(Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TiktokError::Upload(status.as_u16()).into());
        }
        Ok(())
    }
}

/// Declared content type when it is a video, else the extension's, else mp4.
fn video_content_type(video: &LocalVideo) -> String {
    video
        .content_type
        .as_deref()
        .filter(|ct| mime::is_video(ct))
        .or_else(|| mime::content_type_for(&video.path).filter(|ct| mime::is_video(ct)))
        .unwrap_or(DEFAULT_VIDEO_TYPE)
        .to_owned()
}

async fn discard(video: &LocalVideo) {
    if video.temporary {
        remove_quietly(&video.path).await;
    }
}

impl Publisher for TiktokPublisher {
    fn platform(&self) -> Platform {
        Platform::Tiktok
    }

    fn media_requirement(&self) -> MediaRequirement {
        MediaRequirement::LocalBytes
    }

    #[instrument(skip(self, caption, media), fields(platform = "tiktok"))]
    async fn try_publish(&self, caption: &str, media: &StagedMedia) -> Result<String, PublishError> {
        let token = self
            .config
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(TiktokError::MissingToken)?;

        let video = self.localize(media).await?;
        let result = self.upload(token, caption, &video).await;
        discard(&video).await;
        result
    }
}
