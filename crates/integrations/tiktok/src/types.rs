use serde::{Deserialize, Serialize};

use crate::config::PrivacyLevel;

/// Body of `POST /v2/post/publish/video/init/`.
#[derive(Debug, Serialize)]
pub struct InitRequest<'a> {
    pub post_info: PostInfo<'a>,
    pub source_info: SourceInfo,
}

#[derive(Debug, Serialize)]
pub struct PostInfo<'a> {
    pub title: &'a str,
    pub privacy_level: PrivacyLevel,
    pub disable_comment: bool,
    pub disable_duet: bool,
    pub disable_stitch: bool,
}

/// Single-chunk file upload source.
#[derive(Debug, Serialize)]
pub struct SourceInfo {
    pub source: &'static str,
    pub video_size: u64,
    pub chunk_size: u64,
    pub total_chunk_count: u32,
}

impl SourceInfo {
    /// Whole file as one chunk.
    pub fn single_chunk(video_size: u64) -> Self {
        Self {
            source: "FILE_UPLOAD",
            video_size,
            chunk_size: video_size,
            total_chunk_count: 1,
        }
    }
}

/// Init response envelope.
#[derive(Debug, Default, Deserialize)]
pub struct InitResponse {
    pub data: Option<InitData>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InitData {
    pub publish_id: Option<String>,
    pub upload_url: Option<String>,
}

/// TikTok's `error` object; `code == "ok"` means success.
#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub log_id: Option<String>,
}

impl ApiError {
    pub fn is_ok(&self) -> bool {
        self.code == "ok"
    }
}

/// `Content-Range` header value for sending all of a `size`-byte file.
pub fn content_range(size: u64) -> String {
    format!("bytes 0-{}/{size}", size.saturating_sub(1))
}
