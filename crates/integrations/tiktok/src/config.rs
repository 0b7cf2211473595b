use std::path::PathBuf;

use crier_media::DEFAULT_MAX_BYTES;
use serde::{Deserialize, Serialize};

/// Default TikTok Open API host.
pub const DEFAULT_API_URL: &str = "https://open.tiktokapis.com";

/// Who can see a direct post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyLevel {
    PublicToEveryone,
    MutualFollowFriends,
    FollowerOfCreator,
    /// Required for unaudited API clients.
    #[default]
    SelfOnly,
}

/// Configuration for the TikTok publisher.
#[derive(Clone)]
pub struct TiktokConfig {
    /// User access token with `video.publish`.
    pub access_token: Option<String>,

    /// Open API base URL. Overridable for tests.
    pub api_url: String,

    pub privacy_level: PrivacyLevel,
    pub disable_comment: bool,
    pub disable_duet: bool,
    pub disable_stitch: bool,

    /// Directory for videos downloaded from remote URLs.
    pub temp_dir: PathBuf,

    /// Largest video accepted from a remote URL.
    pub max_bytes: u64,
}

impl std::fmt::Debug for TiktokConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_url", &self.api_url)
            .field("privacy_level", &self.privacy_level)
            .field("disable_comment", &self.disable_comment)
            .field("disable_duet", &self.disable_duet)
            .field("disable_stitch", &self.disable_stitch)
            .field("temp_dir", &self.temp_dir)
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

impl Default for TiktokConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TiktokConfig {
    pub fn new() -> Self {
        Self {
            access_token: None,
            api_url: DEFAULT_API_URL.to_owned(),
            privacy_level: PrivacyLevel::default(),
            disable_comment: false,
            disable_duet: false,
            disable_stitch: false,
            temp_dir: std::env::temp_dir(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    #[must_use]
    pub fn with_privacy_level(mut self, level: PrivacyLevel) -> Self {
        self.privacy_level = level;
        self
    }

    /// Set the comment, duet and stitch switches at once.
    #[must_use]
    pub fn with_interactions_disabled(mut self, disabled: bool) -> Self {
        self.disable_comment = disabled;
        self.disable_duet = disabled;
        self.disable_stitch = disabled;
        self
    }

    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// `POST` endpoint initialising a direct video post.
    pub fn init_url(&self) -> String {
        format!(
            "{}/v2/post/publish/video/init/",
            self.api_url.trim_end_matches('/')
        )
    }
}
