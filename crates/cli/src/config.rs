use std::path::{Path, PathBuf};
use std::time::Duration;

use crier_facebook::FacebookConfig;
use crier_instagram::{ContainerWait, InstagramConfig};
use crier_linkedin::LinkedinConfig;
use crier_media::DEFAULT_MAX_BYTES;
use crier_tiktok::{PrivacyLevel, TiktokConfig};
use serde::Deserialize;

/// Top-level configuration for the `crier` binary, loaded from a TOML file.
///
/// Every section is optional. Credentials left out of the file can come
/// from the environment (see [`CrierConfig::apply_env`]).
#[derive(Debug, Default, Deserialize)]
pub struct CrierConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub facebook: FacebookSection,
    #[serde(default)]
    pub instagram: InstagramSection,
    #[serde(default)]
    pub linkedin: LinkedinSection,
    #[serde(default)]
    pub tiktok: TiktokSection,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    /// Bound on every outbound request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Where uploads are stored and how they are served.
#[derive(Debug, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Public base URL; files are served under `<base_url>/uploads/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Directory for temporary files. Defaults to the system temp dir.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            base_url: default_base_url(),
            temp_dir: None,
            max_bytes: default_max_bytes(),
        }
    }
}

impl MediaConfig {
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_base_url() -> String {
    "http://localhost:3000".to_owned()
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

#[derive(Debug, Default, Deserialize)]
pub struct FacebookSection {
    pub access_token: Option<String>,
    pub page_id: Option<String>,
    pub graph_url: Option<String>,
    pub api_version: Option<String>,
}

impl FacebookSection {
    pub fn to_config(&self) -> FacebookConfig {
        let mut config = FacebookConfig::new();
        config.access_token.clone_from(&self.access_token);
        config.page_id.clone_from(&self.page_id);
        if let Some(url) = &self.graph_url {
            config = config.with_graph_url(url);
        }
        if let Some(version) = &self.api_version {
            config = config.with_api_version(version);
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct InstagramSection {
    pub access_token: Option<String>,
    pub account_id: Option<String>,
    pub graph_url: Option<String>,
    pub api_version: Option<String>,
    /// Container wait strategy, e.g. `{ mode = "fixed", delay = 10 }`.
    pub wait: Option<ContainerWait>,
}

impl InstagramSection {
    pub fn to_config(&self) -> InstagramConfig {
        let mut config = InstagramConfig::new();
        config.access_token.clone_from(&self.access_token);
        config.account_id.clone_from(&self.account_id);
        if let Some(url) = &self.graph_url {
            config = config.with_graph_url(url);
        }
        if let Some(version) = &self.api_version {
            config = config.with_api_version(version);
        }
        if let Some(wait) = self.wait {
            config = config.with_wait(wait);
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LinkedinSection {
    pub access_token: Option<String>,
    pub api_url: Option<String>,
    pub media_title: Option<String>,
    pub media_description: Option<String>,
    pub visibility: Option<String>,
}

impl LinkedinSection {
    pub fn to_config(&self) -> LinkedinConfig {
        let mut config = LinkedinConfig::new();
        config.access_token.clone_from(&self.access_token);
        config.media_title.clone_from(&self.media_title);
        config.media_description.clone_from(&self.media_description);
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url);
        }
        if let Some(visibility) = &self.visibility {
            config = config.with_visibility(visibility);
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokSection {
    pub access_token: Option<String>,
    pub api_url: Option<String>,
    pub privacy_level: Option<PrivacyLevel>,
    #[serde(default)]
    pub disable_interactions: bool,
}

impl TiktokSection {
    pub fn to_config(&self, media: &MediaConfig) -> TiktokConfig {
        let mut config = TiktokConfig::new()
            .with_temp_dir(media.temp_dir())
            .with_max_bytes(media.max_bytes)
            .with_interactions_disabled(self.disable_interactions);
        config.access_token.clone_from(&self.access_token);
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url);
        }
        if let Some(level) = self.privacy_level {
            config = config.with_privacy_level(level);
        }
        config
    }
}

impl CrierConfig {
    /// Read `path`, or fall back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Override file values with environment variables.
    ///
    /// `lookup` is `std::env::var` in the binary and a map in tests. The
    /// Instagram token falls back to the Facebook one, since both are Page
    /// tokens of the same Graph API app.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("FACEBOOK_TOKEN") {
            self.facebook.access_token = Some(v);
        }
        if let Some(v) = var("FACEBOOK_PAGE_ID") {
            self.facebook.page_id = Some(v);
        }
        if let Some(v) = var("INSTAGRAM_TOKEN") {
            self.instagram.access_token = Some(v);
        }
        if let Some(v) = var("INSTAGRAM_ACCOUNT_ID") {
            self.instagram.account_id = Some(v);
        }
        if let Some(v) = var("LINKEDIN_TOKEN") {
            self.linkedin.access_token = Some(v);
        }
        if let Some(v) = var("TIKTOK_TOKEN") {
            self.tiktok.access_token = Some(v);
        }
        if let Some(v) = var("BASE_URL") {
            self.media.base_url = v;
        }
        if let Some(v) = var("UPLOAD_DIR") {
            self.media.upload_dir = PathBuf::from(v);
        }

        if self.instagram.access_token.is_none() {
            self.instagram
                .access_token
                .clone_from(&self.facebook.access_token);
        }
    }
}
