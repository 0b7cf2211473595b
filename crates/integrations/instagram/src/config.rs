use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Graph API host.
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";

/// Graph API version the publisher targets.
pub const DEFAULT_API_VERSION: &str = "v24.0";

/// How the publisher waits between creating and publishing a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ContainerWait {
    /// Sleep for a fixed settle time, then publish.
    Fixed {
        #[serde(with = "secs")]
        delay: Duration,
    },
    /// Check the container's `status_code` until it is `FINISHED`.
    Poll {
        #[serde(with = "secs")]
        interval: Duration,
        /// Status checks before giving up; a value of zero still checks once.
        #[serde(deserialize_with = "at_least_one")]
        max_attempts: u32,
    },
}

impl ContainerWait {
    /// The historical fixed ten-second settle delay.
    pub fn default_fixed() -> Self {
        Self::Fixed {
            delay: Duration::from_secs(10),
        }
    }
}

impl Default for ContainerWait {
    fn default() -> Self {
        Self::Poll {
            interval: Duration::from_secs(3),
            max_attempts: 20,
        }
    }
}

fn at_least_one<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(u32::deserialize(deserializer)?.max(1))
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

/// Configuration for the Instagram publisher.
#[derive(Clone)]
pub struct InstagramConfig {
    /// Page access token with `instagram_content_publish`.
    pub access_token: Option<String>,

    /// Instagram business account id.
    pub account_id: Option<String>,

    /// Graph API base URL. Overridable for tests.
    pub graph_url: String,

    /// Graph API version path segment, e.g. `v24.0`.
    pub api_version: String,

    /// Wait strategy between the two phases.
    pub wait: ContainerWait,
}

impl std::fmt::Debug for InstagramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("account_id", &self.account_id)
            .field("graph_url", &self.graph_url)
            .field("api_version", &self.api_version)
            .field("wait", &self.wait)
            .finish()
    }
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl InstagramConfig {
    pub fn new() -> Self {
        Self {
            access_token: None,
            account_id: None,
            graph_url: DEFAULT_GRAPH_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            wait: ContainerWait::default(),
        }
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    #[must_use]
    pub fn with_graph_url(mut self, url: impl Into<String>) -> Self {
        self.graph_url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    #[must_use]
    pub fn with_wait(mut self, wait: ContainerWait) -> Self {
        self.wait = wait;
        self
    }

    fn base(&self) -> String {
        format!(
            "{}/{}",
            self.graph_url.trim_end_matches('/'),
            self.api_version
        )
    }

    pub fn media_url(&self, account_id: &str) -> String {
        format!("{}/{account_id}/media", self.base())
    }

    pub fn media_publish_url(&self, account_id: &str) -> String {
        format!("{}/{account_id}/media_publish", self.base())
    }

    pub fn container_url(&self, container_id: &str) -> String {
        format!("{}/{container_id}", self.base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_polls() {
        let config = InstagramConfig::default();
        assert!(config.access_token.is_none());
        assert_eq!(
            config.wait,
            ContainerWait::Poll {
                interval: Duration::from_secs(3),
                max_attempts: 20
            }
        );
        assert_eq!(
            ContainerWait::default_fixed(),
            ContainerWait::Fixed {
                delay: Duration::from_secs(10)
            }
        );
    }

    #[test]
    fn endpoint_layout() {
        let config = InstagramConfig::new().with_graph_url("http://localhost:1/");
        assert_eq!(config.media_url("9"), "http://localhost:1/v24.0/9/media");
        assert_eq!(
            config.media_publish_url("9"),
            "http://localhost:1/v24.0/9/media_publish"
        );
        assert_eq!(config.container_url("c1"), "http://localhost:1/v24.0/c1");
    }

    #[test]
    fn wait_deserializes_from_seconds() {
        let wait: ContainerWait =
            serde_json::from_str(r#"{"mode":"poll","interval":1.5,"max_attempts":4}"#).unwrap();
        assert_eq!(
            wait,
            ContainerWait::Poll {
                interval: Duration::from_millis(1500),
                max_attempts: 4
            }
        );
        let fixed: ContainerWait = serde_json::from_str(r#"{"mode":"fixed","delay":10}"#).unwrap();
        assert_eq!(fixed, ContainerWait::default_fixed());
    }

    #[test]
    fn zero_poll_attempts_become_one() {
        let wait: ContainerWait =
            serde_json::from_str(r#"{"mode":"poll","interval":2,"max_attempts":0}"#).unwrap();
        assert_eq!(
            wait,
            ContainerWait::Poll {
                interval: Duration::from_secs(2),
                max_attempts: 1
            }
        );
    }

    #[test]
    fn debug_redacts_token() {
        let config = InstagramConfig::new().with_access_token("EAAB-secret-placeholder");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-placeholder"));
    }
}
