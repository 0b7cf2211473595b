/// Default Graph API host.
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";

/// Graph API version the publisher targets.
pub const DEFAULT_API_VERSION: &str = "v24.0";

/// Configuration for the Facebook publisher.
#[derive(Clone)]
pub struct FacebookConfig {
    /// Page access token.
    pub access_token: Option<String>,

    /// Id of the Page to publish on.
    pub page_id: Option<String>,

    /// Graph API base URL. Overridable for tests.
    pub graph_url: String,

    /// Graph API version path segment, e.g. `v24.0`.
    pub api_version: String,
}

impl std::fmt::Debug for FacebookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacebookConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("page_id", &self.page_id)
            .field("graph_url", &self.graph_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Default for FacebookConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FacebookConfig {
    /// Create a configuration with no credentials and the public Graph API.
    pub fn new() -> Self {
        Self {
            access_token: None,
            page_id: None,
            graph_url: DEFAULT_GRAPH_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
        }
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_page_id(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }

    /// Point the publisher at a different Graph API host.
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

    /// `POST` endpoint for page photos.
    pub fn photos_url(&self, page_id: &str) -> String {
        format!(
            "{}/{}/{page_id}/photos",
            self.graph_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FacebookConfig::default();
        assert!(config.access_token.is_none());
        assert!(config.page_id.is_none());
        assert_eq!(config.graph_url, "https://graph.facebook.com");
        assert_eq!(config.api_version, "v24.0");
    }

    #[test]
    fn photos_url_layout() {
        let config = FacebookConfig::new().with_graph_url("http://127.0.0.1:9/");
        assert_eq!(
            config.photos_url("42"),
            "http://127.0.0.1:9/v24.0/42/photos"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let config = FacebookConfig::new()
            .with_access_token("EAAB-secret-placeholder")
            .with_page_id("42");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-placeholder"));
        assert!(debug.contains("42"));
    }
}
