/// Default LinkedIn REST base URL.
pub const DEFAULT_API_URL: &str = "https://api.linkedin.com/v2";

/// Configuration for the LinkedIn publisher.
#[derive(Clone)]
pub struct LinkedinConfig {
    /// OAuth access token with `w_member_social` and `openid` scopes.
    pub access_token: Option<String>,

    /// API base URL, including the version segment. Overridable for tests.
    pub api_url: String,

    /// Optional title attached to the shared media.
    pub media_title: Option<String>,

    /// Optional description attached to the shared media.
    pub media_description: Option<String>,

    /// Member network visibility of created posts.
    pub visibility: String,
}

impl std::fmt::Debug for LinkedinConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedinConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_url", &self.api_url)
            .field("media_title", &self.media_title)
            .field("media_description", &self.media_description)
            .field("visibility", &self.visibility)
            .finish()
    }
}

impl Default for LinkedinConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkedinConfig {
    pub fn new() -> Self {
        Self {
            access_token: None,
            api_url: DEFAULT_API_URL.to_owned(),
            media_title: None,
            media_description: None,
            visibility: "PUBLIC".to_owned(),
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
    pub fn with_media_title(mut self, title: impl Into<String>) -> Self {
        self.media_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_media_description(mut self, description: impl Into<String>) -> Self {
        self.media_description = Some(description.into());
        self
    }

    /// Set post visibility, e.g. `PUBLIC` or `CONNECTIONS`.
    #[must_use]
    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = visibility.into();
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url.trim_end_matches('/'))
    }
}
