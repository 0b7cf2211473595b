use crier_core::limits::FACEBOOK_CAPTION;
use crier_core::{MediaRequirement, Platform, StagedMedia, truncate_chars};
use crier_publisher::http::{DEFAULT_TIMEOUT, JsonResponse, build_client};
use crier_publisher::{PublishError, Publisher};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::FacebookConfig;
use crate::error::FacebookError;
use crate::types::{PhotoRequest, PhotoResponse};

/// Publishes a captioned photo to a Facebook Page.
pub struct FacebookPublisher {
    config: FacebookConfig,
    client: Client,
}

impl FacebookPublisher {
    /// Create a new Facebook publisher with the given configuration.
    pub fn new(config: FacebookConfig) -> Self {
        Self::with_client(config, build_client(DEFAULT_TIMEOUT))
    }

    /// Create a new Facebook publisher with a custom HTTP client.
    pub fn with_client(config: FacebookConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn credentials(&self) -> Result<(&str, &str), FacebookError> {
        let token = self.config.access_token.as_deref().filter(|t| !t.is_empty());
        let page = self.config.page_id.as_deref().filter(|p| !p.is_empty());
        token.zip(page).ok_or(FacebookError::MissingCredentials)
    }
}

impl Publisher for FacebookPublisher {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    fn media_requirement(&self) -> MediaRequirement {
        MediaRequirement::PublicUrl
    }

    #[instrument(skip(self, caption, media), fields(platform = "facebook"))]
    async fn try_publish(&self, caption: &str, media: &StagedMedia) -> Result<String, PublishError> {
        let (token, page_id) = self.credentials()?;
        let image_url = media.location.as_url().ok_or(FacebookError::NotAUrl)?;

        debug!(page_id, "posting photo to page");
        let response = self
            .client
            .post(self.config.photos_url(page_id))
            .form(&PhotoRequest {
                caption: truncate_chars(caption, FACEBOOK_CAPTION),
                access_token: token,
                url: image_url,
            })
            .send()
            .await?;
        let response = JsonResponse::read(response).await?;

        if !response.is_success() {
            return Err(response.into_error("Error desconocido"));
        }

        let body: PhotoResponse = serde_json::from_value(response.body).unwrap_or_default();
        Ok(body.into_post_id().ok_or(FacebookError::MissingPostId)?)
    }
}
