use crier_core::limits::INSTAGRAM_CAPTION;
use crier_core::{MediaRequirement, Platform, StagedMedia, truncate_chars};
use crier_publisher::http::{DEFAULT_TIMEOUT, JsonResponse, build_client};
use crier_publisher::{PublishError, Publisher};
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::{ContainerWait, InstagramConfig};
use crate::error::InstagramError;
use crate::types::{
    ContainerStatus, ContainerStatusQuery, ContainerStatusResponse, CreateContainerRequest,
    IdResponse, PublishContainerRequest,
};

/// Publishes a captioned image to an Instagram business account.
///
/// Issues exactly one container-create call and, once the container is
/// ready, exactly one publish call referencing it. Nothing after a failed
/// step is attempted.
pub struct InstagramPublisher {
    config: InstagramConfig,
    client: Client,
}

impl InstagramPublisher {
    pub fn new(config: InstagramConfig) -> Self {
        Self::with_client(config, build_client(DEFAULT_TIMEOUT))
    }

    pub fn with_client(config: InstagramConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn credentials(&self) -> Result<(&str, &str), InstagramError> {
        let token = self.config.access_token.as_deref().filter(|t| !t.is_empty());
        let account = self.config.account_id.as_deref().filter(|a| !a.is_empty());
        token.zip(account).ok_or(InstagramError::MissingCredentials)
    }

    async fn create_container(
        &self,
        token: &str,
        account_id: &str,
        caption: &str,
        image_url: &str,
    ) -> Result<String, PublishError> {
        debug!("creating media container (step 1/2)");
        let response = self
            .client
            .post(self.config.media_url(account_id))
            .form(&CreateContainerRequest {
                caption,
                access_token: token,
                image_url,
            })
            .send()
            .await?;
        let response = JsonResponse::read(response).await?;
        if !response.is_success() {
            return Err(response.into_error("Error en paso 1"));
        }

        let body: IdResponse = serde_json::from_value(response.body).unwrap_or_default();
        let container_id = body.into_id().ok_or(InstagramError::MissingContainerId)?;
        info!(%container_id, "media container created");
        Ok(container_id)
    }

    async fn container_status(
        &self,
        token: &str,
        container_id: &str,
    ) -> Result<ContainerStatus, PublishError> {
        let response = self
            .client
            .get(self.config.container_url(container_id))
            .query(&ContainerStatusQuery {
                fields: "status_code",
                access_token: token,
            })
            .send()
            .await?;
        let response = JsonResponse::read(response).await?;
        if !response.is_success() {
            return Err(response.into_error("Error consultando el contenedor"));
        }

        let body: ContainerStatusResponse = serde_json::from_value(response.body)
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;
        Ok(body.status_code.unwrap_or(ContainerStatus::Unknown))
    }

    async fn wait_until_ready(&self, token: &str, container_id: &str) -> Result<(), PublishError> {
        match self.config.wait {
            ContainerWait::Fixed { delay } => {
                debug!(?delay, "waiting for container to settle");
                tokio::time::sleep(delay).await;
                Ok(())
            }
            ContainerWait::Poll {
                interval,
                max_attempts,
            } => {
                // At least one check, so a zero budget cannot skip publishing.
                let max_attempts = max_attempts.max(1);
                for attempt in 1..=max_attempts {
                    let status = self.container_status(token, container_id).await?;
                    if status.is_ready() {
                        debug!(attempt, "container ready");
                        return Ok(());
                    }
                    if status.is_terminal_failure() {
                        return Err(InstagramError::ContainerFailed {
                            container_id: container_id.to_owned(),
                            status: status.as_str().to_owned(),
                        }
                        .into());
                    }
                    debug!(attempt, status = status.as_str(), "container not ready yet");
                    if attempt < max_attempts {
                        tokio::time::sleep(interval).await;
                    }
                }
                Err(InstagramError::ContainerNotReady {
                    container_id: container_id.to_owned(),
                    attempts: max_attempts,
                }
                .into())
            }
        }
    }

    async fn publish_container(
        &self,
        token: &str,
        account_id: &str,
        container_id: &str,
    ) -> Result<String, PublishError> {
        debug!(%container_id, "publishing media container (step 2/2)");
        let response = self
            .client
            .post(self.config.media_publish_url(account_id))
            .form(&PublishContainerRequest {
                access_token: token,
                creation_id: container_id,
            })
            .send()
            .await?;
        let response = JsonResponse::read(response).await?;
        if !response.is_success() {
            return Err(response.into_error("Error en paso 2"));
        }

        let body: IdResponse = serde_json::from_value(response.body).unwrap_or_default();
        Ok(body.into_id().ok_or(InstagramError::MissingMediaId)?)
    }
}

impl Publisher for InstagramPublisher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn media_requirement(&self) -> MediaRequirement {
        MediaRequirement::PublicUrl
    }

    #[instrument(skip(self, caption, media), fields(platform = "instagram"))]
    async fn try_publish(&self, caption: &str, media: &StagedMedia) -> Result<String, PublishError> {
        let (token, account_id) = self.credentials()?;
        let image_url = media.location.as_url().ok_or(InstagramError::NotAUrl)?;
        let caption = truncate_chars(caption, INSTAGRAM_CAPTION);

        let container_id = self
            .create_container(token, account_id, caption, image_url)
            .await?;
        self.wait_until_ready(token, &container_id).await?;
        self.publish_container(token, account_id, &container_id)
            .await
    }
}
