use serde::{Deserialize, Serialize};

/// Form body of `POST /{ig-user-id}/media`.
#[derive(Debug, Serialize)]
pub struct CreateContainerRequest<'a> {
    pub caption: &'a str,
    pub access_token: &'a str,
    pub image_url: &'a str,
}

/// Form body of `POST /{ig-user-id}/media_publish`.
#[derive(Debug, Serialize)]
pub struct PublishContainerRequest<'a> {
    pub access_token: &'a str,
    pub creation_id: &'a str,
}

/// Query of `GET /{container-id}`.
#[derive(Debug, Serialize)]
pub struct ContainerStatusQuery<'a> {
    pub fields: &'a str,
    pub access_token: &'a str,
}

/// `{ "id": ... }` returned by both phases.
#[derive(Debug, Default, Deserialize)]
pub struct IdResponse {
    pub id: Option<String>,
}

impl IdResponse {
    pub fn into_id(self) -> Option<String> {
        self.id.filter(|id| !id.is_empty())
    }
}

/// Processing state of a media container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerStatus {
    Finished,
    InProgress,
    Published,
    Error,
    Expired,
    #[serde(other)]
    Unknown,
}

impl ContainerStatus {
    /// Whether the container can be published now.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Whether the container will never become publishable.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::Error | Self::Expired | Self::Published)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "FINISHED",
            Self::InProgress => "IN_PROGRESS",
            Self::Published => "PUBLISHED",
            Self::Error => "ERROR",
            Self::Expired => "EXPIRED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// `GET /{container-id}?fields=status_code` response.
#[derive(Debug, Deserialize)]
pub struct ContainerStatusResponse {
    pub status_code: Option<ContainerStatus>,
}
