use serde::{Deserialize, Serialize};

/// Form body of `POST /{page-id}/photos`.
#[derive(Debug, Serialize)]
pub struct PhotoRequest<'a> {
    pub caption: &'a str,
    pub access_token: &'a str,
    pub url: &'a str,
}

/// Successful `/{page-id}/photos` response.
#[derive(Debug, Default, Deserialize)]
pub struct PhotoResponse {
    /// Photo id.
    pub id: Option<String>,
    /// Id of the feed post wrapping the photo.
    pub post_id: Option<String>,
}

impl PhotoResponse {
    /// Identifier to report: `id`, falling back to `post_id`.
    pub fn into_post_id(self) -> Option<String> {
        self.id
            .filter(|id| !id.is_empty())
            .or(self.post_id.filter(|id| !id.is_empty()))
    }
}
