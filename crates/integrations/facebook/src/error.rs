use crier_publisher::PublishError;
use thiserror::Error;

/// Errors specific to the Facebook publisher.
///
/// These are internal errors that get converted into [`PublishError`] at the
/// publisher boundary.
#[derive(Debug, Error)]
pub enum FacebookError {
    /// The page token or page id is not configured.
    #[error("Token o Page ID no configurado")]
    MissingCredentials,

    /// The staged media is not a public URL.
    #[error("Facebook requiere una URL pública de la imagen")]
    NotAUrl,

    /// The Graph API answered 2xx without an `id` or `post_id`.
    #[error("Facebook no devolvió un id de publicación")]
    MissingPostId,
}

impl From<FacebookError> for PublishError {
    fn from(err: FacebookError) -> Self {
        match err {
            FacebookError::MissingCredentials => PublishError::Configuration(err.to_string()),
            FacebookError::NotAUrl => PublishError::InvalidMedia(err.to_string()),
            FacebookError::MissingPostId => PublishError::InvalidResponse(err.to_string()),
        }
    }
}
