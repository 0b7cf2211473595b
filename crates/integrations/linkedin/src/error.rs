use crier_publisher::PublishError;
use thiserror::Error;

/// Errors specific to the LinkedIn publisher.
///
/// These are internal errors that get converted into [`PublishError`] at the
/// publisher boundary.
#[derive(Debug, Error)]
pub enum LinkedinError {
    /// The access token is not configured.
    #[error("Token no configurado")]
    MissingToken,

    /// The staged media is not a public URL.
    #[error("LinkedIn requiere una URL pública de la imagen")]
    NotAUrl,

    /// A step answered 2xx with a body the protocol cannot use.
    #[error("{step}: {detail}")]
    UnexpectedBody { step: &'static str, detail: String },

    /// Post creation succeeded without returning an id.
    #[error("LinkedIn no devolvió un id de publicación")]
    MissingPostId,
}

impl From<LinkedinError> for PublishError {
    fn from(err: LinkedinError) -> Self {
        match err {
            LinkedinError::MissingToken => PublishError::Configuration(err.to_string()),
            LinkedinError::NotAUrl => PublishError::InvalidMedia(err.to_string()),
            LinkedinError::UnexpectedBody { .. } | LinkedinError::MissingPostId => {
                PublishError::InvalidResponse(err.to_string())
            }
        }
    }
}
