use crier_publisher::PublishError;
use thiserror::Error;

/// Errors specific to the TikTok publisher.
///
/// These are internal errors that get converted into [`PublishError`] at the
/// publisher boundary.
#[derive(Debug, Error)]
pub enum TiktokError {
    /// The access token is not configured.
    #[error("Token no configurado")]
    MissingToken,

    /// The local video does not exist.
    #[error("Archivo de video no encontrado")]
    VideoNotFound,

    /// The local video has no bytes to send.
    #[error("El archivo de video está vacío")]
    EmptyVideo,

    /// The API reported an error code other than `ok`.
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    /// Init succeeded without an upload URL.
    #[error("No se recibió upload_url de TikTok")]
    MissingUploadUrl,

    /// Init succeeded without a publish id.
    #[error("No se recibió publish_id de TikTok")]
    MissingPublishId,

    /// The byte upload was rejected.
    #[error("Error al subir archivo: {0}")]
    Upload(u16),
}

impl From<TiktokError> for PublishError {
    fn from(err: TiktokError) -> Self {
        match err {
            TiktokError::MissingToken => PublishError::Configuration(err.to_string()),
            TiktokError::VideoNotFound | TiktokError::EmptyVideo => {
                PublishError::InvalidMedia(err.to_string())
            }
            TiktokError::Api { ref code, .. } if code == "rate_limit_exceeded" => {
                PublishError::RateLimited
            }
            TiktokError::Api { .. }
            | TiktokError::MissingUploadUrl
            | TiktokError::MissingPublishId
            | TiktokError::Upload(_) => PublishError::Api(err.to_string()),
        }
    }
}
