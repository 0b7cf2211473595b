use crier_publisher::PublishError;
use thiserror::Error;

/// Errors that can occur while staging, hosting or removing media.
#[derive(Debug, Error)]
pub enum MediaError {
    /// An HTTP-level transport error occurred while fetching media.
    #[error("Error HTTP: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote server answered a download with a non-success status.
    #[error("Error descargando archivo: {0}")]
    Download(String),

    /// Local filesystem error.
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// The media exceeds the configured size limit.
    #[error("El archivo es demasiado grande: {size} bytes, máximo permitido {limit} bytes")]
    TooLarge {
        /// Actual (or observed so far) size.
        size: u64,
        /// Maximum allowed size.
        limit: u64,
    },

    /// No body bytes arrived for longer than the stall timeout.
    #[error("La descarga se detuvo durante más de {0:?}")]
    Stalled(std::time::Duration),

    /// The media is neither an accepted image nor an accepted video.
    #[error("El archivo debe ser una imagen o video válido ({0})")]
    InvalidContentType(String),

    /// The media host rejected or failed an operation.
    #[error("Error del host de medios: {0}")]
    Host(String),
}

impl From<MediaError> for PublishError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Http(e) => PublishError::from(e),
            MediaError::Io(e) => PublishError::Io(e.to_string()),
            MediaError::Stalled(_) => PublishError::Timeout(err.to_string()),
            MediaError::Download(_) | MediaError::Host(_) => PublishError::Api(err.to_string()),
            MediaError::TooLarge { .. } | MediaError::InvalidContentType(_) => {
                PublishError::InvalidMedia(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_maps_to_invalid_media() {
        let err: PublishError = MediaError::TooLarge { size: 10, limit: 5 }.into();
        assert!(matches!(err, PublishError::InvalidMedia(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn io_maps_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PublishError = MediaError::Io(io).into();
        assert!(matches!(err, PublishError::Io(_)));
    }

    #[test]
    fn stall_is_a_retryable_timeout() {
        let err: PublishError = MediaError::Stalled(std::time::Duration::from_secs(30)).into();
        assert!(matches!(err, PublishError::Timeout(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn download_message_keeps_status() {
        let err = MediaError::Download("404 Not Found".into());
        assert_eq!(err.to_string(), "Error descargando archivo: 404 Not Found");
        let publish: PublishError = err.into();
        assert_eq!(publish.to_string(), "Error descargando archivo: 404 Not Found");
    }
}
