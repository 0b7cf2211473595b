use crier_publisher::PublishError;
use thiserror::Error;

/// Errors specific to the Instagram publisher.
///
/// These are internal errors that get converted into [`PublishError`] at the
/// publisher boundary.
#[derive(Debug, Error)]
pub enum InstagramError {
    /// The access token or account id is not configured.
    #[error("Token o Account ID no configurado")]
    MissingCredentials,

    /// The staged media is not a public URL.
    #[error("Instagram requiere una URL pública de la imagen")]
    NotAUrl,

    /// Container creation answered 2xx without a container id.
    #[error("Instagram no devolvió un id de contenedor")]
    MissingContainerId,

    /// Publishing answered 2xx without a media id.
    #[error("Instagram no devolvió un id de publicación")]
    MissingMediaId,

    /// Instagram gave up processing the container.
    #[error("El contenedor {container_id} de Instagram está en estado {status}")]
    ContainerFailed {
        container_id: String,
        status: String,
    },

    /// The container never reached `FINISHED` within the polling budget.
    #[error("El contenedor {container_id} de Instagram no está listo tras {attempts} consultas")]
    ContainerNotReady { container_id: String, attempts: u32 },
}

impl From<InstagramError> for PublishError {
    fn from(err: InstagramError) -> Self {
        match err {
            InstagramError::MissingCredentials => PublishError::Configuration(err.to_string()),
            InstagramError::NotAUrl => PublishError::InvalidMedia(err.to_string()),
            InstagramError::MissingContainerId | InstagramError::MissingMediaId => {
                PublishError::InvalidResponse(err.to_string())
            }
            InstagramError::ContainerFailed { .. } => PublishError::Api(err.to_string()),
            InstagramError::ContainerNotReady { .. } => PublishError::Timeout(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_message() {
        let err: PublishError = InstagramError::MissingCredentials.into();
        assert_eq!(err.to_string(), "Token o Account ID no configurado");
    }

    #[test]
    fn not_ready_is_timeout_class() {
        let err: PublishError = InstagramError::ContainerNotReady {
            container_id: "c1".into(),
            attempts: 20,
        }
        .into();
        assert!(matches!(err, PublishError::Timeout(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn container_failure_names_status() {
        let err: PublishError = InstagramError::ContainerFailed {
            container_id: "c1".into(),
            status: "ERROR".into(),
        }
        .into();
        assert_eq!(err.to_string(), "El contenedor c1 de Instagram está en estado ERROR");
    }
}
