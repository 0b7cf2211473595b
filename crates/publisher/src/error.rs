use crier_core::CoreError;
use thiserror::Error;

/// Errors that can occur while publishing to a platform.
///
/// Publishers never surface these to callers directly: the
/// [`DynPublisher`](crate::DynPublisher) boundary turns them into a failed
/// [`PublishOutcome`](crier_core::PublishOutcome) whose error string is the
/// `Display` of the variant. `Configuration` and `Api` display their message
/// verbatim so upstream text reaches the caller untouched.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A required credential or identifier is missing.
    #[error("{0}")]
    Configuration(String),

    /// The platform answered with an error status or error payload.
    #[error("{0}")]
    Api(String),

    /// A network or transport-level error occurred.
    #[error("Error de conexión: {0}")]
    Connection(String),

    /// A network call did not complete within its bounded wait.
    #[error("Tiempo de espera agotado: {0}")]
    Timeout(String),

    /// The platform answered 2xx but the body lacked what the protocol needs.
    #[error("Respuesta inválida: {0}")]
    InvalidResponse(String),

    /// The media could not be read or does not fit the protocol.
    #[error("{0}")]
    InvalidMedia(String),

    /// The request failed validation before any network call.
    #[error("{0}")]
    InvalidRequest(String),

    /// Local filesystem error while reading or staging media.
    #[error("Error de E/S: {0}")]
    Io(String),

    /// The platform rejected the request due to rate limiting.
    #[error("Límite de solicitudes excedido")]
    RateLimited,

    /// No publisher is registered for the requested platform.
    #[error("Plataforma no soportada: {0}")]
    UnsupportedPlatform(String),
}

impl PublishError {
    /// Returns `true` if the error is transient and a later attempt may
    /// succeed. Nothing in the publish core retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Connection(_) | Self::RateLimited
        )
    }
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

impl From<std::io::Error> for PublishError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<CoreError> for PublishError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownPlatform(name) => Self::UnsupportedPlatform(name),
            CoreError::InvalidRequest(msg) => Self::InvalidRequest(msg),
            CoreError::InvalidOutcome(msg) => Self::InvalidResponse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(PublishError::Timeout("5s".into()).is_retryable());
        assert!(PublishError::Connection("reset".into()).is_retryable());
        assert!(PublishError::RateLimited.is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!PublishError::Configuration("x".into()).is_retryable());
        assert!(!PublishError::Api("x".into()).is_retryable());
        assert!(!PublishError::UnsupportedPlatform("x".into()).is_retryable());
        assert!(!PublishError::Io("x".into()).is_retryable());
    }

    #[test]
    fn configuration_and_api_display_verbatim() {
        assert_eq!(
            PublishError::Configuration("Token no configurado".into()).to_string(),
            "Token no configurado"
        );
        assert_eq!(
            PublishError::Api("Invalid OAuth access token.".into()).to_string(),
            "Invalid OAuth access token."
        );
    }

    #[test]
    fn transport_errors_carry_spanish_prefixes() {
        assert_eq!(
            PublishError::Connection("reset".into()).to_string(),
            "Error de conexión: reset"
        );
        assert_eq!(
            PublishError::Timeout("30s".into()).to_string(),
            "Tiempo de espera agotado: 30s"
        );
        assert_eq!(
            PublishError::InvalidResponse("not json".into()).to_string(),
            "Respuesta inválida: not json"
        );
        assert_eq!(PublishError::Io("disk".into()).to_string(), "Error de E/S: disk");
        assert_eq!(
            PublishError::RateLimited.to_string(),
            "Límite de solicitudes excedido"
        );
    }

    #[test]
    fn unsupported_platform_names_the_value() {
        let err = PublishError::UnsupportedPlatform("twitter".into());
        assert_eq!(err.to_string(), "Plataforma no soportada: twitter");
    }

    #[test]
    fn core_unknown_platform_maps_to_unsupported() {
        let err: PublishError = CoreError::UnknownPlatform("myspace".into()).into();
        assert!(matches!(err, PublishError::UnsupportedPlatform(ref name) if name == "myspace"));
    }
}
