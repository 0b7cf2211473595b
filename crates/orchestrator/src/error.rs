use crier_publisher::PublishError;
use thiserror::Error;

/// Errors raised by the orchestrator itself.
///
/// Publish failures are never errors at this level: they come back as a
/// failed [`PublishReceipt`](crate::PublishReceipt).
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// No publisher is registered for the platform, or the name is unknown.
    #[error("Plataforma no soportada: {0}")]
    UnsupportedPlatform(String),

    /// The orchestrator was misconfigured (e.g. missing media stager).
    #[error("Error de configuración: {0}")]
    Configuration(String),

    /// The background queue stopped before the job finished.
    #[error("La cola de publicación está cerrada")]
    QueueClosed,
}

impl From<PublishError> for OrchestratorError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::UnsupportedPlatform(name) => Self::UnsupportedPlatform(name),
            other => Self::Configuration(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_message() {
        let err: OrchestratorError = PublishError::UnsupportedPlatform("twitter".into()).into();
        let msg = err.to_string();
        assert!(msg.contains("twitter"));
        assert!(msg.contains("no soportada"));
    }
}
