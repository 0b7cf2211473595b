use thiserror::Error;

/// Errors raised while validating core domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The platform name does not match any known social network.
    #[error("Plataforma no soportada: {0}")]
    UnknownPlatform(String),

    /// A publish request failed validation.
    #[error("Solicitud inválida: {0}")]
    InvalidRequest(String),

    /// A serialized outcome violated the success/error exclusivity rule.
    #[error("Resultado inválido: {0}")]
    InvalidOutcome(String),
}
