//! Error types for gateway calls.

use thiserror::Error;

/// Errors a gateway call can settle with.
///
/// Everything except [`GatewayError::Transient`] is terminal: retrying the
/// same call against the same state fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Mutation targeted an id that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Write attempted on a locked configuration entry
    #[error("configuration is not editable: {0}")]
    NotEditable(String),

    /// Value does not fit the configuration entry's type or options
    #[error("invalid value for {id}: {reason}")]
    InvalidValue { id: String, reason: String },

    /// Create input failed validation
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Generic backend failure, message only
    #[error("{0}")]
    Transient(String),
}

impl GatewayError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        GatewayError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transient(_))
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::NotFound { .. } => "not_found",
            GatewayError::NotEditable(_) => "not_editable",
            GatewayError::InvalidValue { .. } => "invalid_value",
            GatewayError::Validation { .. } => "validation",
            GatewayError::Transient(_) => "transient",
        }
    }
}
