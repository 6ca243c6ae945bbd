//! Error types for the cover service.

use thiserror::Error;

/// Result type alias using CoverError.
pub type CoverResult<T> = Result<T, CoverError>;

/// Primary error type for cover operations.
#[derive(Debug, Error)]
pub enum CoverError {
    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Unknown emoji: {0}")]
    UnknownEmoji(String),

    #[error("Unknown chess opening: {0}")]
    UnknownOpening(String),

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    // === Rendering Errors ===
    #[error("Font error: {0}")]
    FontError(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("PNG encoding failed: {0}")]
    EncodeError(String),

    // === Storage Errors ===
    #[error("Cache error: {0}")]
    CacheError(String),

    // === Map Provider Errors ===
    #[error("Map provider not configured: {0}")]
    MapNotConfigured(String),

    #[error("Map provider request failed: {0}")]
    UpstreamError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl CoverError {
    /// Shorthand for an invalid parameter error.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        CoverError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            CoverError::InvalidParameter { .. } | CoverError::InvalidFen(_) => 400,

            CoverError::UnknownEmoji(_) | CoverError::UnknownOpening(_) => 404,

            CoverError::UpstreamError(_) => 502,
            CoverError::MapNotConfigured(_) => 503,

            _ => 500,
        }
    }
}
