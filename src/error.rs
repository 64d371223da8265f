//! Error type for the quizgen library.
//!
//! A single [`QuizError`] covers every failure in the request path. There is
//! no partial-success mode: any error aborts the current request and is
//! translated to an HTTP status at the server boundary via
//! [`QuizError::status_code`].
//!
//! Client mistakes (bad input, unreadable PDF) map to `400`; everything else
//! (provider failures, rendering, startup problems) maps to `500`.

use axum::http::StatusCode;
use thiserror::Error;

/// All errors returned by the quizgen library.
#[derive(Debug, Error)]
pub enum QuizError {
    // ── Client errors ─────────────────────────────────────────────────────
    /// Request input failed validation (empty text, non-positive count,
    /// malformed body).
    #[error("{0}")]
    Validation(String),

    /// The uploaded PDF could not be parsed or contains no readable text.
    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The completion provider failed (network, authentication, malformed
    /// response).
    #[error("LLM completion failed: {message}")]
    Completion { message: String },

    /// The provider's API key environment variable is not set.
    #[error("{var} is not set. Please add it to your environment variables (provider '{provider}').")]
    MissingCredential { var: String, provider: String },

    /// The provider could not be constructed.
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The quiz document could not be serialised.
    #[error("Failed to render quiz document: {0}")]
    Render(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuizError {
    /// HTTP status the server reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuizError::Validation(_) | QuizError::Extraction(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build a [`QuizError::Completion`] from any displayable provider error.
    pub fn completion(err: impl std::fmt::Display) -> Self {
        QuizError::Completion {
            message: err.to_string(),
        }
    }
}
