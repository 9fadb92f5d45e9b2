use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;

use crate::{clipboard::ClipboardError, models::{Notice, ParameterKey}};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("'{value}' is not a {key} option")]
    UnknownOption { key: ParameterKey, value: String },
    #[error("unknown prompt category: {0}")]
    UnknownCategory(String),
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("topic is empty")]
    EmptyTopic,
    #[error("a generation is already in flight")]
    InFlight,
    #[error("text generation failed: {0}")]
    GenerationFailed(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("session is still loading")]
    SessionLoading,
    #[error("not signed in")]
    SignedOut,
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error("{0} not found")]
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::SessionLoading => StatusCode::SERVICE_UNAVAILABLE,
            Self::SignedOut => StatusCode::UNAUTHORIZED,
            Self::Parameter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Generation(GenerationError::EmptyTopic) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Generation(GenerationError::InFlight) => StatusCode::CONFLICT,
            Self::Generation(GenerationError::GenerationFailed(_)) => StatusCode::BAD_GATEWAY,
            Self::Clipboard(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// The toast the UI shows for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            Self::SessionLoading => Notice::destructive("Loading...", "Your session is still being resolved"),
            Self::SignedOut => Notice::destructive("Sign in required", "Please sign in to start generating creative prompts"),
            Self::Parameter(e) => Notice::destructive("Invalid selection", e.to_string()),
            Self::Generation(GenerationError::EmptyTopic) => Notice::destructive("Topic required", "Please enter a topic for your prompt"),
            Self::Generation(GenerationError::InFlight) => Notice::destructive("Already generating", "Please wait for the current prompt to finish"),
            Self::Generation(GenerationError::GenerationFailed(_)) => Notice::destructive("Generation failed", "Failed to generate prompt. Please try again."),
            Self::Clipboard(_) => Notice::destructive("Error", "Failed to copy to clipboard"),
            Self::NotFound(what) => Notice::destructive("Not found", format!("{what} does not exist")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.notice())).into_response()
    }
}
