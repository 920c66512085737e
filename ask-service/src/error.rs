use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every way a call to the ask endpoint can fail.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Server-side API key is not configured.")]
    MissingApiKey,

    #[error("Missing prompt or context.")]
    MissingInput,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("No response from model.")]
    EmptyReply,

    #[error("An error occurred: chatHistory is not iterable")]
    MissingHistory,

    // The upstream message reaches the client verbatim.
    #[error("An error occurred: {0}")]
    Upstream(#[from] ProviderError),
}

impl AskError {
    pub fn status(&self) -> StatusCode {
        match self {
            AskError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AskError::MissingInput | AskError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AskError::MissingApiKey
            | AskError::EmptyReply
            | AskError::MissingHistory
            | AskError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum ErrorBody {
    Message(String),
    Error(String),
}

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AskError::MethodNotAllowed => ErrorBody::Message(self.to_string()),
            _ => ErrorBody::Error(self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
