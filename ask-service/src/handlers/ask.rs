//! `POST /api/ask`: relay a prompt and its conversation to the model.

use crate::error::AskError;
use crate::models::{AskReply, AskRequest};
use crate::services::ChatRequest;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Json};
use secrecy::ExposeSecret;

pub async fn ask(State(state): State<AppState>, body: Bytes) -> Result<Json<AskReply>, AskError> {
    // Must run before the body is looked at.
    let Some(api_key) = state.config.gemini.api_key.as_ref() else {
        tracing::error!("GEMINI_API_KEY environment variable is not set");
        return Err(AskError::MissingApiKey);
    };

    let input = AskRequest::from_body(&body)
        .inspect_err(|e| tracing::debug!(error = %e, "Rejected request body"))?
        .into_input()
        .inspect_err(|e| {
            if let AskError::MissingHistory = e {
                tracing::error!(error = %e, "Request carried no chatHistory");
            }
        })?;

    let contents = input.into_transcript();
    let model = state.config.gemini.model.as_str();

    let response = state
        .provider
        .generate(ChatRequest {
            api_key: api_key.expose_secret(),
            model,
            contents: &contents,
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, model = %model, "Model call failed");
            AskError::Upstream(e)
        })?;

    tracing::info!(
        model = %model,
        turns = contents.len(),
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        finish_reason = ?response.finish_reason,
        "Model call completed"
    );

    match response.text.filter(|text| !text.is_empty()) {
        Some(reply) => Ok(Json(AskReply { reply })),
        None => {
            tracing::warn!(model = %model, "Model returned no text");
            Err(AskError::EmptyReply)
        }
    }
}

/// Fallback for every method other than POST on the ask route.
pub async fn method_not_allowed() -> AskError {
    AskError::MethodNotAllowed
}
