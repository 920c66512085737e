//! Model provider abstraction.
//!
//! The ask handler only needs one capability from a provider: given an API
//! key, a model identifier and an ordered transcript, produce text or fail.
//! `gemini` talks to the real REST API; `mock` is a scripted stand-in.

pub mod gemini;
pub mod mock;

use crate::models::ConversationTurn;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Gemini API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Response was blocked due to {0}")]
    Blocked(String),

    #[error("Candidate was blocked due to {0}")]
    ContentFiltered(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    Other,
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text; `None` when the model returned no text parts.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    pub finish_reason: FinishReason,
}

/// One generation call.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub contents: &'a [ConversationTurn],
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn generate(&self, request: ChatRequest<'_>) -> Result<ProviderResponse, ProviderError>;
}
