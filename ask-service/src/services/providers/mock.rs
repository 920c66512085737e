//! Mock provider for testing.

use super::{ChatProvider, ChatRequest, FinishReason, ProviderError, ProviderResponse};
use crate::models::ConversationTurn;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    /// A successful call that produced no text.
    Empty,
    /// A network-level failure carrying this message.
    Fail(String),
}

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub api_key: String,
    pub model: String,
    pub contents: Vec<ConversationTurn>,
}

pub struct MockChatProvider {
    reply: MockReply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockChatProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn generate(&self, request: ChatRequest<'_>) -> Result<ProviderResponse, ProviderError> {
        self.calls.lock().await.push(RecordedCall {
            api_key: request.api_key.to_string(),
            model: request.model.to_string(),
            contents: request.contents.to_vec(),
        });

        let text = match &self.reply {
            MockReply::Text(text) => Some(text.clone()),
            MockReply::Empty => None,
            MockReply::Fail(message) => return Err(ProviderError::Network(message.clone())),
        };

        Ok(ProviderResponse {
            output_tokens: text.as_ref().map_or(0, |t| t.len() as i32 / 4),
            text,
            input_tokens: request.contents.len() as i32,
            finish_reason: FinishReason::Complete,
        })
    }
}
