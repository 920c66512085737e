use crate::error::AskError;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Speaker of a conversation turn, as the model API names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One role-tagged unit of conversation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::with_role(Role::Model, text)
    }

    fn with_role(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Body of `POST /api/ask`.
///
/// `chat_history` is only optional at the parsing stage: a missing history is
/// reported after the `prompt`/`context` check, not instead of it.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    #[serde(default, deserialize_with = "falsy_as_missing")]
    #[validate(required, length(min = 1))]
    pub prompt: Option<String>,

    #[serde(default)]
    pub chat_history: Option<Vec<ConversationTurn>>,

    #[serde(default, deserialize_with = "falsy_as_missing")]
    #[validate(required, length(min = 1))]
    pub context: Option<String>,
}

/// `null`, `false` and `0` count as absent. Any other non-string is rejected.
fn falsy_as_missing<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        other => Err(de::Error::custom(format!(
            "invalid type: {}, expected a string",
            other
        ))),
    }
}

impl AskRequest {
    /// Parse a raw request body. An empty body reads as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, AskError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body).map_err(|e| AskError::InvalidBody(e.to_string()))
    }

    /// Enforce the presence of `prompt` and `context`, then of `chatHistory`.
    pub fn into_input(self) -> Result<AskInput, AskError> {
        self.validate().map_err(|_| AskError::MissingInput)?;

        let (Some(prompt), Some(context)) = (self.prompt, self.context) else {
            return Err(AskError::MissingInput);
        };
        let chat_history = self.chat_history.ok_or(AskError::MissingHistory)?;

        Ok(AskInput {
            prompt,
            context,
            chat_history,
        })
    }
}

/// A request whose required fields are known to be present.
#[derive(Debug, Clone)]
pub struct AskInput {
    pub prompt: String,
    pub context: String,
    pub chat_history: Vec<ConversationTurn>,
}

impl AskInput {
    /// Ordered transcript: context, then history as given, then the prompt.
    pub fn into_transcript(self) -> Vec<ConversationTurn> {
        let mut contents = Vec::with_capacity(self.chat_history.len() + 2);
        contents.push(ConversationTurn::user(self.context));
        contents.extend(self.chat_history);
        contents.push(ConversationTurn::user(self.prompt));
        contents
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskReply {
    pub reply: String,
}
