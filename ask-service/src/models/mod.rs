//! Wire types for the ask endpoint.

pub mod conversation;

pub use conversation::{AskInput, AskReply, AskRequest, ConversationTurn, Part, Role};
