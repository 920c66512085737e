pub mod providers;

pub use providers::{ChatProvider, ChatRequest, ProviderError, ProviderResponse};
