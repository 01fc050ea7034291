//! Transport to the hosted model.
//!
//! [`CompletionBackend`] is the seam between the solver and the network: the
//! solver builds a [`SolveRequest`], a backend delivers it and hands back the
//! raw response text. [`GeminiClient`] talks to Google Gemini through the `llm`
//! crate.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, StructuredOutputFormat};

use super::response::AiError;

/// Everything sent to the model for one solve.
#[derive(Clone, Debug)]
pub struct SolveRequest {
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// The user's question as typed.
    pub prompt: String,
    /// Fixed system instruction.
    pub system: &'static str,
    /// Structured output contract for the reply.
    pub schema: serde_json::Value,
}

/// Delivers a [`SolveRequest`] and returns the response text, if any.
pub trait CompletionBackend: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: &'a SolveRequest,
    ) -> LocalBoxFuture<'a, Result<Option<String>, AiError>>;
}

/// Google Gemini backend.
pub struct GeminiClient {
    api_key: String,
}

impl GeminiClient {
    /// Create a client. An empty key is allowed; requests will then fail and
    /// surface as the usual error response.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Check if an API key is configured.
    pub fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl CompletionBackend for GeminiClient {
    fn complete<'a>(
        &'a self,
        request: &'a SolveRequest,
    ) -> LocalBoxFuture<'a, Result<Option<String>, AiError>> {
        async move {
            let schema: StructuredOutputFormat = serde_json::from_value(request.schema.clone())
                .map_err(|e| AiError::Request(format!("invalid response schema: {}", e)))?;

            let llm = LLMBuilder::new()
                .backend(LLMBackend::Google)
                .api_key(self.api_key.clone())
                .model(request.model.clone())
                .system(request.system)
                .schema(schema)
                .build()
                .map_err(|e| AiError::Request(e.to_string()))?;

            let messages = vec![ChatMessage::user().content(request.prompt.clone()).build()];
            let response = llm
                .chat(&messages)
                .await
                .map_err(|e| AiError::Transport(e.to_string()))?;

            Ok(response.text())
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_follows_key() {
        assert!(!GeminiClient::new("").is_available());
        assert!(GeminiClient::new("secret").is_available());
    }
}
