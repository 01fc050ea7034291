//! The AI solver: one prompt in, one answer out.

use std::sync::Arc;

use serde_json::json;

use super::backend::{CompletionBackend, SolveRequest};
use super::response::{AiError, AiResponse, SolveOutcome};

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Instruction sent with every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are an advanced mathematical assistant. \
Your goal is to solve the user's math problem, whether it is a simple arithmetic expression, \
a word problem, or a complex equation. Always prioritize accuracy. Provide the final result \
and a brief, clear explanation of how you arrived at it. Respond with a JSON object with the \
string fields \"result\" and \"explanation\". If the input is not a math problem, politely ask \
for a math problem in the explanation and set result to \"Error\".";

/// Structured output contract: an object with required string fields
/// `result` and `explanation`.
pub fn response_schema() -> serde_json::Value {
    json!({
        "name": "math_solution",
        "description": "The answer to a math problem and how it was reached.",
        "schema": {
            "type": "object",
            "properties": {
                "result": {
                    "type": "string",
                    "description": "The final numerical or algebraic answer. Keep it concise."
                },
                "explanation": {
                    "type": "string",
                    "description": "A step-by-step explanation of the solution, max 2-3 sentences."
                }
            },
            "required": ["result", "explanation"]
        }
    })
}

/// Turns free-text math questions into structured answers.
///
/// Stateless apart from its backend and model: no retries, no caching.
pub struct AiSolver {
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl AiSolver {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Solve a prompt. Never fails: errors come back as [`SolveOutcome::Failed`].
    pub async fn solve(&self, prompt: &str) -> SolveOutcome {
        let request = SolveRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            system: SYSTEM_INSTRUCTION,
            schema: response_schema(),
        };

        tracing::info!(model = %self.model, "Sending solve request");
        match self.request(&request).await {
            Ok(response) => {
                tracing::debug!(result = %response.result, "Solve answered");
                SolveOutcome::Answered(response)
            }
            Err(e) => {
                tracing::error!("AI solve failed: {}", e);
                SolveOutcome::Failed(e)
            }
        }
    }

    async fn request(&self, request: &SolveRequest) -> Result<AiResponse, AiError> {
        let text = self
            .backend
            .complete(request)
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or(AiError::EmptyResponse)?;

        Ok(serde_json::from_str(&text)?)
    }
}
