//! Answers from the AI solver and the ways a solve can fail.

use serde::Deserialize;
use thiserror::Error;

/// Result value that marks a failed or rejected solve.
pub const ERROR_RESULT: &str = "Error";

/// Explanation shown when the AI service could not be reached or understood.
pub const CONNECTION_FAILURE: &str =
    "Failed to connect to AI service. Please check your connection or API key.";

/// The structured answer returned by the model.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AiResponse {
    /// The final answer, or [`ERROR_RESULT`].
    pub result: String,
    /// Short explanation of the answer, or of what went wrong.
    pub explanation: String,
}

impl AiResponse {
    /// The sentinel response for any failure to get an answer.
    pub fn connection_failure() -> Self {
        Self {
            result: ERROR_RESULT.to_string(),
            explanation: CONNECTION_FAILURE.to_string(),
        }
    }

    /// Check if this response signals an error, either ours or the model's.
    pub fn is_error(&self) -> bool {
        self.result == ERROR_RESULT
    }
}

/// Why a solve produced no answer.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("failed to build AI request: {0}")]
    Request(String),
    #[error("AI service request failed: {0}")]
    Transport(String),
    #[error("AI service returned no text")]
    EmptyResponse,
    #[error("malformed AI response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("AI request panicked: {0}")]
    Panicked(String),
    #[error("AI worker stopped")]
    WorkerStopped,
}

/// Outcome of a solve. Failures carry their cause but always map to the
/// sentinel [`AiResponse`], so callers never need a separate error path.
#[derive(Debug)]
pub enum SolveOutcome {
    /// The service answered. The model may still have set `result` to
    /// [`ERROR_RESULT`] when the prompt was not a math problem.
    Answered(AiResponse),
    /// The request could not be made or the reply could not be read.
    Failed(AiError),
}

impl SolveOutcome {
    /// The response to show the user.
    pub fn into_response(self) -> AiResponse {
        match self {
            Self::Answered(response) => response,
            Self::Failed(_) => AiResponse::connection_failure(),
        }
    }

    /// Check if this outcome is an actual answer worth recording.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Answered(response) if !response.is_error())
    }
}
