//! The free-text solver panel: prompt text, the request in flight, and the
//! last answer.

use crate::history::{HistoryKind, SharedHistory};

use super::response::{AiError, AiResponse, SolveOutcome};
use super::worker::{SolveDone, SolveJob};

/// State of the AI input surface. Only one request may be outstanding.
pub struct AiSession {
    input: String,
    /// Prompt of the request in flight.
    pending: Option<String>,
    response: Option<AiResponse>,
    history: SharedHistory,
}

impl AiSession {
    pub fn new(history: SharedHistory) -> Self {
        Self {
            input: String::new(),
            pending: None,
            response: None,
            history,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn response(&self) -> Option<&AiResponse> {
        self.response.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Check if a submit would currently be accepted.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && !self.input.trim().is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn insert_newline(&mut self) {
        self.input.push('\n');
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Start a solve for the current prompt.
    ///
    /// Returns `None` for a blank prompt or while another request is pending.
    pub fn submit(&mut self) -> Option<SolveJob> {
        if !self.can_submit() {
            return None;
        }

        let prompt = self.input.clone();
        self.pending = Some(prompt.clone());
        self.response = None;
        Some(SolveJob { prompt })
    }

    /// Show a finished solve and record it in history when it produced an answer.
    pub fn complete(&mut self, done: SolveDone) {
        self.pending = None;

        let response = done.outcome.into_response();
        if response.is_error() {
            tracing::warn!(explanation = %response.explanation, "Solve returned an error");
        } else {
            self.history.borrow_mut().record(
                done.prompt.trim(),
                response.result.clone(),
                HistoryKind::Ai,
            );
        }
        self.response = Some(response);
    }

    /// Fail the request in flight, if any, without waiting for it.
    pub fn abandon(&mut self, error: AiError) {
        let Some(prompt) = self.pending.take() else {
            return;
        };
        tracing::error!("Abandoning solve: {}", error);
        self.complete(SolveDone {
            prompt,
            outcome: SolveOutcome::Failed(error),
        });
    }

    /// Clear the prompt and the shown answer. A pending request keeps running.
    pub fn erase(&mut self) {
        self.input.clear();
        self.response = None;
    }
}
