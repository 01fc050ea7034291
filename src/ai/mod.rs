//! AI-backed math solver.
//!
//! Free-text questions are sent to a hosted model together with a fixed
//! instruction and a JSON response contract. Every failure collapses into a
//! single sentinel answer whose `result` is `"Error"`.

mod backend;
mod response;
mod session;
mod solver;
mod worker;

pub use backend::{CompletionBackend, GeminiClient, SolveRequest};
pub use response::{AiError, AiResponse, SolveOutcome};
pub use session::AiSession;
pub use solver::{AiSolver, DEFAULT_MODEL};
pub use worker::{AiWorker, SolveDone, SolveJob};
