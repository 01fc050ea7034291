//! History item representing one solved expression.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Disambiguates items created within the same millisecond.
static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Which flow produced a history item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryKind {
    /// Evaluated on the keypad.
    Standard,
    /// Solved by the AI service.
    Ai,
}

impl HistoryKind {
    /// Tag shown next to the result, if any.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Ai => Some("AI Solved"),
        }
    }
}

/// A solved expression. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryItem {
    /// Unique identifier derived from the creation time.
    pub id: String,
    /// What was computed, e.g. `"2 + 3"` or the prompt text.
    pub expression: String,
    /// The result as text.
    pub result: String,
    pub kind: HistoryKind,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl HistoryItem {
    /// Create a new item stamped with the current time.
    pub fn new(
        expression: impl Into<String>,
        result: impl Into<String>,
        kind: HistoryKind,
    ) -> Self {
        let timestamp = now_millis();
        let sequence = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("{}-{}", timestamp, sequence),
            expression: expression.into(),
            result: result.into(),
            kind,
            timestamp,
        }
    }

    /// Check if this item came from the AI solver.
    pub fn is_ai(&self) -> bool {
        matches!(self.kind, HistoryKind::Ai)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
