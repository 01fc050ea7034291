//! History of solved expressions shared by the keypad and the AI solver.
//!
//! The list is ordered newest first and capped at [`HISTORY_LIMIT`] entries.
//! It lives only as long as the process.

mod item;

pub use item::{HistoryItem, HistoryKind};

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Maximum number of items kept; older ones are dropped silently.
pub const HISTORY_LIMIT: usize = 50;

/// Handle to the history injected into both input flows.
///
/// All appends happen on the UI thread, so a `RefCell` is enough.
pub type SharedHistory = Rc<RefCell<History>>;

/// Capped, newest-first list of history items.
#[derive(Debug, Default)]
pub struct History {
    items: VecDeque<HistoryItem>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new history wrapped for sharing.
    pub fn shared() -> SharedHistory {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Insert an item at the front, evicting the oldest beyond the cap.
    pub fn append(&mut self, item: HistoryItem) {
        tracing::debug!(
            id = %item.id,
            expression = %item.expression,
            result = %item.result,
            "History append"
        );
        self.items.push_front(item);
        self.items.truncate(HISTORY_LIMIT);
    }

    /// Convenience for creating and appending an item in one step.
    pub fn record(
        &mut self,
        expression: impl Into<String>,
        result: impl Into<String>,
        kind: HistoryKind,
    ) {
        self.append(HistoryItem::new(expression, result, kind));
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.items.len(), "History cleared");
        self.items.clear();
    }

    /// Items, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    /// The most recently added item.
    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
