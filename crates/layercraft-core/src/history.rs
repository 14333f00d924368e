//! Linear undo/redo over whole-document snapshots.

use crate::document::DesignDocument;

/// Ordered snapshots plus the index of the current one.
///
/// The stack is never empty: it is seeded with one document at construction
/// and every restore resets it to a single entry.
#[derive(Debug, Clone)]
pub struct History {
    stack: Vec<DesignDocument>,
    index: usize,
    /// Maximum number of snapshots kept (None = unbounded).
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DesignDocument::default())
    }
}

impl History {
    /// Create a history seeded with `document`.
    pub fn new(document: DesignDocument) -> Self {
        Self {
            stack: vec![document],
            index: 0,
            limit: None,
        }
    }

    /// Cap the number of retained snapshots; the oldest are dropped first.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(1));
        self.enforce_limit();
        self
    }

    /// The current snapshot.
    pub fn current(&self) -> &DesignDocument {
        &self.stack[self.index]
    }

    /// Push a new snapshot, discarding anything redoable.
    pub fn commit(&mut self, document: DesignDocument) {
        self.stack.truncate(self.index + 1);
        self.stack.push(document);
        self.index = self.stack.len() - 1;
        self.enforce_limit();
    }

    /// Step back one snapshot. Returns true if the index moved.
    pub fn undo(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one snapshot. Returns true if the index moved.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 < self.stack.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Replace the whole history with a single snapshot.
    pub fn restore(&mut self, document: DesignDocument) {
        self.stack = vec![document];
        self.index = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.stack.len()
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Index of the current snapshot.
    pub fn index(&self) -> usize {
        self.index
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            if self.stack.len() > limit {
                let excess = self.stack.len() - limit;
                self.stack.drain(..excess);
                self.index = self.index.saturating_sub(excess);
            }
        }
    }
}
