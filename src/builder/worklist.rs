// Wed Oct 14 2026 - Alex

use crate::frontend::DeclId;
use ahash::AHashSet;

/// Pending declarations plus the identity gate that admits each one once.
///
/// Drain order is LIFO; callers key output by name, so order is not part
/// of the contract.
#[derive(Debug, Default)]
pub struct Worklist {
    seen: AHashSet<DeclId>,
    pending: Vec<DeclId>,
}

impl Worklist {
    pub fn new() -> Self {
        Self {
            seen: AHashSet::new(),
            pending: Vec::with_capacity(64),
        }
    }

    /// Queues `decl` unless it was ever queued before. Returns whether it
    /// was queued now.
    pub fn enqueue(&mut self, decl: DeclId) -> bool {
        if self.seen.insert(decl) {
            self.pending.push(decl);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<DeclId> {
        self.pending.pop()
    }

    pub fn is_seen(&self, decl: DeclId) -> bool {
        self.seen.contains(&decl)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
