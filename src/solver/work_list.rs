use std::collections::{HashSet, VecDeque};

use crate::solver::graph::VariableId;

/// An arc `(a, b)` schedules variable `a` for revision against `b`: every
/// value of `a` must have at least one support in `b`'s domain.
pub type Arc = (VariableId, VariableId);

/// FIFO worklist of arcs awaiting revision during AC-3.
///
/// An arc already queued is not queued again; re-enqueueing after a domain
/// shrink would otherwise flood the queue with duplicates.
pub struct WorkList {
    queue: VecDeque<Arc>,
    queue_members: HashSet<Arc>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queue_members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, target: VariableId, against: VariableId) {
        let arc = (target, against);
        if self.queue_members.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    pub fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.queue_members.remove(&arc);
        Some(arc)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}
