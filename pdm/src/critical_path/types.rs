//! Types for critical path calculation.

/// Per-task timing produced by the forward and backward passes.
///
/// Invariants once every pass has run on an acyclic graph:
/// `earliest_finish = earliest_start + duration`,
/// `latest_start = latest_finish - duration`,
/// `total_float = latest_start - earliest_start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: u64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: u64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: u64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: u64,
    /// Total float = latest_start - earliest_start.
    pub total_float: u64,
}

impl TaskTiming {
    pub fn is_critical(&self) -> bool {
        self.total_float == 0
    }
}
