//! Core data types for the scheduling engine.

/// Arena slot of a task (u32 for compact link lists and fast hashing).
pub type TaskId = u32;

/// Read-only snapshot of a task and its derived timing.
///
/// Timing fields are `None` until the pass producing them has run against the
/// schedule's current generation; a mutation makes them unset again.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskView {
    pub name: String,
    pub duration: u64,
    pub earliest_start: Option<u64>,
    pub earliest_finish: Option<u64>,
    pub latest_start: Option<u64>,
    pub latest_finish: Option<u64>,
    pub total_float: Option<u64>,
    /// Names of the tasks this task depends on, in insertion order.
    pub predecessors: Vec<String>,
    /// Names of the tasks depending on this task, in insertion order.
    pub successors: Vec<String>,
}

impl TaskView {
    /// Zero total float. Always false while the float is unset.
    pub fn is_critical(&self) -> bool {
        self.total_float == Some(0)
    }

    pub fn is_source(&self) -> bool {
        self.predecessors.is_empty()
    }

    pub fn is_sink(&self) -> bool {
        self.successors.is_empty()
    }
}
