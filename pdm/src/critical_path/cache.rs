//! Generation-stamped cache for derived schedule values.
//!
//! The schedule bumps a single generation counter on every mutation. Each
//! stage of the pipeline remembers the generation it was computed at and is
//! stale whenever that differs from the schedule's current generation. Stages
//! always run in pipeline order, so a stage is only marked current after every
//! stage before it is.

use crate::models::TaskId;

/// One step of the derived-value pipeline, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Forward,
    Backward,
    Float,
    CriticalSet,
    CriticalPaths,
}

impl Stage {
    pub const PIPELINE: [Stage; 5] = [
        Stage::Forward,
        Stage::Backward,
        Stage::Float,
        Stage::CriticalSet,
        Stage::CriticalPaths,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Forward => "forward pass",
            Stage::Backward => "backward pass",
            Stage::Float => "total float",
            Stage::CriticalSet => "critical set",
            Stage::CriticalPaths => "critical paths",
        }
    }
}

/// Cached pipeline outputs that do not live on the task nodes themselves.
#[derive(Clone, Debug, Default)]
pub struct StageCache {
    stamps: [Option<u64>; 5],
    /// Topological order used by every stage (set by the forward pass).
    pub topo_order: Vec<TaskId>,
    /// Largest earliest finish among sinks (set by the backward pass).
    pub horizon: u64,
    /// Zero-float task ids in insertion order.
    pub critical: Vec<TaskId>,
    /// Every maximal critical path, source to sink.
    pub paths: Vec<Vec<TaskId>>,
}

impl StageCache {
    pub fn is_current(&self, stage: Stage, generation: u64) -> bool {
        self.stamps[stage.index()] == Some(generation)
    }

    pub fn mark(&mut self, stage: Stage, generation: u64) {
        self.stamps[stage.index()] = Some(generation);
    }
}
