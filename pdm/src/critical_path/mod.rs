//! Critical path method over the precedence diagram.
//!
//! Forward and backward passes over a topological order, total float, and
//! enumeration of every critical path through the zero-float subgraph. The
//! [`Schedule`](crate::Schedule) drives these through a generation-stamped
//! cache so each stage runs once per mutation.

mod cache;
mod calculation;
mod paths;
mod types;

pub use cache::{Stage, StageCache};
pub use calculation::{backward_pass, compute_float, forward_pass, topological_order};
pub use paths::{critical_set, enumerate_critical_paths};
pub use types::TaskTiming;
