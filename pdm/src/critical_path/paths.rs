//! Critical set and critical path enumeration.
//!
//! The critical tasks, joined by the links without slack between them
//! (`EF(pred) == ES(succ)`), form their own DAG: the critical subgraph. A
//! critical path is a maximal walk through it. It starts at a task with no
//! critical predecessor, ends at a task with no critical successor, and its
//! durations add up to the project duration. Forks and joins in the subgraph
//! produce several paths, which may share prefixes and suffixes.

use rustc_hash::FxHashSet;

use crate::arena::TaskArena;
use crate::models::TaskId;

/// Ids of all tasks with zero total float, in insertion order.
pub fn critical_set(arena: &TaskArena) -> Vec<TaskId> {
    arena
        .iter()
        .filter(|(_, task)| task.timing.is_critical())
        .map(|(id, _)| id)
        .collect()
}

/// Enumerate every maximal path of the critical subgraph.
///
/// Each in-progress path is extended by every critical successor its last
/// task finishes exactly against; more than one successor branches the path.
/// Paths are emitted grouped by their start task in topological order, and
/// within a group in topological order of the successor chosen at each branch.
pub fn enumerate_critical_paths(
    arena: &TaskArena,
    topo_order: &[TaskId],
    critical: &[TaskId],
) -> Vec<Vec<TaskId>> {
    let is_critical: FxHashSet<TaskId> = critical.iter().copied().collect();

    let mut rank = vec![usize::MAX; arena.slot_count()];
    for (pos, &id) in topo_order.iter().enumerate() {
        rank[id as usize] = pos;
    }

    // A link with slack is never on a longest path
    let is_tight = |pred: TaskId, succ: TaskId| -> bool {
        match (arena.get(pred), arena.get(succ)) {
            (Some(pred), Some(succ)) => {
                pred.timing.earliest_finish == succ.timing.earliest_start
            }
            _ => false,
        }
    };

    let critical_successors = |id: TaskId| -> Vec<TaskId> {
        let mut succs: Vec<TaskId> = arena
            .get(id)
            .map(|task| {
                task.successors
                    .iter()
                    .copied()
                    .filter(|&succ| is_critical.contains(&succ) && is_tight(id, succ))
                    .collect()
            })
            .unwrap_or_default();
        succs.sort_by_key(|&succ| rank[succ as usize]);
        succs
    };

    let starts = topo_order.iter().copied().filter(|id| {
        is_critical.contains(id)
            && arena
                .get(*id)
                .map(|task| {
                    !task
                        .predecessors
                        .iter()
                        .any(|&pred| is_critical.contains(&pred) && is_tight(pred, *id))
                })
                .unwrap_or(false)
    });

    let mut paths: Vec<Vec<TaskId>> = Vec::new();

    for start in starts {
        // LIFO: the first successor at a branch is finished before the others
        let mut pending: Vec<Vec<TaskId>> = vec![vec![start]];

        while let Some(mut path) = pending.pop() {
            let Some(&last) = path.last() else {
                continue;
            };
            let succs = critical_successors(last);

            let Some((&first, others)) = succs.split_first() else {
                paths.push(path);
                continue;
            };

            for &succ in others.iter().rev() {
                let mut branch = Vec::with_capacity(path.len() + 1);
                branch.extend_from_slice(&path);
                branch.push(succ);
                pending.push(branch);
            }
            path.push(first);
            pending.push(path);
        }
    }

    paths
}
