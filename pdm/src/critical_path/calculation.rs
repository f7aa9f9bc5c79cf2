//! Critical path calculation using forward and backward passes.
//!
//! Both passes walk a topological order computed once per graph generation,
//! so a task is only finalized after every predecessor (forward) or every
//! successor (backward) has been.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::arena::TaskArena;
use crate::log_debug;
use crate::models::TaskId;
use crate::schedule::ScheduleError;

/// Perform a topological sort of all tasks using Kahn's algorithm.
///
/// Returns task ids such that every task comes after all of its predecessors.
/// Among tasks that are ready at the same time, the earliest inserted goes
/// first, so the order is deterministic.
///
/// On a cycle, fails with [`ScheduleError::CycleDetected`] listing every task
/// the sort could not order: the cycle members and everything downstream.
pub fn topological_order(arena: &TaskArena) -> Result<Vec<TaskId>, ScheduleError> {
    // In-degree = number of unprocessed predecessors
    let mut in_degree = vec![0usize; arena.slot_count()];
    for (id, node) in arena.iter() {
        in_degree[id as usize] = node.predecessors.len();
    }

    // Min-heap on id: ids increase with insertion
    let mut ready: BinaryHeap<Reverse<TaskId>> = arena
        .iter()
        .filter(|(_, node)| node.predecessors.is_empty())
        .map(|(id, _)| Reverse(id))
        .collect();

    let mut order: Vec<TaskId> = Vec::with_capacity(arena.len());

    while let Some(Reverse(id)) = ready.pop() {
        order.push(id);

        if let Some(node) = arena.get(id) {
            for &succ in &node.successors {
                let degree = &mut in_degree[succ as usize];
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(succ));
                }
            }
        }
    }

    if order.len() != arena.len() {
        let mut ordered = vec![false; arena.slot_count()];
        for &id in &order {
            ordered[id as usize] = true;
        }
        let tasks = arena
            .iter()
            .filter(|(id, _)| !ordered[*id as usize])
            .map(|(_, node)| node.name.clone())
            .collect();
        return Err(ScheduleError::CycleDetected { tasks });
    }

    Ok(order)
}

/// Forward pass: compute earliest start/finish times.
///
/// Sources start at 0; every other task starts at the latest earliest-finish
/// of its predecessors. Fails with [`ScheduleError::DurationOverflow`] if an
/// earliest finish does not fit in a `u64`.
pub fn forward_pass(
    arena: &mut TaskArena,
    topo_order: &[TaskId],
    verbosity: u8,
) -> Result<(), ScheduleError> {
    for &task_id in topo_order {
        let Some(task) = arena.get(task_id) else {
            continue;
        };

        // Earliest start = max of all predecessor finish times
        let earliest_start = task
            .predecessors
            .iter()
            .filter_map(|&pred| arena.get(pred))
            .map(|pred| pred.timing.earliest_finish)
            .max()
            .unwrap_or(0);
        let earliest_finish = earliest_start.checked_add(task.duration).ok_or_else(|| {
            ScheduleError::DurationOverflow {
                task: task.name.clone(),
            }
        })?;

        if let Some(task) = arena.get_mut(task_id) {
            task.timing.earliest_start = earliest_start;
            task.timing.earliest_finish = earliest_finish;
            log_debug!(
                verbosity,
                "forward {}: es={} ef={}",
                task.name,
                task.timing.earliest_start,
                task.timing.earliest_finish
            );
        }
    }

    Ok(())
}

/// Backward pass: compute latest start/finish times (reverse topological order).
///
/// Every sink finishes at the horizon (the largest earliest-finish among
/// sinks); every other task must finish before its earliest-starting
/// successor's latest start. Returns the horizon.
///
/// Cannot underflow once the forward pass succeeded: every latest finish is at
/// least the task's own earliest finish, which is at least its duration.
pub fn backward_pass(arena: &mut TaskArena, topo_order: &[TaskId], verbosity: u8) -> u64 {
    let horizon = arena
        .iter()
        .filter(|(_, task)| task.successors.is_empty())
        .map(|(_, task)| task.timing.earliest_finish)
        .max()
        .unwrap_or(0);

    for &task_id in topo_order.iter().rev() {
        let Some(task) = arena.get(task_id) else {
            continue;
        };

        // No successors: sink rule
        let latest_finish = task
            .successors
            .iter()
            .filter_map(|&succ| arena.get(succ))
            .map(|succ| succ.timing.latest_start)
            .min()
            .unwrap_or(horizon);
        let duration = task.duration;

        if let Some(task) = arena.get_mut(task_id) {
            task.timing.latest_finish = latest_finish;
            task.timing.latest_start = latest_finish - duration;
            log_debug!(
                verbosity,
                "backward {}: ls={} lf={}",
                task.name,
                task.timing.latest_start,
                task.timing.latest_finish
            );
        }
    }

    horizon
}

/// Total float of every task. Both passes must be current.
pub fn compute_float(arena: &mut TaskArena, topo_order: &[TaskId]) {
    for &task_id in topo_order {
        if let Some(task) = arena.get_mut(task_id) {
            task.timing.total_float = task.timing.latest_start - task.timing.earliest_start;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_arena(tasks: Vec<(&str, u64, Vec<&str>)>) -> TaskArena {
        let mut arena = TaskArena::default();
        for (name, duration, deps) in tasks {
            let id = arena.insert(name, duration);
            for dep in deps {
                let dep_id = arena.get_id(dep).unwrap();
                arena.link(dep_id, id);
            }
        }
        arena
    }

    fn run_all(arena: &mut TaskArena) -> (Vec<TaskId>, u64) {
        let order = topological_order(arena).unwrap();
        forward_pass(arena, &order, 0).unwrap();
        let horizon = backward_pass(arena, &order, 0);
        compute_float(arena, &order);
        (order, horizon)
    }

    fn timing(arena: &TaskArena, name: &str) -> (u64, u64, u64, u64, u64) {
        let t = arena.get(arena.get_id(name).unwrap()).unwrap().timing;
        (
            t.earliest_start,
            t.earliest_finish,
            t.latest_start,
            t.latest_finish,
            t.total_float,
        )
    }

    #[test]
    fn test_topological_order_respects_dependencies() {
        // c is inserted before b but depends on it
        let mut arena = make_arena(vec![("a", 1, vec![]), ("c", 1, vec!["a"])]);
        let b = arena.insert("b", 1);
        let c = arena.get_id("c").unwrap();
        arena.link(b, c);

        let order = topological_order(&arena).unwrap();
        let pos = |id: TaskId| order.iter().position(|&x| x == id).unwrap();

        assert_eq!(order.len(), 3);
        assert!(pos(arena.get_id("a").unwrap()) < pos(c));
        assert!(pos(b) < pos(c));
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_topological_order_ties_follow_insertion() {
        let arena = make_arena(vec![
            ("x", 1, vec![]),
            ("y", 1, vec![]),
            ("z", 1, vec![]),
        ]);
        assert_eq!(topological_order(&arena).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_circular_dependency_error() {
        // a depends on b, b depends on a; c hangs off the cycle
        let mut arena = make_arena(vec![("a", 5, vec![]), ("b", 3, vec!["a"])]);
        let a = arena.get_id("a").unwrap();
        let b = arena.get_id("b").unwrap();
        arena.link(b, a);
        let c = arena.insert("c", 1);
        arena.link(b, c);
        arena.insert("free", 1);

        let result = topological_order(&arena);
        assert_eq!(
            result,
            Err(ScheduleError::CycleDetected {
                tasks: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            })
        );
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let mut arena = make_arena(vec![("a", 1, vec![])]);
        arena.link(0, 0);
        assert!(topological_order(&arena).is_err());
    }

    #[test]
    fn test_chain() {
        // a -> b -> c (all critical)
        let mut arena = make_arena(vec![
            ("a", 2, vec![]),
            ("b", 3, vec!["a"]),
            ("c", 4, vec!["b"]),
        ]);
        let (_, horizon) = run_all(&mut arena);

        assert_eq!(horizon, 9); // 2 + 3 + 4
        assert_eq!(timing(&arena, "a"), (0, 2, 0, 2, 0));
        assert_eq!(timing(&arena, "b"), (2, 5, 2, 5, 0));
        assert_eq!(timing(&arena, "c"), (5, 9, 5, 9, 0));
    }

    #[test]
    fn test_parallel_paths_with_float() {
        // a (2) -> target (1)
        // b (5) -> target (1)
        let mut arena = make_arena(vec![
            ("a", 2, vec![]),
            ("b", 5, vec![]),
            ("target", 1, vec!["a", "b"]),
        ]);
        let (_, horizon) = run_all(&mut arena);

        assert_eq!(horizon, 6);
        assert_eq!(timing(&arena, "a"), (0, 2, 3, 5, 3));
        assert_eq!(timing(&arena, "b"), (0, 5, 0, 5, 0));
        assert_eq!(timing(&arena, "target"), (5, 6, 5, 6, 0));
    }

    #[test]
    fn test_late_discovered_predecessor_wins() {
        // join depends on a short task inserted first and a long chain
        // whose last link is inserted later
        let mut arena = make_arena(vec![
            ("short", 1, vec![]),
            ("long1", 4, vec![]),
            ("long2", 4, vec!["long1"]),
            ("join", 2, vec!["short", "long2"]),
        ]);
        run_all(&mut arena);

        assert_eq!(timing(&arena, "join"), (8, 10, 8, 10, 0));
        assert_eq!(timing(&arena, "short"), (0, 1, 7, 8, 7));
    }

    #[test]
    fn test_diamond_dependency() {
        // a -> b -> d
        // a -> c -> d
        // Path via b: 2 + 3 + 1 = 6
        // Path via c: 2 + 5 + 1 = 8 (critical)
        let mut arena = make_arena(vec![
            ("a", 2, vec![]),
            ("b", 3, vec!["a"]),
            ("c", 5, vec!["a"]),
            ("d", 1, vec!["b", "c"]),
        ]);
        let (_, horizon) = run_all(&mut arena);

        assert_eq!(horizon, 8);
        assert_eq!(timing(&arena, "b").4, 2);
        assert_eq!(timing(&arena, "c").4, 0);
        assert_eq!(timing(&arena, "a").4, 0);
        assert_eq!(timing(&arena, "d").4, 0);
    }

    #[test]
    fn test_multiple_sinks_share_horizon() {
        // short sink finishes at 2, long sink at 7
        let mut arena = make_arena(vec![
            ("root", 1, vec![]),
            ("short", 1, vec!["root"]),
            ("long", 6, vec!["root"]),
        ]);
        let (_, horizon) = run_all(&mut arena);

        assert_eq!(horizon, 7);
        assert_eq!(timing(&arena, "short"), (1, 2, 6, 7, 5));
        assert_eq!(timing(&arena, "long"), (1, 7, 1, 7, 0));
    }

    #[test]
    fn test_zero_duration_milestone() {
        let mut arena = make_arena(vec![
            ("a", 3, vec![]),
            ("milestone", 0, vec!["a"]),
            ("b", 2, vec!["milestone"]),
        ]);
        let (_, horizon) = run_all(&mut arena);

        assert_eq!(horizon, 5);
        assert_eq!(timing(&arena, "milestone"), (3, 3, 3, 3, 0));
    }

    #[test]
    fn test_zero_duration_milestone_on_branch() {
        // the milestone sits on the shorter branch and inherits its float
        let mut arena = make_arena(vec![
            ("a", 2, vec![]),
            ("gate", 0, vec!["a"]),
            ("b", 1, vec!["gate"]),
            ("c", 4, vec!["a"]),
            ("d", 1, vec!["b", "c"]),
        ]);
        let (_, horizon) = run_all(&mut arena);

        assert_eq!(horizon, 7);
        assert_eq!(timing(&arena, "gate"), (2, 2, 5, 5, 3));
        assert_eq!(timing(&arena, "b"), (2, 3, 5, 6, 3));
        assert_eq!(timing(&arena, "d"), (6, 7, 6, 7, 0));
    }

    #[test]
    fn test_forward_pass_overflow() {
        let mut arena = make_arena(vec![
            ("huge", u64::MAX, vec![]),
            ("after", 1, vec!["huge"]),
        ]);
        let order = topological_order(&arena).unwrap();

        assert_eq!(
            forward_pass(&mut arena, &order, 0),
            Err(ScheduleError::DurationOverflow {
                task: "after".to_string(),
            })
        );
    }

    #[test]
    fn test_max_duration_alone_fits() {
        let mut arena = make_arena(vec![("huge", u64::MAX, vec![])]);
        let (_, horizon) = run_all(&mut arena);
        assert_eq!(horizon, u64::MAX);
        assert_eq!(timing(&arena, "huge"), (0, u64::MAX, 0, u64::MAX, 0));
    }

    #[test]
    fn test_empty_arena() {
        let mut arena = TaskArena::default();
        let (order, horizon) = run_all(&mut arena);
        assert!(order.is_empty());
        assert_eq!(horizon, 0);
    }
}
