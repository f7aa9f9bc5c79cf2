//! The schedule: task graph ownership, mutation, and lazily derived timing.
//!
//! A [`Schedule`] owns its tasks in an arena. Every mutation advances a single
//! generation counter; queries for derived values run only the pipeline
//! stages whose stamp is behind that counter, always in the order
//! forward pass → backward pass → total float → critical set → critical paths.
//!
//! The schedule is plain data. Callers sharing one across threads must wrap it
//! in a single exclusive lock; nothing inside is synchronized.

use thiserror::Error;

use crate::arena::TaskArena;
use crate::config::ScheduleConfig;
use crate::critical_path::{
    backward_pass, compute_float, critical_set, enumerate_critical_paths, forward_pass,
    topological_order, Stage, StageCache,
};
use crate::models::{TaskId, TaskView};
use crate::{log_changes, log_checks};

/// Error types for schedule construction and computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A task with this name already exists.
    #[error("Task already exists: {0}")]
    DuplicateTask(String),
    /// A declared predecessor has not been added yet.
    #[error("Task {task} depends on unknown predecessor {predecessor}")]
    UnknownPredecessor { task: String, predecessor: String },
    /// Lookup, removal or relinking of an absent task.
    #[error("Task not found: {0}")]
    NotFound(String),
    /// The dependency graph is not acyclic.
    #[error("Circular dependency detected among tasks: {}", tasks.join(", "))]
    CycleDetected { tasks: Vec<String> },
    /// A task's earliest finish does not fit in the time type.
    #[error("Earliest finish of task {task} overflows")]
    DurationOverflow { task: String },
}

/// A precedence diagram with cached critical path analysis.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    arena: TaskArena,
    config: ScheduleConfig,
    generation: u64,
    cache: StageCache,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScheduleConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Current generation; advances on every change to the graph.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arena.get_id(name).is_some()
    }

    /// Add a task after all of its predecessors.
    ///
    /// Fails with [`ScheduleError::DuplicateTask`] if the name exists and with
    /// [`ScheduleError::UnknownPredecessor`] if any predecessor is missing. All
    /// checks run before anything is modified. Repeated predecessor names
    /// collapse into one link.
    pub fn add_task(
        &mut self,
        name: &str,
        duration: u64,
        predecessors: &[&str],
    ) -> Result<TaskId, ScheduleError> {
        if self.contains(name) {
            return Err(ScheduleError::DuplicateTask(name.to_string()));
        }

        let mut pred_ids: Vec<TaskId> = Vec::with_capacity(predecessors.len());
        for &pred in predecessors {
            let pred_id = self
                .arena
                .get_id(pred)
                .ok_or_else(|| ScheduleError::UnknownPredecessor {
                    task: name.to_string(),
                    predecessor: pred.to_string(),
                })?;
            pred_ids.push(pred_id);
        }

        let id = self.arena.insert(name, duration);
        for pred_id in pred_ids {
            self.arena.link(pred_id, id);
        }
        self.invalidate();

        log_changes!(
            self.config.verbosity,
            "added task {} (duration={}, predecessors={:?})",
            name,
            duration,
            predecessors
        );
        Ok(id)
    }

    /// Remove a task, stripping it from every other task's links.
    ///
    /// Returns the task as it was just before removal.
    pub fn remove_task(&mut self, name: &str) -> Result<TaskView, ScheduleError> {
        let id = self.require(name)?;
        let view = self.view(id).ok_or_else(|| ScheduleError::NotFound(name.to_string()))?;

        self.arena.remove(id);
        self.invalidate();

        log_changes!(self.config.verbosity, "removed task {}", name);
        Ok(view)
    }

    /// Look up a task by name. A miss is `None`, never an error.
    pub fn find_task(&self, name: &str) -> Option<TaskView> {
        self.arena.get_id(name).and_then(|id| self.view(id))
    }

    /// Make `task` depend on `predecessor`. Both must exist.
    ///
    /// Unlike [`add_task`](Self::add_task) this can close a cycle; the cycle
    /// is reported by the next computation. Returns false if the link existed.
    pub fn add_dependency(&mut self, task: &str, predecessor: &str) -> Result<bool, ScheduleError> {
        let task_id = self.require(task)?;
        let pred_id = self.require(predecessor)?;

        let added = self.arena.link(pred_id, task_id);
        if added {
            self.invalidate();
            log_changes!(self.config.verbosity, "linked {} -> {}", predecessor, task);
        }
        Ok(added)
    }

    /// Drop the dependency of `task` on `predecessor`. Returns false if there
    /// was no such link.
    pub fn remove_dependency(
        &mut self,
        task: &str,
        predecessor: &str,
    ) -> Result<bool, ScheduleError> {
        let task_id = self.require(task)?;
        let pred_id = self.require(predecessor)?;

        let removed = self.arena.unlink(pred_id, task_id);
        if removed {
            self.invalidate();
            log_changes!(self.config.verbosity, "unlinked {} -> {}", predecessor, task);
        }
        Ok(removed)
    }

    /// Change a task's duration.
    pub fn set_duration(&mut self, name: &str, duration: u64) -> Result<(), ScheduleError> {
        let id = self.require(name)?;
        let changed = match self.arena.get_mut(id) {
            Some(task) if task.duration != duration => {
                task.duration = duration;
                true
            }
            _ => false,
        };
        if changed {
            self.invalidate();
            log_changes!(self.config.verbosity, "set duration of {} to {}", name, duration);
        }
        Ok(())
    }

    /// Task names in insertion order.
    pub fn task_names(&self) -> Vec<String> {
        self.arena.iter().map(|(_, task)| task.name.clone()).collect()
    }

    /// Views of every task in insertion order, with whatever timing is current.
    pub fn tasks(&self) -> Vec<TaskView> {
        self.arena.ids().filter_map(|id| self.view(id)).collect()
    }

    /// Run the forward pass, backward pass and float computation.
    ///
    /// Fails with [`ScheduleError::CycleDetected`] if the graph is not a DAG and
    /// with [`ScheduleError::DurationOverflow`] if a finish time overflows.
    /// Does nothing if the timing is already current.
    pub fn compute_times(&mut self) -> Result<(), ScheduleError> {
        self.refresh(Stage::Float)
    }

    /// Minimum project duration: the latest earliest-finish among sinks.
    pub fn project_duration(&mut self) -> Result<u64, ScheduleError> {
        self.refresh(Stage::Backward)?;
        Ok(self.cache.horizon)
    }

    /// Every task with zero total float, in insertion order.
    pub fn critical_tasks(&mut self) -> Result<Vec<TaskView>, ScheduleError> {
        self.refresh(Stage::CriticalSet)?;
        Ok(self.views(&self.cache.critical))
    }

    /// Every maximal critical path, each ordered from source to sink.
    pub fn critical_paths(&mut self) -> Result<Vec<Vec<TaskView>>, ScheduleError> {
        self.refresh(Stage::CriticalPaths)?;
        Ok(self
            .cache
            .paths
            .iter()
            .map(|path| self.views(path))
            .collect())
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    fn require(&self, name: &str) -> Result<TaskId, ScheduleError> {
        self.arena
            .get_id(name)
            .ok_or_else(|| ScheduleError::NotFound(name.to_string()))
    }

    /// Bring every stage up to and including `target` to the current
    /// generation. A failure leaves the failing stage and all later ones stale.
    fn refresh(&mut self, target: Stage) -> Result<(), ScheduleError> {
        for stage in Stage::PIPELINE {
            if stage > target {
                break;
            }
            if self.cache.is_current(stage, self.generation) {
                log_checks!(
                    self.config.verbosity,
                    "{} current at generation {}",
                    stage.name(),
                    self.generation
                );
                continue;
            }
            self.run_stage(stage)?;
            self.cache.mark(stage, self.generation);
            log_changes!(
                self.config.verbosity,
                "recomputed {} at generation {}",
                stage.name(),
                self.generation
            );
        }
        Ok(())
    }

    fn run_stage(&mut self, stage: Stage) -> Result<(), ScheduleError> {
        let verbosity = self.config.verbosity;
        match stage {
            Stage::Forward => {
                let order = topological_order(&self.arena)?;
                forward_pass(&mut self.arena, &order, verbosity)?;
                self.cache.topo_order = order;
            }
            Stage::Backward => {
                self.cache.horizon =
                    backward_pass(&mut self.arena, &self.cache.topo_order, verbosity);
            }
            Stage::Float => {
                compute_float(&mut self.arena, &self.cache.topo_order);
            }
            Stage::CriticalSet => {
                self.cache.critical = critical_set(&self.arena);
            }
            Stage::CriticalPaths => {
                self.cache.paths = enumerate_critical_paths(
                    &self.arena,
                    &self.cache.topo_order,
                    &self.cache.critical,
                );
                log_checks!(
                    verbosity,
                    "{} critical path(s) through {} critical task(s)",
                    self.cache.paths.len(),
                    self.cache.critical.len()
                );
            }
        }
        Ok(())
    }

    fn views(&self, ids: &[TaskId]) -> Vec<TaskView> {
        ids.iter().filter_map(|&id| self.view(id)).collect()
    }

    fn view(&self, id: TaskId) -> Option<TaskView> {
        let task = self.arena.get(id)?;
        let forward = self.cache.is_current(Stage::Forward, self.generation);
        let backward = self.cache.is_current(Stage::Backward, self.generation);
        let float = self.cache.is_current(Stage::Float, self.generation);
        let timing = task.timing;

        Some(TaskView {
            name: task.name.clone(),
            duration: task.duration,
            earliest_start: forward.then_some(timing.earliest_start),
            earliest_finish: forward.then_some(timing.earliest_finish),
            latest_start: backward.then_some(timing.latest_start),
            latest_finish: backward.then_some(timing.latest_finish),
            total_float: float.then_some(timing.total_float),
            predecessors: self.arena.names(&task.predecessors),
            successors: self.arena.names(&task.successors),
        })
    }
}
