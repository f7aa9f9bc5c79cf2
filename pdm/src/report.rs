//! Plain-text presentation of tasks and schedules.

use std::fmt;

use crate::models::TaskView;
use crate::schedule::{Schedule, ScheduleError};

const SEPARATOR: &str = "---------------------";

struct Value(Option<u64>);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "-"),
        }
    }
}

impl fmt::Display for TaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Task {}", self.name)?;
        writeln!(f, "Duration: {}", self.duration)?;
        writeln!(f, "Earliest start: {}", Value(self.earliest_start))?;
        writeln!(f, "Earliest finish: {}", Value(self.earliest_finish))?;
        writeln!(f, "Latest start: {}", Value(self.latest_start))?;
        writeln!(f, "Latest finish: {}", Value(self.latest_finish))?;
        writeln!(f, "Total float: {}", Value(self.total_float))?;
        if self.predecessors.is_empty() {
            write!(f, "No dependencies.")
        } else {
            write!(f, "Dependencies: {}", self.predecessors.join(", "))
        }
    }
}

/// Render a path as `A -> B -> C`.
pub fn format_path(path: &[TaskView]) -> String {
    path.iter()
        .map(|task| task.name.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Snapshot of a fully computed schedule, ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleReport {
    pub tasks: Vec<TaskView>,
    pub project_duration: u64,
    pub critical_paths: Vec<Vec<TaskView>>,
}

impl ScheduleReport {
    /// Compute everything the report shows. Fails if the graph has a cycle.
    pub fn new(schedule: &mut Schedule) -> Result<Self, ScheduleError> {
        let critical_paths = schedule.critical_paths()?;
        let project_duration = schedule.project_duration()?;
        Ok(Self {
            tasks: schedule.tasks(),
            project_duration,
            critical_paths,
        })
    }

    /// Only the summary lines: duration and critical paths.
    pub fn summary(&self) -> String {
        let mut out = format!("Project duration: {}\n", self.project_duration);
        if self.critical_paths.is_empty() {
            out.push_str("No critical paths.\n");
            return out;
        }
        out.push_str("Critical paths:\n");
        for path in &self.critical_paths {
            out.push_str("  ");
            out.push_str(&format_path(path));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for task in &self.tasks {
            writeln!(f, "{}", SEPARATOR)?;
            writeln!(f, "{}", task)?;
            writeln!(f, "{}", SEPARATOR)?;
        }
        write!(f, "{}", self.summary())
    }
}
