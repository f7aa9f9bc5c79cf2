//! Critical Path Method scheduling over Precedence Diagramming Method graphs.
//!
//! Tasks have a fixed duration and finish-to-start dependencies on earlier
//! tasks. A [`Schedule`] derives earliest/latest start and finish times, total
//! float, the critical tasks, and every critical path through them.
//!
//! ```
//! use pdm_schedule::Schedule;
//!
//! let mut schedule = Schedule::new();
//! schedule.add_task("design", 3, &[]).unwrap();
//! schedule.add_task("build", 5, &["design"]).unwrap();
//! schedule.add_task("docs", 2, &["design"]).unwrap();
//!
//! assert_eq!(schedule.project_duration().unwrap(), 8);
//! let paths = schedule.critical_paths().unwrap();
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].len(), 2);
//! ```

mod arena;
mod config;
mod critical_path;
pub mod loader;
pub mod logging;
mod models;
pub mod report;
mod schedule;

#[cfg(feature = "python")]
mod python;

pub use config::{LoaderConfig, ScheduleConfig};
pub use critical_path::TaskTiming;
pub use loader::{load_path, load_reader, load_str, parse_record, LoadError, TaskRecord};
pub use models::{TaskId, TaskView};
pub use report::{format_path, ScheduleReport};
pub use schedule::{Schedule, ScheduleError};
