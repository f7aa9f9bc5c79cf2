//! Configuration types for the scheduling engine and the task-file loader.

use crate::logging::VERBOSITY_SILENT;

/// Configuration for a [`Schedule`](crate::Schedule).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl ScheduleConfig {
    pub fn with_verbosity(verbosity: u8) -> Self {
        Self { verbosity }
    }
}

/// Configuration for reading delimited task records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Field separator between name, duration and predecessor names.
    pub delimiter: char,
    /// Lines starting with this character (after trimming) are skipped.
    pub comment_prefix: char,
    /// Verbosity passed on to the loaded schedule and used for loader diagnostics.
    pub verbosity: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            comment_prefix: '#',
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl LoaderConfig {
    /// The schedule configuration a loaded schedule is created with.
    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig {
            verbosity: self.verbosity,
        }
    }
}
