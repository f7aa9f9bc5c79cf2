//! Delimited-text task loader.
//!
//! One task per line: `name, duration[, predecessor...]`. Every field after the
//! duration names one predecessor; empty fields and `-` mean none. Blank lines
//! and comment lines are skipped. Records are added in file order, so a
//! predecessor must appear on an earlier line than its dependents.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::config::LoaderConfig;
use crate::schedule::{Schedule, ScheduleError};
use crate::{log_changes, log_checks};

/// Placeholder accepted in the predecessor position for "no predecessor".
const NO_PREDECESSOR: &str = "-";

/// Error types for loading a task file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read task records: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line}: expected at least a task name and a duration")]
    MissingField { line: usize },
    #[error("Line {line}: invalid duration {value:?}")]
    InvalidDuration { line: usize, value: String },
    #[error("Line {line}: {source}")]
    Schedule {
        line: usize,
        #[source]
        source: ScheduleError,
    },
}

impl LoadError {
    /// 1-based line the error was found on, if it came from a record.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::MissingField { line }
            | Self::InvalidDuration { line, .. }
            | Self::Schedule { line, .. } => Some(*line),
        }
    }
}

/// A parsed task record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRecord {
    pub name: String,
    pub duration: u64,
    pub predecessors: Vec<String>,
}

/// Parse one line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_record(
    text: &str,
    line: usize,
    config: &LoaderConfig,
) -> Result<Option<TaskRecord>, LoadError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with(config.comment_prefix) {
        return Ok(None);
    }

    let mut fields = trimmed.split(config.delimiter).map(str::trim);

    let name = match fields.next() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(LoadError::MissingField { line }),
    };
    let duration_field = match fields.next() {
        Some(field) if !field.is_empty() => field,
        _ => return Err(LoadError::MissingField { line }),
    };
    let duration = duration_field
        .parse::<u64>()
        .map_err(|_| LoadError::InvalidDuration {
            line,
            value: duration_field.to_string(),
        })?;

    let predecessors = fields
        .filter(|field| !field.is_empty() && *field != NO_PREDECESSOR)
        .map(str::to_string)
        .collect();

    Ok(Some(TaskRecord {
        name: name.to_string(),
        duration,
        predecessors,
    }))
}

/// Read records from any buffered reader into a new schedule.
pub fn load_reader<R: BufRead>(reader: R, config: &LoaderConfig) -> Result<Schedule, LoadError> {
    let mut schedule = Schedule::with_config(config.schedule_config());

    for (idx, text) in reader.lines().enumerate() {
        let line = idx + 1;
        let text = text?;

        let Some(record) = parse_record(&text, line, config)? else {
            log_checks!(config.verbosity, "line {}: skipped", line);
            continue;
        };

        let predecessors: Vec<&str> = record.predecessors.iter().map(String::as_str).collect();
        schedule
            .add_task(&record.name, record.duration, &predecessors)
            .map_err(|source| LoadError::Schedule { line, source })?;
    }

    log_changes!(config.verbosity, "loaded {} task(s)", schedule.len());
    Ok(schedule)
}

/// Load records from a string.
pub fn load_str(input: &str, config: &LoaderConfig) -> Result<Schedule, LoadError> {
    load_reader(input.as_bytes(), config)
}

/// Load records from a file.
pub fn load_path<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Schedule, LoadError> {
    let file = File::open(path)?;
    load_reader(BufReader::new(file), config)
}
