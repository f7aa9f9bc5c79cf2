//! Logging macros with verbosity level control.
//!
//! Output goes to stderr and costs a single comparison when disabled
//! (verbosity=0), so the engine stays silent unless a caller opts in.
//! Levels:
//! - 0: SILENT (nothing)
//! - 1: CHANGES (tasks added/removed, links changed, passes recomputed)
//! - 2: CHECKS (cache hits, skipped records, path enumeration summaries)
//! - 3: DEBUG (per-task timings during the passes)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Clamp a repeated-flag count (e.g. `-vvv`) to a known verbosity level.
pub fn verbosity_from_occurrences(count: u8) -> u8 {
    count.min(VERBOSITY_DEBUG)
}

/// Short label printed in front of each log line.
pub fn level_name(verbosity: u8) -> &'static str {
    match verbosity {
        VERBOSITY_SILENT => "silent",
        VERBOSITY_CHANGES => "changes",
        VERBOSITY_CHECKS => "checks",
        _ => "debug",
    }
}

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: graph mutations and stage recomputations.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!(
                "[pdm:{}] {}",
                $crate::logging::level_name($crate::logging::VERBOSITY_CHANGES),
                format_args!($($arg)*)
            );
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: cache freshness decisions, skipped input, enumeration results.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!(
                "[pdm:{}] {}",
                $crate::logging::level_name($crate::logging::VERBOSITY_CHECKS),
                format_args!($($arg)*)
            );
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: per-task values computed by the forward and backward passes.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!(
                "[pdm:{}] {}",
                $crate::logging::level_name($crate::logging::VERBOSITY_DEBUG),
                format_args!($($arg)*)
            );
        }
    };
}
