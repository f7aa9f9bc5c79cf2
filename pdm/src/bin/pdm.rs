use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pdm_schedule::logging::verbosity_from_occurrences;
use pdm_schedule::{load_path, LoaderConfig, ScheduleReport};

#[derive(Parser)]
#[command(name = "pdm")]
#[command(about = "Critical path analysis of a precedence diagram", long_about = None)]
struct Cli {
    /// Task file: one `name,duration[,predecessor...]` record per line
    file: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Print only the project duration and critical paths
    #[arg(long)]
    critical_only: bool,

    /// Diagnostics on stderr (-v changes, -vv checks, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = LoaderConfig {
        delimiter: cli.delimiter,
        verbosity: verbosity_from_occurrences(cli.verbose),
        ..LoaderConfig::default()
    };

    let mut schedule = load_path(&cli.file, &config)
        .with_context(|| format!("Failed to load tasks from {}", cli.file.display()))?;
    let report = ScheduleReport::new(&mut schedule)
        .with_context(|| format!("Failed to schedule tasks from {}", cli.file.display()))?;

    if cli.critical_only {
        print!("{}", report.summary());
    } else {
        print!("{}", report);
    }
    Ok(())
}
