//! Scan CLI command
//!
//! Walks a change-event directory and prints its audit trail.

use chrono::{DateTime, Utc};
use clap::Args;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::format_scan_summary;
use crate::error::{TrailError, TrailResult};
use crate::export::{sink_for, OutputFormat};
use crate::services::{ReviewService, ScanReport};

/// Arguments for `recordtrail scan`
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory of change-event files (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Review window length in months (overrides the settings file)
    #[arg(short, long)]
    pub months: Option<u32>,

    /// End of the review window as an RFC 3339 instant (defaults to now)
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "lines")]
    pub format: OutputFormat,

    /// Print scan statistics to stderr after the records
    #[arg(short, long)]
    pub summary: bool,
}

/// Handle the scan command
pub fn handle_scan_command(settings: Settings, args: ScanArgs) -> TrailResult<ScanReport> {
    let settings = settings.with_overrides(args.months, args.now);

    let root = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| TrailError::Io(format!("Failed to resolve current directory: {}", e)))?,
    };

    let stdout = io::stdout();
    let mut sink = sink_for(args.format, BufWriter::new(stdout.lock()));

    let report = ReviewService::new(&settings).scan_directory(&root, sink.as_mut())?;
    drop(sink);

    if args.summary {
        eprint!("{}", format_scan_summary(&report));
    }

    Ok(report)
}
