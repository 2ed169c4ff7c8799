use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recordtrail::cli::{handle_config_command, handle_scan_command, load_settings, ScanArgs};

#[derive(Parser)]
#[command(
    name = "recordtrail",
    version,
    about = "Audit trail extraction for form-based record-management change events",
    long_about = "recordtrail scans a directory of change-event files, keeps the events \
                  modified inside a trailing review window that concern logins, users, \
                  patients, procedures, reviews, images and videos, and prints one audit \
                  record per meaningful change."
)]
struct Cli {
    /// Settings file (JSON or YAML); defaults to the user config directory
    #[arg(short, long, global = true, env = "RECORDTRAIL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a change-event directory and print its audit trail
    Scan(ScanArgs),

    /// Show the effective settings
    Config {
        /// Write the effective settings to the default settings file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Scan(args)) => {
            let (settings, _) = load_settings(cli.config.as_deref())?;
            handle_scan_command(settings, args)?;
        }
        Some(Commands::Config { init }) => {
            let (settings, source) = load_settings(cli.config.as_deref())?;
            handle_config_command(&settings, &source, init)?;
        }
        None => {
            println!("recordtrail - audit trails from change-event files");
            println!();
            println!("Run 'recordtrail --help' for usage information.");
            println!("Run 'recordtrail scan <DIR>' to print the audit trail of a directory.");
        }
    }

    Ok(())
}
