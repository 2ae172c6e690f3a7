use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tokio::runtime::Runtime;

use errorshots::cli::{Args, Commands};
use errorshots::cloud::credentials::{RegionPolicy, S3Credentials};
use errorshots::cloud::uploader::Uploader;
use errorshots::command::SystemCommandRunner;
use errorshots::discovery::{Discovery, DiscoveryConfig};

fn main() -> Result<()> {
    // Parse arguments
    let args = Args::parse();

    // Initialize logging
    initialize_logging(args.verbose)?;

    match &args.command {
        Commands::List => list_files(),
        Commands::Push {
            provider,
            optional_region,
        } => push_files(provider.as_deref(), *optional_region),
    }
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;
    Ok(())
}

/// Resolve the log files from the working directory
fn discover_files() -> Result<Vec<PathBuf>> {
    let config = DiscoveryConfig::from_current_dir()
        .context("Failed to determine the working directory")?;
    let files = Discovery::new(config, Box::new(SystemCommandRunner)).resolve()?;
    Ok(files)
}

/// Print the discovered files
fn list_files() -> Result<()> {
    for file in discover_files()? {
        println!("{}", file.display());
    }
    Ok(())
}

/// Upload the discovered files; per-file failures are logged but do not fail the command
fn push_files(provider: Option<&str>, optional_region: bool) -> Result<()> {
    let files = discover_files()?;

    let mut uploader = Uploader::s3(S3Credentials::from_env());
    if optional_region {
        uploader = uploader.with_region_policy(RegionPolicy::Optional);
    }

    let runtime = Runtime::new().context("Failed to create Tokio runtime")?;
    let report = runtime.block_on(uploader.push(provider, files))?;

    if report.failed() > 0 {
        warn!("{} of {} uploads failed", report.failed(), report.outcomes.len());
    } else {
        info!("All {} uploads completed", report.outcomes.len());
    }
    Ok(())
}
