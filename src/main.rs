// src/main.rs

use anyhow::Result;
use clap::Parser;
use github_dlr::cli::Cli;
use github_dlr::config::ConfigBuilder;
use github_dlr::errors::Error;
#[cfg(feature = "progress")]
use github_dlr::progress::IndicatifProgress;
use github_dlr::progress::ProgressReporter;
use github_dlr::run;
use github_dlr::signal::setup_signal_handler;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging. Notices go to stdout/stderr on their own; logs stay
    // quiet in release builds unless RUST_LOG asks for more.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "github_dlr=debug".parse()?
                } else {
                    "github_dlr=warn".parse()?
                },
            ),
        )
        .init();

    // GITHUB_ACCESS_TOKEN may live in a .env file.
    if let Err(e) = dotenvy::dotenv() {
        log::debug!("No .env file loaded: {}", e);
    }

    log::info!("Starting github-dlr v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    // --- Setup ---
    let cli = Cli::parse();

    // Decide whether to show a progress bar. Show it if stderr is a TTY.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    // --- Configuration & Execution ---
    let config = match ConfigBuilder::from_cli(cli).build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("Configuration built successfully: {:?}", config);

    let token = setup_signal_handler()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(&config, &token, progress_reporter));

    // --- Error Handling ---
    match result {
        Ok(report) => {
            log::debug!("Run finished: {:?}", report);
            Ok(())
        }
        Err(Error::Interrupted) => {
            eprintln!("\nOperation cancelled.");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
