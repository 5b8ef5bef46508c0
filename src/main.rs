//! psup - Main entry point.
//!
//! Reads a JSON application file, starts every app, and supervises
//! them in the foreground until interrupted.
//!
//! Usage: psup [OPTIONS] <CONFIG>
//!
//! Options:
//!   --version, -v    Show version
//!   --check          Validate the config and print the apps
//!   --no-log         Disable file logging

use std::env;
use std::path::Path;
use std::process::ExitCode;

use psup::logging::{self, LogConfig};
use psup::{Config, Supervisor};

/// Crate version, injected at build time.
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage() -> &'static str {
    "Usage: psup [OPTIONS] <CONFIG>\n\n\
     Options:\n\
       --version, -v    Show version\n\
       --check          Validate the config and print the apps\n\
       --no-log         Disable file logging"
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("psup v{}", VERSION);
        return ExitCode::SUCCESS;
    }

    let check_only = args.iter().any(|a| a == "--check");
    let no_log = args.iter().any(|a| a == "--no-log");

    let Some(config_path) = args.iter().skip(1).find(|a| !a.starts_with('-')) else {
        eprintln!("{}", usage());
        return ExitCode::FAILURE;
    };

    let config = match Config::load_from(Path::new(config_path)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("psup: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if check_only {
        println!("{}: {} app(s)", config_path, config.apps.len());
        for app in &config.apps {
            println!(
                "  {} ({} instance(s), autorestart={}, cwd={})",
                app.name,
                app.instances,
                app.autorestart,
                app.cwd.display()
            );
        }
        return ExitCode::SUCCESS;
    }

    let log_config = LogConfig {
        file_enabled: !no_log,
        ..LogConfig::default()
    };
    if let Err(err) = logging::init(&log_config) {
        eprintln!("psup: failed to initialize logging: {}", err);
        return ExitCode::FAILURE;
    }

    let supervisor = Supervisor::new().spawn();

    let mut failures = 0u32;
    for app in &config.apps {
        if let Err(err) = supervisor.start(app.clone()).await {
            tracing::error!(app = %app.name, %err, "Failed to start");
            failures += 1;
        }
    }
    if failures == config.apps.len() as u32 && !config.apps.is_empty() {
        tracing::error!("No app could be started, exiting");
        supervisor.shutdown().await;
        return ExitCode::FAILURE;
    }

    tracing::info!(
        "Supervising {} app(s), press Ctrl+C to stop",
        config.apps.len()
    );

    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "Failed to listen for Ctrl+C");
    }

    tracing::info!("Interrupt received, stopping all apps");
    supervisor.shutdown().await;

    ExitCode::SUCCESS
}
