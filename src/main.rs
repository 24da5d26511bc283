// Strata - Layered startup configuration
// Copyright (c) 2025 Strata Contributors
// Licensed under the MIT License

use anyhow::Context;
use strata::config::{load_config, Sources};
use strata::domain::StrataError;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let exit_code = match run() {
        Ok(()) => 0,
        Err(e) => match e.downcast_ref::<StrataError>() {
            Some(StrataError::DisplayRequested(text)) => {
                print!("{text}");
                0
            }
            Some(StrataError::Arguments(msg)) => {
                eprintln!("{msg}");
                2
            }
            _ => {
                eprintln!("Error: {e:#}");
                5 // Fatal error exit code
            }
        },
    };

    process::exit(exit_code);
}

/// Resolve configuration, install the logger and print a redacted summary
fn run() -> anyhow::Result<()> {
    let startup = load_config(&Sources::from_process())?;
    startup.logging.install_global()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Strata configuration resolved");

    let summary = serde_json::to_string_pretty(&startup.config.summary())
        .context("Failed to render configuration summary")?;
    println!("{summary}");

    Ok(())
}
