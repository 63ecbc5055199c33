// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tabletop - restaurant booking backend.
//!
//! This is the binary entry point.

mod check;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tabletop_config::TabletopConfig;

/// Tabletop - restaurant booking backend.
#[derive(Parser, Debug)]
#[command(name = "tabletop", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG lookup paths.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the booking API server (default).
    Serve,
    /// Validate configuration and print a summary.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            tabletop_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig => {
            print!("{}", check::summary(&config));
        }
    }
}

fn load(
    path: Option<&std::path::Path>,
) -> Result<TabletopConfig, Vec<tabletop_config::ConfigError>> {
    match path {
        Some(path) => tabletop_config::load_and_validate_path(path),
        None => tabletop_config::load_and_validate(),
    }
}
