// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locator - inspect provider resolution for an installation.
//!
//! This is the binary entry point for the `locator` command.

mod check;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use locator_config::LocatorConfig;

/// Locator - inspect provider resolution for an installation.
#[derive(Parser, Debug)]
#[command(name = "locator", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the standard search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show which strategy would supply a provider for a capability.
    Check {
        /// Fully-qualified capability name.
        capability: String,
        /// Default implementation used when nothing is configured.
        #[arg(long)]
        fallback: Option<String>,
        /// Directory of service files (one file per capability) to scan first.
        #[arg(long)]
        services: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => locator_config::load_and_validate_path(path),
        None => locator_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            locator_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    match cli.command {
        Some(Commands::Check {
            capability,
            fallback,
            services,
        }) => {
            match check::run_check(
                &config,
                &capability,
                fallback.as_deref(),
                services.as_deref(),
                cli.plain,
            ) {
                Ok(true) => {}
                Ok(false) => std::process::exit(1),
                Err(e) => {
                    eprintln!("locator: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Config) => match render_config(&config) {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("locator: cannot render configuration: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("locator: use --help for available commands");
        }
    }
}

fn render_config(config: &LocatorConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("locator={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
