// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tcr - build-server client: patch files for remote runs

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod config;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::patch::{self, PatchArgs};
use config::Settings;
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "tcr", version, about = "Build-server client: patch files for remote runs")]
#[command(styles = color::styles())]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, apply and inspect patch files
    Patch(PatchArgs),
}

/// `TCR_LOG` first, then `RUST_LOG`, else warnings only. Logs go to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TCR_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = Settings::load()?;
    match command {
        Commands::Patch(args) => patch::handle(args.command, &settings, cli.format).await,
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(e) = run().await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            eprintln!("error: {exit}");
            std::process::exit(exit.code);
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
