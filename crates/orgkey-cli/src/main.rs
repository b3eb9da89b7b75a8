//! Orgkey CLI - inspect and unwrap encrypted organization keys
//!
//! This is the command-line interface for Orgkey. It reads stored
//! organization key records, loads the user's identity and provider keys
//! from disk, and hands them to the core library.

mod app;
mod cli;
mod commands;
mod config;
mod logging;
mod output;
mod security;

use clap::Parser;

use orgkey_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{handle_completions, handle_inspect, handle_unwrap};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let ctx = AppContext::new(&cli);

    match &cli.command {
        Some(Commands::Inspect(args)) => handle_inspect(args),
        Some(Commands::Unwrap(args)) => handle_unwrap(&ctx, args).await,
        Some(Commands::Completions(args)) => handle_completions(args.shell),
        None => {
            println!("Orgkey v{}", VERSION);
            println!("\nRun `orgkey --help` for usage information.");
            Ok(())
        }
    }
}
