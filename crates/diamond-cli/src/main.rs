//! diamond CLI
//!
//! Installs stylesheet packages into a project's `diamond/packages` tree.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::ProjectContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        if e.is_fatal() {
            eprintln!("{}", "not ok".red().bold());
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let context = ProjectContext::load(&cli)?;
    match cli.command {
        Commands::Install(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(commands::run_install(&context, &args))
        }
        Commands::List { json } => commands::run_list(&context, json),
    }
}
