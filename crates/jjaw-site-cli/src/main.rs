//! `jjaw-site`: inspect the site configuration, drive the color-scheme
//! preference and list blog articles.

mod args;
mod commands;
mod output;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<String> {
    let site = commands::load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Config { format } => commands::config(&site, format),
        Command::Scheme(args) => commands::scheme(&site, &args),
        Command::Blog(args) => commands::blog(&site, &args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(out) => {
            let mut stdout = std::io::stdout().lock();
            if stdout.write_all(out.as_bytes()).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
