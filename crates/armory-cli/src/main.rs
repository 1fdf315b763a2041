mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("armory=info".parse()?))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Export {
            categories,
            format,
            output_dir,
            window,
        } => commands::export::run(&args.source, &categories, format, &output_dir, window),
        Command::Season => commands::season::run(&args.source),
        Command::Summary { window } => commands::summary::run(&args.source, window),
        Command::Configure => commands::configure::run(&args.source),
    }
}
