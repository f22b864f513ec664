mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};
use commands::{fields, render};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Fields(args) => fields::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
