use anyhow::Result;
use clap::Parser;

use excel2sql_cli::cli::commands::generate::handle_generate_command;
use excel2sql_cli::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => handle_generate_command(args),
    }
}
