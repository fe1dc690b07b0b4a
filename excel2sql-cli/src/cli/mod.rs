//! Command-line interface definitions

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "excel2sql-cli",
    version,
    about = "Turn change-request Excel workbooks into reviewable SQL scripts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate SQL scripts from a workbook or a directory of workbooks
    Generate(commands::generate::GenerateArgs),
}
