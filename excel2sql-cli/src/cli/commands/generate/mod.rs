//! The `generate` command: workbooks in, SQL scripts out

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_generate_command;

#[derive(Args)]
pub struct GenerateArgs {
    /// Workbook file or directory containing workbooks
    pub path: PathBuf,

    /// Destination directory for generated scripts (defaults to the
    /// configured directory, then to Downloads)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Task identifier, e.g. PROCLI-3948 (prompted when omitted)
    #[arg(short, long)]
    pub task: Option<String>,

    /// Task description for the script header (prompted when omitted)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Author name(s) for the script header (prompted when omitted)
    #[arg(short, long)]
    pub author: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
