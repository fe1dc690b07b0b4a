//! Generate command handler

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use dialoguer::Input;

use super::GenerateArgs;
use crate::config::Config;
use crate::script::{self, Mode, TaskMetadata, report};

/// Handle the generate command: capture metadata, run the batch, report
pub fn handle_generate_command(args: GenerateArgs) -> Result<()> {
    // Handle --no-color flag
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = Config::load()?;
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }

    if !args.path.exists() {
        anyhow::bail!("Input path does not exist: {}", args.path.display());
    }
    let mode = if args.path.is_dir() {
        Mode::Collection
    } else {
        Mode::Single
    };

    // Metadata is captured once, before any sheet is scanned
    let metadata = capture_metadata(&args)?;

    let run_report = script::run(&args.path, mode, &metadata, &config)?;

    if run_report.file_names.is_empty() && run_report.log_messages.is_empty() {
        anyhow::bail!("No workbooks (.xlsx) found at {}", args.path.display());
    }

    print_summary(&run_report, &config);
    Ok(())
}

/// Capture task metadata up front, prompting for anything not on the command line
fn capture_metadata(args: &GenerateArgs) -> Result<TaskMetadata> {
    let task_identifier = prompt_or(
        args.task.as_deref(),
        "Task identifier (e.g. PROCLI-3948)",
    )?;
    let description = prompt_or(args.description.as_deref(), "Description")?;
    let author = prompt_or(args.author.as_deref(), "Author(s)")?;

    Ok(TaskMetadata {
        task_identifier,
        description,
        author,
        created_at: Local::now().date_naive(),
    })
}

fn prompt_or(flag: Option<&str>, prompt: &str) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value.to_string());
    }
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .context("Failed to read task metadata")
}

fn print_summary(run_report: &script::RunReport, config: &Config) {
    if run_report.file_names.is_empty() {
        println!("{}", "No scripts were generated.".yellow());
    } else {
        println!(
            "Generated {} script(s) in {}:",
            run_report.file_names.len(),
            config.output_dir.display()
        );
        for name in &run_report.file_names {
            println!("  {}", name.bright_green());
        }
    }

    if !run_report.validation.is_empty() {
        println!();
        println!("Validation:");
        for (sheet_name, stats) in &run_report.validation {
            println!("  {}", report::summary_line(sheet_name, stats));
        }
    }

    if run_report.skipped_sheets > 0 {
        println!();
        println!(
            "{}",
            format!(
                "Sheets skipped (not enough columns): {}",
                run_report.skipped_sheets
            )
            .yellow()
        );
    }

    if !run_report.log_messages.is_empty() {
        println!();
        println!("Diagnostics:");
        for message in &run_report.log_messages {
            println!("  {}", message.dimmed());
        }
    }
}
