//! Single-workbook processing: worksheets in, one SQL script out

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Reader, Xlsx, open_workbook};

use crate::config::Config;

use super::batch::RunReport;
use super::header::{TaskMetadata, build_header, task_code};
use super::sheet::{LineCounter, SheetOutcome, extract_sheet};

/// Process one workbook into a script file
///
/// Worksheets are visited in workbook order and folded into a single body
/// between the comment header and the rollback footer. Returns the output
/// file name and the number of bytes written.
pub fn process_workbook(
    path: &Path,
    sequence: usize,
    metadata: &TaskMetadata,
    config: &Config,
    counter: &mut LineCounter,
    report: &mut RunReport,
) -> Result<(String, usize)> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let code = task_code(&metadata.task_identifier);
    let mut script = build_header(metadata, &config.task_link_base);

    let sheet_names = workbook.sheet_names().to_vec();
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {sheet_name}"))?;

        match extract_sheet(
            &sheet_name,
            &range,
            counter,
            &mut script,
            &mut report.log_messages,
        ) {
            SheetOutcome::Processed(Some(stats)) => report.record_stats(sheet_name, stats),
            SheetOutcome::Processed(None) => {}
            SheetOutcome::Skipped => report.skipped_sheets += 1,
        }
    }

    // executing the script unedited is a deliberate no-op: the operator
    // must swap ROLLBACK for COMMIT by hand
    script.push_str("GO\nROLLBACK\n--COMMIT\n");

    let file_name = output_file_name(path, code.as_deref(), sequence, metadata);
    let out_path = config.output_dir.join(&file_name);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(&out_path, &script)
        .with_context(|| format!("Failed to write script: {}", out_path.display()))?;

    log::info!("wrote {} ({} bytes)", out_path.display(), script.len());
    Ok((file_name, script.len()))
}

/// Compose `<YYYYMMDD>-<taskCode>-00<seq>-DAT-<workbookBaseName>.sql`
///
/// A missing task code leaves its segment empty rather than inventing a
/// placeholder, so the date and sequence positions stay stable.
fn output_file_name(
    path: &Path,
    code: Option<&str>,
    sequence: usize,
    metadata: &TaskMetadata,
) -> String {
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!(
        "{}-{}-00{}-DAT-{}.sql",
        metadata.created_at.format("%Y%m%d"),
        code.unwrap_or(""),
        sequence,
        base,
    )
}
