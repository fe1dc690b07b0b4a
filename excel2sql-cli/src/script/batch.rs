//! Batch driver: workbook discovery and run aggregation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;

use super::header::TaskMetadata;
use super::sheet::{LineCounter, SheetStats};
use super::workbook::process_workbook;

/// How the input location is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Process exactly one workbook file
    Single,
    /// Process every workbook directly under a directory (non-recursive)
    Collection,
}

/// Aggregated outcome of one generation run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Generated script file names, in processing order
    pub file_names: Vec<String>,
    /// Diagnostics collected across the whole run
    pub log_messages: Vec<String>,
    /// Sheets excluded by the column gate
    pub skipped_sheets: usize,
    /// Per-sheet statement counts, in first-seen sheet order
    pub validation: Vec<(String, SheetStats)>,
}

impl RunReport {
    /// Record stats for a sheet, replacing an earlier entry with the same name
    pub(crate) fn record_stats(&mut self, sheet_name: String, stats: SheetStats) {
        if let Some(entry) = self.validation.iter_mut().find(|(name, _)| *name == sheet_name) {
            entry.1 = stats;
        } else {
            self.validation.push((sheet_name, stats));
        }
    }
}

/// Process every workbook at `location` and aggregate diagnostics
///
/// One workbook failing to open or write is logged and does not abort the
/// remaining workbooks. The statement line counter lives here so the batch
/// separator cadence spans the whole run.
pub fn run(
    location: &Path,
    mode: Mode,
    metadata: &TaskMetadata,
    config: &Config,
) -> Result<RunReport> {
    let workbooks = discover_workbooks(location, mode)?;

    let mut report = RunReport::default();
    let mut counter = LineCounter::new();

    for (index, workbook) in workbooks.iter().enumerate() {
        log::info!("processing workbook: {}", workbook.display());
        match process_workbook(workbook, index + 1, metadata, config, &mut counter, &mut report) {
            Ok((file_name, bytes)) => {
                log::debug!("generated {file_name} ({bytes} bytes)");
                report.file_names.push(file_name);
            }
            Err(err) => {
                log::error!("workbook {} failed: {err:#}", workbook.display());
                report
                    .log_messages
                    .push(format!("Error: workbook {}: {err:#}", workbook.display()));
            }
        }
    }

    Ok(report)
}

/// List the workbooks to process for the given mode
///
/// Collection order is whatever the directory listing returns; callers may
/// rely on it for display only.
fn discover_workbooks(location: &Path, mode: Mode) -> Result<Vec<PathBuf>> {
    match mode {
        Mode::Single => Ok(vec![location.to_path_buf()]),
        Mode::Collection => {
            let entries = std::fs::read_dir(location)
                .with_context(|| format!("Failed to read directory: {}", location.display()))?;

            let mut workbooks = Vec::new();
            for entry in entries {
                let path = entry?.path();
                let is_workbook = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
                if path.is_file() && is_workbook {
                    workbooks.push(path);
                }
            }
            Ok(workbooks)
        }
    }
}
