//! Pure helpers over run diagnostics
//!
//! The shell that presents logs and validation data (today a CLI, earlier a
//! desktop form) works on already-produced data; keeping these as plain
//! functions lets that shell be swapped freely.

use super::sheet::SheetStats;

/// Case-insensitive substring filter, preserving input order
pub fn filter_entries<'a>(messages: &'a [String], needle: &str) -> Vec<&'a String> {
    let needle = needle.to_lowercase();
    messages
        .iter()
        .filter(|message| message.to_lowercase().contains(&needle))
        .collect()
}

/// Render one validation summary line for a sheet
pub fn summary_line(sheet_name: &str, stats: &SheetStats) -> String {
    let mut line = format!(
        "Sheet {}: {} queries generated.",
        sheet_name, stats.total_queries
    );

    let mut details = Vec::new();
    if stats.inserts > 0 {
        details.push(format!("INSERTs: {}", stats.inserts));
    }
    if stats.updates > 0 {
        details.push(format!("UPDATEs: {}", stats.updates));
    }
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }

    line
}
