//! Per-worksheet statement extraction
//!
//! A sheet is scanned row by row against two fixed statement columns.
//! Update statements take priority over inserts; everything else in a row
//! is ignored. Emitted lines feed a run-wide counter that drives the
//! periodic `GO` batch separators.

use calamine::{Data, Range};

use super::sanitize::{DeclareBuffer, sanitize};

/// Fixed statement column positions in the change-request template
///
/// Columns are addressed by position, never by header text. Reordering the
/// spreadsheet template breaks extraction silently, so these stay named
/// constants rather than magic literals.
pub mod cols {
    /// Zero-based column holding INSERT statements (column U)
    pub const INSERT: usize = 20;
    /// Zero-based column holding UPDATE statements (column W)
    pub const UPDATE: usize = 22;
}

/// Statement lines per execution batch
pub const BATCH_LINES: usize = 45;

/// Run-scoped count of emitted statement lines
///
/// Threaded by mutable reference through every workbook and sheet so the
/// batch cadence holds across the entire run, never reset per sheet or per
/// workbook.
#[derive(Debug, Default)]
pub struct LineCounter(usize);

impl LineCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one emitted statement; true when this line closes a batch
    fn increment(&mut self) -> bool {
        self.0 += 1;
        self.0 % BATCH_LINES == 0
    }

    pub fn total(&self) -> usize {
        self.0
    }
}

/// Per-sheet statement counts for the validation report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetStats {
    pub total_queries: usize,
    pub inserts: usize,
    pub updates: usize,
}

/// Result of scanning one worksheet
#[derive(Debug, PartialEq, Eq)]
pub enum SheetOutcome {
    /// Sheet passed the column gate; stats only when it produced statements
    Processed(Option<SheetStats>),
    /// Sheet was too narrow to hold statement columns and was not scanned
    Skipped,
}

#[derive(Debug, Clone, Copy)]
enum StatementKind {
    Insert,
    Update,
}

struct RowStatement<'a> {
    kind: StatementKind,
    text: &'a str,
}

/// Scan one worksheet, appending sanitized statements to `out`
///
/// Sheets without enough columns for either statement position are skipped
/// whole; no partial extraction happens. Gated-in sheets always get their
/// `---Tabla:` marker, even when no row yields a statement. Row-level
/// failures are logged with their sheet and row context and never abort the
/// sheet.
pub fn extract_sheet(
    sheet_name: &str,
    range: &Range<Data>,
    counter: &mut LineCounter,
    out: &mut String,
    logs: &mut Vec<String>,
) -> SheetOutcome {
    let width = range.width();
    // narrower than the insert column implies narrower than the update column
    if range.height() < 2 || width <= cols::INSERT {
        logs.push(format!(
            "Sheet {sheet_name}: not enough columns to process."
        ));
        return SheetOutcome::Skipped;
    }

    out.push_str(&format!("---Tabla: {sheet_name}\n"));

    let mut declares = DeclareBuffer::new();
    let mut stats = SheetStats::default();

    // first row is the template header, data starts below it
    for (row_idx, row) in range.rows().skip(1).enumerate() {
        let statement = match classify_row(row) {
            Ok(Some(statement)) => statement,
            Ok(None) => continue,
            Err(err) => {
                log::warn!("skipping row {row_idx} in sheet '{sheet_name}': {err}");
                logs.push(format!(
                    "Error: failed to process row {row_idx} in sheet {sheet_name}: {err}"
                ));
                continue;
            }
        };

        out.push_str(&sanitize(statement.text, &mut declares));
        out.push('\n');

        stats.total_queries += 1;
        match statement.kind {
            StatementKind::Insert => stats.inserts += 1,
            StatementKind::Update => stats.updates += 1,
        }

        if counter.increment() {
            emit_batch_separator(out, &mut declares);
        }
    }

    if stats.total_queries > 0 {
        SheetOutcome::Processed(Some(stats))
    } else {
        SheetOutcome::Processed(None)
    }
}

/// Decide whether a row contributes a statement; update wins over insert
fn classify_row(row: &[Data]) -> Result<Option<RowStatement<'_>>, String> {
    if let Some(text) = statement_cell(row, cols::UPDATE)? {
        if text.trim().to_lowercase().starts_with("update") {
            return Ok(Some(RowStatement {
                kind: StatementKind::Update,
                text: text.trim(),
            }));
        }
    }

    if let Some(text) = statement_cell(row, cols::INSERT)? {
        if text.trim().to_lowercase().starts_with("insert into") {
            return Ok(Some(RowStatement {
                kind: StatementKind::Insert,
                text: text.trim(),
            }));
        }
    }

    Ok(None)
}

/// Fetch a statement cell as text; an error-valued cell poisons the row
fn statement_cell(row: &[Data], col: usize) -> Result<Option<&str>, String> {
    match row.get(col) {
        Some(Data::String(s)) if !s.trim().is_empty() => Ok(Some(s)),
        Some(Data::Error(e)) => Err(format!("error value in column {col}: {e:?}")),
        _ => Ok(None),
    }
}

/// Close the current batch and restate the harvested variables
fn emit_batch_separator(out: &mut String, declares: &mut DeclareBuffer) {
    out.push_str("GO\n");
    for name in declares.iter() {
        out.push_str(&format!("DECLARE @{name} AS INT\nSET @{name} = 0\n"));
    }
    declares.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    /// Build a dense sheet range; `cells` are (row, col, text) triples
    fn sheet_range(rows: u32, columns: u32, cells: &[(u32, u32, &str)]) -> Range<Data> {
        let mut range = Range::new((0, 0), (rows - 1, columns - 1));
        for (row, col, text) in cells {
            range.set_value((*row, *col), Data::String(text.to_string()));
        }
        range
    }

    fn extract(range: &Range<Data>, counter: &mut LineCounter) -> (String, Vec<String>, SheetOutcome) {
        let mut out = String::new();
        let mut logs = Vec::new();
        let outcome = extract_sheet("Clientes", range, counter, &mut out, &mut logs);
        (out, logs, outcome)
    }

    #[test]
    fn test_narrow_sheet_is_skipped_whole() {
        let range = sheet_range(3, 20, &[(1, 19, "INSERT INTO t VALUES(1)")]);
        let (out, logs, outcome) = extract(&range, &mut LineCounter::new());

        assert_eq!(outcome, SheetOutcome::Skipped);
        assert!(out.is_empty());
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("not enough columns"));
    }

    #[test]
    fn test_insert_column_is_processed_at_21_columns() {
        let range = sheet_range(2, 21, &[(1, 20, "INSERT INTO t VALUES(1,'A')")]);
        let (out, logs, outcome) = extract(&range, &mut LineCounter::new());

        assert_eq!(
            outcome,
            SheetOutcome::Processed(Some(SheetStats {
                total_queries: 1,
                inserts: 1,
                updates: 0,
            }))
        );
        assert_eq!(out, "---Tabla: Clientes\nINSERT INTO t VALUES(1,'A')\n");
        assert!(logs.is_empty());
    }

    #[test]
    fn test_update_wins_over_insert() {
        let range = sheet_range(
            2,
            23,
            &[
                (1, 20, "INSERT INTO t VALUES(1)"),
                (1, 22, "UPDATE t SET x = 1"),
            ],
        );
        let (out, _, outcome) = extract(&range, &mut LineCounter::new());

        assert_eq!(
            outcome,
            SheetOutcome::Processed(Some(SheetStats {
                total_queries: 1,
                inserts: 0,
                updates: 1,
            }))
        );
        assert_eq!(out, "---Tabla: Clientes\nUPDATE t SET x = 1\n");
    }

    #[test]
    fn test_update_cell_without_update_text_falls_through_to_insert() {
        let range = sheet_range(
            2,
            23,
            &[
                (1, 20, "INSERT INTO t VALUES(1)"),
                (1, 22, "just a comment"),
            ],
        );
        let (out, _, _) = extract(&range, &mut LineCounter::new());
        assert_eq!(out, "---Tabla: Clientes\nINSERT INTO t VALUES(1)\n");
    }

    #[test]
    fn test_statement_match_ignores_case_and_padding() {
        let range = sheet_range(2, 21, &[(1, 20, "  insert into t VALUES(1)  ")]);
        let (out, _, _) = extract(&range, &mut LineCounter::new());
        assert_eq!(out, "---Tabla: Clientes\ninsert into t VALUES(1)\n");
    }

    #[test]
    fn test_marker_emitted_even_without_statements() {
        let range = sheet_range(3, 21, &[(1, 20, "notas varias")]);
        let (out, _, outcome) = extract(&range, &mut LineCounter::new());

        assert_eq!(outcome, SheetOutcome::Processed(None));
        assert_eq!(out, "---Tabla: Clientes\n");
    }

    #[test]
    fn test_error_cell_is_logged_and_row_skipped() {
        let mut range = sheet_range(3, 23, &[(2, 20, "INSERT INTO t VALUES(2)")]);
        range.set_value((1, 22), Data::Error(CellErrorType::Div0));

        let (out, logs, outcome) = extract(&range, &mut LineCounter::new());

        assert_eq!(
            outcome,
            SheetOutcome::Processed(Some(SheetStats {
                total_queries: 1,
                inserts: 1,
                updates: 0,
            }))
        );
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("row 0 in sheet Clientes"));
        assert!(out.ends_with("INSERT INTO t VALUES(2)\n"));
    }

    #[test]
    fn test_batch_separator_after_45_lines_flushes_declares() {
        let mut range = Range::new((0, 0), (45, 20));
        range.set_value(
            (1, 20),
            Data::String("INSERT INTO t VALUES(1)$$DECLARE @total INT".to_string()),
        );
        for row in 2..=45u32 {
            range.set_value((row, 20), Data::String(format!("INSERT INTO t VALUES({row})")));
        }

        let mut counter = LineCounter::new();
        let (out, _, outcome) = extract(&range, &mut counter);

        assert_eq!(counter.total(), 45);
        assert_eq!(out.matches("GO\n").count(), 1);
        assert!(out.ends_with("GO\nDECLARE @total AS INT\nSET @total = 0\n"));
        assert_eq!(
            outcome,
            SheetOutcome::Processed(Some(SheetStats {
                total_queries: 45,
                inserts: 45,
                updates: 0,
            }))
        );
    }

    #[test]
    fn test_counter_carries_across_sheets() {
        let mut counter = LineCounter::new();

        let mut big = Range::new((0, 0), (44, 20));
        for row in 1..=44u32 {
            big.set_value((row, 20), Data::String(format!("INSERT INTO t VALUES({row})")));
        }
        let (out_a, _, _) = extract(&big, &mut counter);
        assert_eq!(counter.total(), 44);
        assert_eq!(out_a.matches("GO\n").count(), 0);

        // the 45th statement of the run lands in the second sheet
        let small = sheet_range(3, 21, &[
            (1, 20, "INSERT INTO t VALUES(45)"),
            (2, 20, "INSERT INTO t VALUES(46)"),
        ]);
        let (out_b, _, _) = extract(&small, &mut counter);
        assert_eq!(counter.total(), 46);
        assert_eq!(out_b.matches("GO\n").count(), 1);
        assert!(out_b.contains("INSERT INTO t VALUES(45)\nGO\nINSERT INTO t VALUES(46)\n"));
    }

    #[test]
    fn test_declare_buffer_cleared_at_separator() {
        let mut counter = LineCounter::new();

        // fill 45 lines, declaring @total along the way
        let mut range = Range::new((0, 0), (45, 20));
        range.set_value(
            (1, 20),
            Data::String("INSERT INTO t VALUES(1)$$DECLARE @total INT".to_string()),
        );
        for row in 2..=45u32 {
            range.set_value((row, 20), Data::String(format!("INSERT INTO t VALUES({row})")));
        }
        let (out, _, _) = extract(&range, &mut counter);
        assert_eq!(out.matches("DECLARE @total AS INT").count(), 1);

        // next 45 lines carry no declares, so the second separator is bare
        let mut range = Range::new((0, 0), (45, 20));
        for row in 1..=45u32 {
            range.set_value((row, 20), Data::String(format!("INSERT INTO t VALUES({row})")));
        }
        let (out, _, _) = extract(&range, &mut counter);
        assert_eq!(counter.total(), 90);
        assert_eq!(out.matches("GO\n").count(), 1);
        assert!(out.ends_with("INSERT INTO t VALUES(45)\nGO\n"));
    }
}
