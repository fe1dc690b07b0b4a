//! Cell value sanitization
//!
//! Spreadsheet authors write statements with placeholder conventions that
//! must be rewritten before the text is usable SQL: `%%` stands for an
//! escaped quote, `$$` for a line break, and empty positions inside
//! `VALUES(...)` lists become `NULL`. Sanitization also harvests
//! `DECLARE @name` variables so they can be restated after the next batch
//! separator.

use regex::Regex;

/// Variable names seen since the last batch separator, in first-seen order
///
/// Implemented as an append-only sequence with duplicate suppression so the
/// generated `DECLARE` restatement order is deterministic.
#[derive(Debug, Default)]
pub struct DeclareBuffer {
    names: Vec<String>,
}

impl DeclareBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a variable name; duplicates are ignored
    pub fn push(&mut self, name: &str) {
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

/// Normalize a raw cell value into SQL-safe text
///
/// Substitutions are applied in a fixed order; later rules operate on the
/// output of earlier ones (`%%` survives as `''` precisely because the
/// empty-quote rule has already run). Malformed SQL is transformed, never
/// rejected: statement correctness is the spreadsheet author's contract.
pub fn sanitize(raw: &str, declares: &mut DeclareBuffer) -> String {
    if raw.contains("DECLARE") {
        let declare = Regex::new(r"DECLARE\s@(\w+)").unwrap();
        if let Some(caps) = declare.captures(raw) {
            declares.push(&caps[1]);
        }
    }

    let mut value = raw.replace("''", "NULL");
    value = value.replace("'NULL'", "NULL");
    value = value.replace("%%", "''");
    value = value.replace("$$", "\n");
    value = fill_empty_positions(&value);

    // An unescaped quote inside a token would close the string literal early
    let inner_quote = Regex::new(r"(\w)'(\w)").unwrap();
    inner_quote.replace_all(&value, "${1}''${2}").into_owned()
}

/// Replace empty positions in parenthesized comma lists with `NULL`
///
/// A comma directly after `(` or directly before `)` is itself replaced;
/// the position between two commas and the position after a trailing comma
/// gain a `NULL` while keeping their commas. Comma runs are filled to a
/// fixpoint so `(1,,,4)` resolves completely.
fn fill_empty_positions(value: &str) -> String {
    let after_open = Regex::new(r"\(\s*,").unwrap();
    let before_close = Regex::new(r",\s*\)").unwrap();
    let between = Regex::new(r",\s*,").unwrap();
    let trailing = Regex::new(r",\s*$").unwrap();

    let mut value = after_open.replace_all(value, "(NULL").into_owned();
    value = before_close.replace_all(&value, "NULL)").into_owned();
    while between.is_match(&value) {
        value = between.replace_all(&value, ",NULL,").into_owned();
    }
    trailing.replace_all(&value, ",NULL").into_owned()
}
