//! Line-oriented parser for the published sheet's CSV export.
//!
//! The export is read with a deliberately small dialect: every `"` toggles
//! quoted mode, commas inside quotes are literal, and lines are split before
//! any quote handling. Doubled quotes are not un-escaped and quoted fields
//! cannot span lines.

/// One parsed CSV line, addressed by column position.
pub type RawRow = Vec<String>;

/// Splits `text` into rows of trimmed fields.
///
/// Whitespace-only lines are skipped. The header row is returned like any
/// other row; dropping it is the caller's concern.
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

/// Parses a single line into trimmed fields.
pub fn parse_line(line: &str) -> RawRow {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
