//! Delimited record scanning
//!
//! Splits raw source text into ordered field sequences. Quote characters
//! are stripped character-wise, so a delimiter inside a quoted field is
//! NOT protected. This is a deliberate simplification, not a
//! CSV-standard parser; the sources this crate consumes do not rely on
//! embedded delimiters.

/// Field delimiter shared by all seven sources
pub const DELIMITER: char = ',';

/// Quote character stripped from every field
const QUOTE: char = '"';

/// Remove every quote character from a field
fn strip_quotes(field: &str) -> String {
    field.chars().filter(|&c| c != QUOTE).collect()
}

/// Split one line into its fields
pub fn parse_fields(line: &str) -> Vec<String> {
    line.split(DELIMITER).map(strip_quotes).collect()
}

/// Lazily iterate the records of a raw text source, one field vector per
/// line. Empty input yields an empty iterator. Lines are not validated
/// here; arity and numeric checks belong to the loaders.
pub fn records(text: &str) -> impl Iterator<Item = Vec<String>> + '_ {
    text.lines().map(parse_fields)
}
