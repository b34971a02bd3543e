//! Extraction of the raw report field from a single CSV record
//!
//! The `csv` reader accepts a line with an unterminated quote and silently
//! returns the rest of the line as one field, so quoting is checked before
//! tokenizing. Records are single lines; a quoted field spanning lines is
//! reported as unterminated.

use super::column_mapping::ColumnMapping;
use crate::{MetafError, Result};
use csv::StringRecord;

/// Pulls one configured column out of each record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExtractor {
    index: usize,
}

impl FieldExtractor {
    /// Extractor for a column index with no header validation
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Extractor for `index`, checked against the header row.
    ///
    /// With an expected name the header must carry exactly that name at
    /// `index`; without one the index only has to exist. A mismatch reports
    /// where the expected name sits in the row, if anywhere.
    pub fn from_header(
        mapping: &ColumnMapping,
        index: usize,
        expected_name: Option<&str>,
    ) -> Result<Self> {
        let found = mapping.name_at(index);
        match (expected_name, found) {
            (Some(expected), Some(name)) if name == expected => Ok(Self::new(index)),
            (None, Some(_)) => Ok(Self::new(index)),
            (expected, found) => Err(MetafError::ColumnMismatch {
                index,
                expected: expected.unwrap_or("any column").to_string(),
                found: found.map(str::to_string),
                located_at: expected.and_then(|name| mapping.index_of(name)),
            }),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Field content of an already tokenized record
    pub fn extract<'r>(&self, record: &'r StringRecord) -> Result<&'r str> {
        record.get(self.index).ok_or_else(|| {
            MetafError::malformed(format!(
                "record has {} fields, column {} requested",
                record.len(),
                self.index
            ))
        })
    }

    /// Tokenize one CSV line and return the configured field
    pub fn extract_line(&self, line: &str) -> Result<String> {
        let record = tokenize(line)?;
        self.extract(&record).map(str::to_string)
    }
}

/// Field `index` of a single CSV line
pub fn extract_field(line: &str, index: usize) -> Result<String> {
    FieldExtractor::new(index).extract_line(line)
}

/// Split one line into fields, honouring standard CSV quoting
pub(crate) fn tokenize(line: &str) -> Result<StringRecord> {
    if has_unterminated_quote(line) {
        return Err(MetafError::malformed("unterminated quoted field"));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    reader
        .read_record(&mut record)
        .map_err(|e| MetafError::malformed(format!("CSV tokenization failed: {}", e)))?;
    Ok(record)
}

/// True when a quoted field is still open at the end of the line.
///
/// Quotes only open a field at its first character; `""` inside a quoted
/// field is an escaped quote.
fn has_unterminated_quote(line: &str) -> bool {
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            ',' => at_field_start = true,
            _ => at_field_start = false,
        }
    }

    in_quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unterminated_quote_detection() {
        assert!(!has_unterminated_quote("a,b,c"));
        assert!(!has_unterminated_quote(r#"a,"b,c",d"#));
        assert!(!has_unterminated_quote(r#""say ""hi""",x"#));
        assert!(has_unterminated_quote(r#"a,"b,c"#));
        assert!(has_unterminated_quote(r#""open"#));
        // A quote in the middle of an unquoted field is literal
        assert!(!has_unterminated_quote(r#"a,b"c,d"#));
    }

    #[test]
    fn test_tokenize_keeps_empty_fields() {
        let record = tokenize("a,,c,").unwrap();
        assert_eq!(record.len(), 4);
        assert_eq!(record.get(1), Some(""));
        assert_eq!(record.get(3), Some(""));
    }
}
