//! Header row analysis for feed CSV tables

use csv::StringRecord;
use std::collections::HashMap;

/// Column mapping built from the header row
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// First position of each header name
    first_index: HashMap<String, usize>,

    /// Header names in row order, trimmed
    columns: Vec<String>,
}

impl ColumnMapping {
    /// Map every header name to its position; for duplicate names the first wins
    pub fn analyze(headers: &StringRecord) -> Self {
        let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let mut first_index = HashMap::with_capacity(columns.len());
        for (index, name) in columns.iter().enumerate() {
            first_index.entry(name.clone()).or_insert(index);
        }

        ColumnMapping {
            first_index,
            columns,
        }
    }

    /// Position of the first column called `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.first_index.get(name).copied()
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
