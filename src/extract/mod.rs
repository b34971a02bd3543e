//! Report text extraction from Aviation Weather Center CSV feeds
//!
//! The feed is a short plain-text preamble followed by an ordinary CSV table.
//! Extraction never looks at byte offsets: each line is tokenized as CSV and
//! the raw report is taken from a configured column, which is checked against
//! the header row before any record is read.
//!
//! ## Architecture
//!
//! - [`parser`] - Feed orchestration: preamble/table split, record loop
//! - [`preamble`] - Diagnostics and feed kind from the lines before the table
//! - [`column_mapping`] - Header row name to index map
//! - [`field_extractor`] - Quote-aware extraction of one field by index
//! - [`stats`] - Extraction statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use metaf_decoder::extract::FeedParser;
//!
//! # fn example() -> metaf_decoder::Result<()> {
//! let parser = FeedParser::new(0, Some("raw_text".to_string()));
//! let result = parser.parse_str("raw_text,station_id\nUKOO 161200Z 24005MPS 9999 FEW020 19/14 Q1013 NOSIG,UKOO\n")?;
//!
//! assert_eq!(result.reports.len(), 1);
//! assert_eq!(result.stats.records_skipped, 0);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_extractor;
pub mod parser;
pub mod preamble;
pub mod stats;

#[cfg(test)]
mod tests;

pub use column_mapping::ColumnMapping;
pub use field_extractor::{FieldExtractor, extract_field};
pub use parser::FeedParser;
pub use preamble::{FeedKind, FeedPreamble};
pub use stats::{ExtractResult, ExtractStats, ExtractedReport};
