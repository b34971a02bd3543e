//! Feed parser orchestration
//!
//! Splits the feed into preamble and table, validates the configured report
//! column against the header row and extracts one report per record.

use std::path::Path;
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::field_extractor::{FieldExtractor, tokenize};
use super::preamble::{FeedKind, FeedPreamble};
use super::stats::{ExtractResult, ExtractStats, ExtractedReport};
use crate::config::MetafConfig;
use crate::constants::{DEFAULT_RAW_TEXT_COLUMN, RAW_TEXT_HEADER, keywords};
use crate::{MetafError, Result};

/// Parser for data service CSV feeds
#[derive(Debug, Clone)]
pub struct FeedParser {
    column: usize,
    header_name: Option<String>,
    kind_override: Option<FeedKind>,
    prefix_keyword: bool,
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new(DEFAULT_RAW_TEXT_COLUMN, Some(RAW_TEXT_HEADER.to_string()))
    }
}

impl FeedParser {
    /// Parser reading `column`, optionally validated against `header_name`
    pub fn new(column: usize, header_name: Option<String>) -> Self {
        Self {
            column,
            header_name,
            kind_override: None,
            prefix_keyword: false,
        }
    }

    pub fn from_config(config: &MetafConfig) -> Self {
        Self::new(config.raw_text_column, config.expected_header().map(str::to_string))
            .with_keyword_prefix(config.prefix_report_keyword)
    }

    /// Treat the feed as `kind` regardless of its preamble
    pub fn with_kind(mut self, kind: FeedKind) -> Self {
        self.kind_override = Some(kind);
        self
    }

    /// Prepend the feed's report keyword to reports that lack one
    pub fn with_keyword_prefix(mut self, enabled: bool) -> Self {
        self.prefix_keyword = enabled;
        self
    }

    /// Parse a feed file
    pub fn parse_file(&self, file_path: &Path) -> Result<ExtractResult> {
        info!("Parsing feed file: {}", file_path.display());

        if !file_path.exists() {
            return Err(MetafError::FileNotFound {
                path: file_path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }

    /// Parse feed content held in memory
    pub fn parse_str(&self, content: &str) -> Result<ExtractResult> {
        let lines: Vec<&str> = content.lines().collect();
        let (header_index, headers) = self.find_header_row(&lines)?;

        let preamble = FeedPreamble::parse(&lines[..header_index]);
        for error in &preamble.errors {
            warn!("Feed reports error: {}", error);
        }
        for warning in &preamble.warnings {
            debug!("Feed reports warning: {}", warning);
        }

        let mapping = ColumnMapping::analyze(&headers);
        debug!("Header row at line {}: {} columns", header_index + 1, mapping.len());
        let extractor =
            FieldExtractor::from_header(&mapping, self.column, self.header_name.as_deref())?;

        let kind = self.kind_override.unwrap_or_else(|| preamble.kind());
        let mut stats = ExtractStats::default();
        let mut reports = Vec::new();

        for (offset, line) in lines[header_index + 1..].iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_number = header_index + offset + 2;
            stats.total_records += 1;

            match extractor.extract_line(line) {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        stats.empty_reports += 1;
                        debug!("Line {}: empty report field", line_number);
                        continue;
                    }
                    reports.push(ExtractedReport {
                        line_number,
                        text: self.with_report_keyword(text, kind),
                    });
                    stats.reports_extracted += 1;
                }
                Err(e) => {
                    stats.records_skipped += 1;
                    stats.errors.push(format!("Line {}: {}", line_number, e));
                    warn!("Skipped line {}: {}", line_number, e);
                }
            }
        }

        if let Some(expected) = preamble.result_count {
            if expected != stats.total_records {
                warn!(
                    "Feed announced {} results but {} records were found",
                    expected, stats.total_records
                );
            }
        }

        info!(
            "Extracted {} {} reports from {} records",
            stats.reports_extracted, kind, stats.total_records
        );

        Ok(ExtractResult {
            preamble,
            reports,
            stats,
        })
    }

    /// Locate the CSV header row; everything before it is preamble
    fn find_header_row(&self, lines: &[&str]) -> Result<(usize, csv::StringRecord)> {
        for (index, line) in lines.iter().enumerate() {
            let Ok(record) = tokenize(line) else {
                continue;
            };
            let is_header = match &self.header_name {
                Some(name) => record.iter().any(|field| field.trim() == name),
                None => record.len() > 1,
            };
            if is_header {
                return Ok((index, record));
            }
        }

        Err(MetafError::MissingHeaderRow {
            expected: self
                .header_name
                .clone()
                .unwrap_or_else(|| "multi-column".to_string()),
        })
    }

    fn with_report_keyword(&self, text: &str, kind: FeedKind) -> String {
        let Some(keyword) = kind.keyword().filter(|_| self.prefix_keyword) else {
            return text.to_string();
        };
        let first = text.split_whitespace().next().unwrap_or_default();
        if [keywords::METAR, keywords::SPECI, keywords::TAF].contains(&first) {
            text.to_string()
        } else {
            format!("{} {}", keyword, text)
        }
    }
}
