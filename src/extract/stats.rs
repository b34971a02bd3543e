//! Extraction statistics and result structures

use super::preamble::FeedPreamble;
use serde::{Deserialize, Serialize};

/// One report taken from the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedReport {
    /// 1-based line number in the source feed
    pub line_number: usize,

    /// Raw report text ready for decoding
    pub text: String,
}

/// Extraction result with reports and statistics
#[derive(Debug, Clone)]
pub struct ExtractResult {
    pub preamble: FeedPreamble,

    /// Reports in feed order
    pub reports: Vec<ExtractedReport>,

    pub stats: ExtractStats,
}

/// Per-feed extraction counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Non-empty lines after the header row
    pub total_records: usize,

    /// Reports handed on for decoding
    pub reports_extracted: usize,

    /// Records skipped as malformed
    pub records_skipped: usize,

    /// Records whose report field was blank
    pub empty_reports: usize,

    /// List of extraction errors for debugging
    pub errors: Vec<String>,
}
