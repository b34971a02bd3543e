//! Core data structures for decoded reports.
//!
//! Defines report classification, decode outcomes, the decode result
//! container and the processing statistics reported by the pipeline.

use crate::element::Element;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Report classification detected by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReportType {
    #[default]
    Unknown,
    CurrentObservation,
    Forecast,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [
        ReportType::Unknown,
        ReportType::CurrentObservation,
        ReportType::Forecast,
    ];

    pub fn message(self) -> &'static str {
        match self {
            ReportType::Unknown => "unable to detect",
            ReportType::CurrentObservation => "METAR",
            ReportType::Forecast => "TAF",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Structural part of the report an element was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReportSection {
    #[default]
    Unknown,
    Header,
    Body,
    Remarks,
}

/// Outcome of a decode call.
///
/// `None` is success; every other value describes why decoding stopped. The
/// decoder never fails in the Rust sense, it reports one of these instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DecodeError {
    #[default]
    None,
    EmptyInput,
    ExpectedReportTypeOrLocation,
    ExpectedLocation,
    ExpectedReportTime,
    ExpectedTimeSpan,
    UnexpectedEnd,
    UnexpectedGroupAfterNil,
    UnexpectedGroupAfterCancellation,
    UnexpectedCancellationMarkerInBody,
    AmendmentMarkerNotAllowedOutsideForecast,
    CancellationMarkerNotAllowedOutsideForecast,
    MaintenanceIndicatorNotAllowedOutsideObservation,
    TooManyGroups,
}

impl DecodeError {
    pub const ALL: [DecodeError; 14] = [
        DecodeError::None,
        DecodeError::EmptyInput,
        DecodeError::ExpectedReportTypeOrLocation,
        DecodeError::ExpectedLocation,
        DecodeError::ExpectedReportTime,
        DecodeError::ExpectedTimeSpan,
        DecodeError::UnexpectedEnd,
        DecodeError::UnexpectedGroupAfterNil,
        DecodeError::UnexpectedGroupAfterCancellation,
        DecodeError::UnexpectedCancellationMarkerInBody,
        DecodeError::AmendmentMarkerNotAllowedOutsideForecast,
        DecodeError::CancellationMarkerNotAllowedOutsideForecast,
        DecodeError::MaintenanceIndicatorNotAllowedOutsideObservation,
        DecodeError::TooManyGroups,
    ];

    pub fn message(self) -> &'static str {
        match self {
            DecodeError::None => "no error, parsed successfully",
            DecodeError::EmptyInput => "empty report",
            DecodeError::ExpectedReportTypeOrLocation => "expected report type or ICAO location",
            DecodeError::ExpectedLocation => "expected ICAO location",
            DecodeError::ExpectedReportTime => "expected report time",
            DecodeError::ExpectedTimeSpan => "expected time span",
            DecodeError::UnexpectedEnd => "unexpected report end",
            DecodeError::UnexpectedGroupAfterNil => "unexpected group after NIL",
            DecodeError::UnexpectedGroupAfterCancellation => "unexpected group after CNL",
            DecodeError::UnexpectedCancellationMarkerInBody => {
                "unexpected NIL or CNL in report body"
            }
            DecodeError::AmendmentMarkerNotAllowedOutsideForecast => "AMD is allowed in TAF only",
            DecodeError::CancellationMarkerNotAllowedOutsideForecast => {
                "CNL is allowed in TAF only"
            }
            DecodeError::MaintenanceIndicatorNotAllowedOutsideObservation => {
                "maintenance indicator is allowed only in METAR reports"
            }
            DecodeError::TooManyGroups => "report has too many groups and may be malformed",
        }
    }

    pub fn is_success(self) -> bool {
        self == DecodeError::None
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Metadata produced once per decode call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_type: ReportType,
    pub error: DecodeError,
}

/// Decoded report: metadata plus elements in order of appearance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecodeResult {
    pub metadata: ReportMetadata,
    pub elements: Vec<Element>,
}

impl DecodeResult {
    pub fn new(metadata: ReportMetadata, elements: Vec<Element>) -> Self {
        Self { metadata, elements }
    }

    /// Result carrying only an error and no elements
    pub fn failed(report_type: ReportType, error: DecodeError) -> Self {
        Self {
            metadata: ReportMetadata { report_type, error },
            elements: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.metadata.error.is_success()
    }
}

/// Processing statistics
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub records_skipped: usize,
    pub reports_decoded: usize,
    pub reports_with_errors: usize,
    pub log_path: Option<PathBuf>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Fold another file's statistics into this one
    pub fn merge(&mut self, other: &ProcessingStats) {
        self.files_processed += other.files_processed;
        self.files_failed += other.files_failed;
        self.records_skipped += other.records_skipped;
        self.reports_decoded += other.reports_decoded;
        self.reports_with_errors += other.reports_with_errors;
    }
}
